use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "authfix.json";

/// Root configuration structure for authfix.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthfixConfig {
    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for AuthfixConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
        }
    }
}

fn default_root() -> String {
    "app/api".to_string()
}

fn default_extension() -> String {
    "ts".to_string()
}

/// Load the authfix.json config, falling back to defaults on any error.
pub fn load_config() -> AuthfixConfig {
    load_config_from_path(Path::new(CONFIG_FILE)).unwrap_or_default()
}

/// Attempt to load config from an authfix.json file.
fn load_config_from_path(path: &Path) -> crate::Result<AuthfixConfig> {
    if !path.exists() {
        return Err(crate::Error::other("authfix.json not found"));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: AuthfixConfig = serde_json::from_str(&content).map_err(|e| {
        crate::Error::validation_invalid_json(e, Some("parse authfix.json".to_string()))
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let config = AuthfixConfig::default();
        assert_eq!(config.root, "app/api");
        assert_eq!(config.extension, "ts");
    }

    #[test]
    fn test_empty_object_parses_to_defaults() {
        let config: AuthfixConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.root, "app/api");
        assert_eq!(config.extension, "ts");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: AuthfixConfig =
            serde_json::from_str(r#"{"root": "src/app/api"}"#).unwrap();
        assert_eq!(config.root, "src/app/api");
        assert_eq!(config.extension, "ts");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from_path(&dir.path().join(CONFIG_FILE)).is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ root: app/api }").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ValidationInvalidJson);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"root": "pages/api", "extension": "tsx"}"#).unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.root, "pages/api");
        assert_eq!(config.extension, "tsx");
    }
}
