use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directories to always skip at any depth (dependency/VCS/build output).
const ALWAYS_SKIP_DIRS: &[&str] = &["node_modules", ".git", ".next"];

/// Collect every file under `root` whose name ends in `.<extension>`.
///
/// Entries are sorted by name at each level so two runs over the same
/// tree always visit files in the same order. A missing or non-directory
/// root is the one fatal error a run can hit; unreadable subdirectories
/// are skipped.
pub fn walk_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::fix_root_not_found(root.display().to_string()));
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut files = Vec::new();
    walk_recursive(root, &suffix, &mut files);
    Ok(files)
}

fn walk_recursive(dir: &Path, suffix: &str, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if ALWAYS_SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            walk_recursive(&path, suffix, files);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
        {
            files.push(path);
        }
    }
}
