pub mod guard;
pub mod rules;

use std::path::Path;

use glob_match::glob_match;
use serde::Serialize;

use crate::error::Result;
use crate::local_files::{self, FileSystem};
use crate::walker;

// ============================================================================
// Report types
// ============================================================================

/// Full result of one `fix` run over a tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    pub root: String,
    pub extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glob: Option<String>,
    pub dry_run: bool,
    pub summary: FixSummary,
    pub outcomes: Vec<FileOutcome>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_failed: usize,
}

/// Per-file outcome. Untouched files are counted in the summary but not
/// listed here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub file: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guards: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    Changed,
    Failed,
}

impl FileOutcome {
    fn changed(file: String, fix: &FileFix) -> Self {
        Self {
            file,
            status: FileStatus::Changed,
            substitutions: Some(fix.substitutions),
            guards: Some(fix.guards),
            error: None,
        }
    }

    fn failed(file: String, error: String) -> Self {
        Self {
            file,
            status: FileStatus::Failed,
            substitutions: None,
            guards: None,
            error: Some(error),
        }
    }
}

/// Result of rewriting a single file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFix {
    pub changed: bool,
    pub substitutions: usize,
    pub guards: usize,
}

/// Knobs for a tree run. `extension` selects files, `glob` optionally
/// narrows to root-relative paths matching a pattern, `dry_run` runs the
/// full pipeline without writing.
#[derive(Debug, Clone)]
pub struct FixOptions {
    pub extension: String,
    pub glob: Option<String>,
    pub dry_run: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            extension: crate::config::AuthfixConfig::default().extension,
            glob: None,
            dry_run: false,
        }
    }
}

// ============================================================================
// Rewrite pipeline
// ============================================================================

/// Rewritten content plus what moved.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub content: String,
    pub substitutions: usize,
    pub guards: usize,
}

/// Pure rewrite of one file's content: flat substitutions first, then the
/// structural guard pass over the substituted lines.
///
/// Content is split and rejoined on `\n` rather than `str::lines()` so a
/// trailing newline (or its absence) round-trips exactly and untouched
/// input comes back byte-identical.
pub fn rewrite_content(text: &str) -> Rewrite {
    let (substituted, substitutions) = rules::apply_substitutions(text);

    let mut lines: Vec<String> = substituted.split('\n').map(|s| s.to_string()).collect();
    let guards = guard::neutralize_guards(&mut lines, &guard::BraceCounter);

    Rewrite {
        content: lines.join("\n"),
        substitutions,
        guards,
    }
}

/// Rewrite one file in place. The file is written only when the rewrite
/// actually changed it; an unchanged file reports `changed: false` and
/// zero counters.
pub fn fix_file(path: &Path, dry_run: bool) -> Result<FileFix> {
    let fs = local_files::local();
    let original = fs.read(path)?;
    let rewrite = rewrite_content(&original);

    if rewrite.content == original {
        return Ok(FileFix::default());
    }

    if !dry_run {
        fs.write(path, &rewrite.content)?;
    }

    Ok(FileFix {
        changed: true,
        substitutions: rewrite.substitutions,
        guards: rewrite.guards,
    })
}

/// Run the rewrite over every matching file under `root`.
///
/// A missing root is the only fatal error. Per-file failures are logged,
/// recorded as `failed` outcomes, and never stop the run.
pub fn fix_tree(root: &Path, options: &FixOptions) -> Result<FixReport> {
    let mut files = walker::walk_files(root, &options.extension)?;

    if let Some(pattern) = options.glob.as_deref() {
        files.retain(|f| {
            let relative = f.strip_prefix(root).unwrap_or(f).to_string_lossy();
            glob_match(pattern, &relative)
        });
    }

    let mut outcomes = Vec::new();
    let mut changed = 0usize;
    let mut failed = 0usize;

    for path in &files {
        let display = path.display().to_string();

        match fix_file(path, options.dry_run) {
            Ok(fix) if fix.changed => {
                changed += 1;
                log_status!("fix", "Fixed: {}", display);
                outcomes.push(FileOutcome::changed(display, &fix));
            }
            Ok(_) => {}
            Err(err) => {
                let reason = err.reason();
                failed += 1;
                log_status!("fix", "Error fixing {}: {}", display, reason);
                outcomes.push(FileOutcome::failed(display, reason));
            }
        }
    }

    log_status!("fix", "Total files fixed: {}", changed);

    Ok(FixReport {
        root: root.display().to_string(),
        extension: options.extension.trim_start_matches('.').to_string(),
        glob: options.glob.clone(),
        dry_run: options.dry_run,
        summary: FixSummary {
            files_scanned: files.len(),
            files_changed: changed,
            files_failed: failed,
        },
        outcomes,
    })
}
