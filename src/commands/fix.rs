use std::path::Path;

use clap::Args;

use authfix::rewrite::{self, FixOptions, FixReport};
use authfix::{config, Error};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct FixArgs {
    /// Directory tree to rewrite (defaults to configured root)
    #[arg(long)]
    path: Option<String>,

    /// File extension to select (defaults to configured extension)
    #[arg(long)]
    ext: Option<String>,

    /// Only rewrite files whose root-relative path matches a glob
    /// (e.g., "**/route.ts")
    #[arg(long)]
    glob: Option<String>,

    /// Run the full pipeline without writing any file
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: FixArgs, _global: &GlobalArgs) -> CmdResult<FixReport> {
    let config = config::load_config();

    let root = args.path.unwrap_or(config.root);
    let extension = args.ext.unwrap_or(config.extension);

    if extension.trim_start_matches('.').is_empty() {
        return Err(Error::validation_invalid_argument(
            "ext",
            "Extension must not be empty",
            None,
            None,
        ));
    }

    let options = FixOptions {
        extension,
        glob: args.glob,
        dry_run: args.dry_run,
    };

    let report = rewrite::fix_tree(Path::new(&root), &options)?;
    Ok((report, 0))
}
