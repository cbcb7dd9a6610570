use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;

/// Options for [`walk_directory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkConfig<'a> {
    pub ignore_patterns: &'a [String],
    pub respect_gitignore: bool,
    pub max_depth: Option<usize>,
}

/// Returns every regular file under `path`, sorted.
pub fn walk_directory(path: &Path, config: WalkConfig<'_>) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(path);

    // In override globs "pattern" whitelists and "!pattern" ignores.
    let mut override_builder = OverrideBuilder::new(path);
    for pattern in config.ignore_patterns {
        override_builder.add(&format!("!{}", pattern))?;
    }
    builder.overrides(override_builder.build()?);

    builder.standard_filters(config.respect_gitignore);
    builder.max_depth(config.max_depth);

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => warn!(error = %err, "error walking directory"),
        }
    }

    files.sort();
    Ok(files)
}
