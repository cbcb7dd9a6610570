//! Source file discovery
//!
//! Walks the project, keeps files with a configured source extension and
//! separates project code from vendor trees.

use std::path::{Component, Path};

use tracing::debug;

use crate::config::IncgraphConfig;
use crate::core::DiscoveryResult;
use crate::error::{IncgraphError, Result};
use crate::fs::{WalkConfig, walk_directory};
use crate::utils::ignorefile::load_ignore_file;

/// Discover source files according to configuration.
pub fn discover_files(config: &IncgraphConfig) -> Result<DiscoveryResult> {
    config.validate()?;
    let root = config
        .path
        .canonicalize()
        .map_err(|_| IncgraphError::InvalidRoot(config.path.clone()))?;

    let mut ignore_patterns = config.ignore_patterns.clone();
    ignore_patterns.extend(load_ignore_file(&root));

    let walked = walk_directory(
        &root,
        WalkConfig {
            ignore_patterns: &ignore_patterns,
            respect_gitignore: config.respect_gitignore,
            max_depth: config.max_depth,
        },
    )?;

    let vendor_prefixes = vendor_prefixes(&config.vendor_dirs);
    let mut result = DiscoveryResult {
        root: root.clone(),
        ..Default::default()
    };

    for path in walked {
        if !has_source_extension(&path, &config.extensions) {
            continue;
        }
        if is_vendor_path(&path, &root, &vendor_prefixes) {
            result.vendor_count += 1;
        } else {
            result.files.push(path);
        }
    }

    debug!(
        root = %root.display(),
        custom = result.files.len(),
        vendor = result.vendor_count,
        "discovered source files"
    );
    Ok(result)
}

/// Case-insensitive extension check, e.g. `Foo.PHP` counts as `php`.
pub fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Splits vendor dirs into component lists, longest first.
pub fn vendor_prefixes(vendor_dirs: &[String]) -> Vec<Vec<String>> {
    let mut prefixes: Vec<Vec<String>> = vendor_dirs
        .iter()
        .map(|dir| {
            dir.split(['/', '\\'])
                .filter(|part| !part.is_empty() && *part != ".")
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .filter(|parts| !parts.is_empty())
        .collect();
    prefixes.sort_by(|a, b| b.len().cmp(&a.len()));
    prefixes
}

/// True when `path`, relative to `root`, starts with any vendor prefix.
pub fn is_vendor_path(path: &Path, root: &Path, prefixes: &[Vec<String>]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    prefixes
        .iter()
        .any(|prefix| parts.len() >= prefix.len() && parts[..prefix.len()] == prefix[..])
}
