//! Resolution of include targets to files on disk.

use std::path::{Component, Path, PathBuf};

use super::extract::IncludeTarget;

/// Lexically normalizes a path: folds `.` and `..` without touching the
/// filesystem, so symlinked roots keep the spelling the caller gave them.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_with_parent =
                    matches!(normalized.components().next_back(), Some(Component::ParentDir));
                // `..` above the root stays at the root
                if ends_with_parent || (!normalized.pop() && !normalized.has_root()) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Project-relative, `/`-separated identity of `path`.
///
/// Paths outside `root` keep their full spelling.
pub fn relative_key(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}

/// Resolves one include target found in `source` to an existing file.
///
/// Candidates are tried in a fixed order: includer-directory as given, the
/// same with `default_extension` appended, root-anchored as given, root-anchored
/// with the extension. The first regular file wins. Dynamic targets and
/// URLs never resolve.
pub fn resolve_include(
    source: &Path,
    target: &IncludeTarget,
    root: &Path,
    default_extension: &str,
) -> Option<PathBuf> {
    let source_dir = source.parent().unwrap_or(root);

    let bases: Vec<PathBuf> = match target {
        IncludeTarget::Dynamic(_) => return None,
        IncludeTarget::Literal(raw) => {
            let raw = raw.trim();
            if raw.is_empty() || raw.contains("://") {
                return None;
            }
            let given = Path::new(raw);
            let dir_relative = if given.is_absolute() {
                given.to_path_buf()
            } else {
                source_dir.join(given)
            };
            let root_relative = root.join(raw.trim_start_matches(['/', '\\']));
            vec![dir_relative, root_relative]
        }
        IncludeTarget::DirRelative { levels, suffix } => {
            let mut base = source_dir.to_path_buf();
            for _ in 0..*levels {
                base.pop();
            }
            let suffix = suffix.trim().trim_start_matches(['/', '\\']);
            if suffix.is_empty() {
                return None;
            }
            vec![base.join(suffix)]
        }
    };

    bases
        .into_iter()
        .flat_map(|base| with_extension_variant(normalize_path(&base), default_extension))
        .find(|candidate| candidate.is_file())
}

fn with_extension_variant(candidate: PathBuf, extension: &str) -> Vec<PathBuf> {
    if candidate.extension().is_some() || extension.is_empty() {
        return vec![candidate];
    }
    let mut extended = candidate.clone().into_os_string();
    extended.push(".");
    extended.push(extension.trim_start_matches('.'));
    vec![candidate, PathBuf::from(extended)]
}
