use std::collections::BTreeSet;

use super::graph::DependencyGraph;

/// Basenames treated as entry points when no list is configured.
pub const DEFAULT_ENTRY_POINTS: &[&str] = &["index.php", "main.php", "app.php", "bootstrap.php"];

/// Which zero in-degree files are expected to be entry points.
///
/// This is a presentation filter, not a graph property: matching is by
/// case-insensitive basename, so `admin/index.php` and `index.php` are
/// both exempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointPolicy {
    basenames: BTreeSet<String>,
}

impl EntryPointPolicy {
    pub fn new<I, S>(basenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            basenames: basenames
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Reports every zero in-degree file.
    pub fn none() -> Self {
        Self {
            basenames: BTreeSet::new(),
        }
    }

    pub fn is_entry_point(&self, path: &str) -> bool {
        let basename = path.rsplit(['/', '\\']).next().unwrap_or(path);
        self.basenames.contains(&basename.to_lowercase())
    }
}

impl Default for EntryPointPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRY_POINTS.iter().copied())
    }
}

/// Returns, sorted, the files in `all_files` that nothing includes.
///
/// Files absent from the graph count as zero in-degree.
pub fn find_orphans<I, S>(
    graph: &DependencyGraph,
    all_files: I,
    policy: &EntryPointPolicy,
) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates: BTreeSet<String> = all_files
        .into_iter()
        .map(|file| file.as_ref().to_string())
        .collect();

    candidates
        .into_iter()
        .filter(|file| graph.in_degree(file) == 0)
        .filter(|file| !policy.is_entry_point(file))
        .collect()
}
