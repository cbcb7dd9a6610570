use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use super::extract::{IncludeTarget, extract_includes};
use super::graph::DependencyGraph;
use super::resolve::{normalize_path, relative_key, resolve_include};

/// Extension appended to extension-less include targets when none is configured.
pub const DEFAULT_SOURCE_EXTENSION: &str = "php";

/// Options for [`build_dependency_graph`].
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Appended to include targets that have no extension.
    pub default_extension: String,
    /// Decode non-UTF-8 sources with replacement characters instead of
    /// treating them as unreadable.
    pub lossy_decoding: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            lossy_decoding: false,
        }
    }
}

/// A finished graph plus what the builder had to skip along the way.
#[derive(Debug, Clone, Default)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    /// Files whose text could not be read; their nodes exist without edges.
    pub unreadable_files: Vec<String>,
    /// Include statements with non-literal arguments.
    pub dynamic_includes: usize,
    /// Static includes that did not land on a known project file.
    pub unresolved_includes: usize,
}

/// Edges found in a single file, produced by one worker.
#[derive(Debug, Default)]
struct FileEdges {
    edges: Vec<String>,
    dynamic: usize,
    unresolved: usize,
}

/// Builds the include graph for `files` under `root`.
///
/// Every input file becomes a node, even when it has no edges or cannot be
/// read. Files are scanned in parallel; each scan yields a private edge list
/// that is merged into the graph on the calling thread, in input order.
pub fn build_dependency_graph(
    files: &[PathBuf],
    root: &Path,
    options: &BuildOptions,
) -> GraphBuild {
    let root = normalize_path(root);

    // normalized absolute path -> node key, first spelling wins
    let mut known: HashMap<PathBuf, String> = HashMap::with_capacity(files.len());
    let mut sources: Vec<(PathBuf, String)> = Vec::with_capacity(files.len());
    for file in files {
        let normalized = normalize_path(file);
        if known.contains_key(&normalized) {
            continue;
        }
        let key = relative_key(&normalized, &root);
        known.insert(normalized.clone(), key.clone());
        sources.push((normalized, key));
    }

    let mut build = GraphBuild::default();
    for (_, key) in &sources {
        build.graph.add_node(key.clone());
    }

    let scans: Vec<io::Result<FileEdges>> = sources
        .par_iter()
        .map(|(path, _)| scan_file(path, &root, &known, options))
        .collect();

    let mut unreadable = BTreeSet::new();
    for ((path, key), scan) in sources.iter().zip(scans) {
        match scan {
            Ok(found) => {
                build.dynamic_includes += found.dynamic;
                build.unresolved_includes += found.unresolved;
                for target in found.edges {
                    build.graph.add_edge(key.clone(), target);
                }
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "cannot read source file, keeping it as an isolated node"
                );
                unreadable.insert(key.clone());
            }
        }
    }
    build.unreadable_files = unreadable.into_iter().collect();

    debug!(
        nodes = build.graph.node_count(),
        edges = build.graph.edge_count(),
        dynamic = build.dynamic_includes,
        unresolved = build.unresolved_includes,
        "include graph built"
    );
    build
}

fn scan_file(
    path: &Path,
    root: &Path,
    known: &HashMap<PathBuf, String>,
    options: &BuildOptions,
) -> io::Result<FileEdges> {
    let content = match String::from_utf8(fs::read(path)?) {
        Ok(text) => text,
        Err(err) if options.lossy_decoding => {
            warn!(
                path = %path.display(),
                error = %err.utf8_error(),
                "source file is not valid UTF-8, decoding lossily"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
        Err(err) => return Err(io::Error::new(io::ErrorKind::InvalidData, err)),
    };
    let mut found = FileEdges::default();

    for target in extract_includes(&content) {
        if let IncludeTarget::Dynamic(expr) = &target {
            debug!(path = %path.display(), expression = %expr, "skipping dynamic include");
            found.dynamic += 1;
            continue;
        }

        // out-of-set targets (vendor trees, generated files) never become edges
        match resolve_include(path, &target, root, &options.default_extension)
            .and_then(|resolved| known.get(&resolved))
        {
            Some(key) => found.edges.push(key.clone()),
            None => found.unresolved += 1,
        }
    }

    Ok(found)
}
