//! Assembly of the read-only analyses into one report.

use serde::Serialize;

use super::cycles::{Cycle, find_cycles};
use super::dependencies::GraphBuild;
use super::hubs::{Hub, find_hubs};
use super::orphans::{EntryPointPolicy, find_orphans};

/// Default number of hubs reported.
pub const DEFAULT_TOP_HUBS: usize = 10;

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub top_hubs: usize,
    pub entry_points: EntryPointPolicy,
    pub max_cycle_len: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_hubs: DEFAULT_TOP_HUBS,
            entry_points: EntryPointPolicy::default(),
            max_cycle_len: None,
        }
    }
}

/// Everything a renderer needs about the include structure of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub hubs: Vec<Hub>,
    pub orphans: Vec<String>,
    pub cycles: Vec<Cycle>,
    pub unreadable_files: Vec<String>,
    pub dynamic_includes: usize,
    pub unresolved_includes: usize,
}

impl DependencyReport {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Runs hub ranking, orphan detection and cycle enumeration over a finished
/// build. The graph is frozen at this point, so the passes run concurrently.
pub fn analyze(build: &GraphBuild, options: &AnalysisOptions) -> DependencyReport {
    let graph = &build.graph;

    let (hubs, (orphans, cycles)) = rayon::join(
        || find_hubs(graph, options.top_hubs),
        || {
            rayon::join(
                || find_orphans(graph, graph.nodes(), &options.entry_points),
                || find_cycles(graph, options.max_cycle_len),
            )
        },
    );

    DependencyReport {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        hubs,
        orphans,
        cycles,
        unreadable_files: build.unreadable_files.clone(),
        dynamic_includes: build.dynamic_includes,
        unresolved_includes: build.unresolved_includes,
    }
}
