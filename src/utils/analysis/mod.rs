//! Include-graph analysis
//!
//! Extraction and resolution of include statements, the graph store, and the
//! read-only passes over it (hubs, orphans, cycles).

pub mod cycles;
pub mod dependencies;
pub mod extract;
pub mod graph;
pub mod hubs;
pub mod orphans;
pub mod report;
pub mod resolve;

// Re-export commonly used items
pub use cycles::{Cycle, find_cycles, nodes_in_cycles};
pub use dependencies::{BuildOptions, GraphBuild, build_dependency_graph};
pub use extract::{IncludeTarget, extract_includes};
pub use graph::DependencyGraph;
pub use hubs::{Hub, find_hubs};
pub use orphans::{EntryPointPolicy, find_orphans};
pub use report::{AnalysisOptions, DependencyReport, analyze};
pub use resolve::{normalize_path, relative_key, resolve_include};
