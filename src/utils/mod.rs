//! Utility modules for incgraph
//!
//! - `analysis/` - Include graph construction and analysis
//! - `ignorefile` - Project-local ignore patterns

pub mod analysis;
pub mod ignorefile;

// Flat re-exports so callers can write `utils::graph`, `utils::cycles`, ...
pub use analysis::cycles;
pub use analysis::dependencies;
pub use analysis::extract;
pub use analysis::graph;
pub use analysis::hubs;
pub use analysis::orphans;
pub use analysis::report;
pub use analysis::resolve;
