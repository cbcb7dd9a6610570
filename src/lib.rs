pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod fs;
pub mod runner;
pub mod utils;

// Re-export key items for convenience
pub use config::{IncgraphConfig, OutputFormat};
pub use core::{DiscoveryResult, ScanEvent};
pub use error::IncgraphError;
pub use runner::{run, run_scan};
pub use utils::analysis::{DependencyGraph, DependencyReport};
