//! Core module for incgraph
//!
//! Scan events, discovery results and the file scanner.

pub mod scanner;
mod types;

pub use scanner::discover_files;
pub use types::*;
