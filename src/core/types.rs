//! Core types shared across incgraph modules

use std::path::PathBuf;

/// Events emitted during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// Scanning has started
    StartScanning,
    /// Source files discovered, split into project and vendor files
    FilesFound { custom: usize, vendor: usize },
    /// Include graph finished
    GraphBuilt { nodes: usize, edges: usize },
    /// Scan complete with message
    Complete(String),
    /// Error occurred
    Error(String),
}

/// Result of file discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoveryResult {
    /// Canonical project root
    pub root: PathBuf,
    /// Project source files, sorted
    pub files: Vec<PathBuf>,
    /// Source files skipped because they live in a vendor directory
    pub vendor_count: usize,
}

impl DiscoveryResult {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
