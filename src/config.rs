use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IncgraphError, Result};
use crate::utils::analysis::dependencies::DEFAULT_SOURCE_EXTENSION;
use crate::utils::analysis::orphans::DEFAULT_ENTRY_POINTS;
use crate::utils::analysis::report::DEFAULT_TOP_HUBS;
use crate::utils::analysis::{AnalysisOptions, BuildOptions, EntryPointPolicy};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "incgraph.toml";

/// Third-party trees excluded before files reach the graph builder.
pub const DEFAULT_VENDOR_DIRS: &[&str] = &[
    "google_config",
    "vendor",
    "fb_config",
    "mailer/vendor",
    "test/PHPExcel",
    "classes/mailer",
];

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    /// Markdown and JSON side by side, named after `output`
    Both,
}

/// Main configuration for incgraph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IncgraphConfig {
    /// Project root to scan
    pub path: PathBuf,
    /// Path of the written report
    pub output: PathBuf,
    /// Report format (Markdown, JSON or both)
    pub output_format: OutputFormat,
    /// Source file extensions, without the dot
    pub extensions: Vec<String>,
    /// Appended to extension-less include targets
    pub default_extension: String,
    /// Read non-UTF-8 sources with replacement characters
    pub lossy_decoding: bool,
    /// Root-relative directories holding third-party code
    pub vendor_dirs: Vec<String>,
    /// Glob patterns to skip while walking
    pub ignore_patterns: Vec<String>,
    /// Honor .gitignore and friends while walking
    pub respect_gitignore: bool,
    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,
    /// Basenames of files expected to have no includers
    pub entry_points: Vec<String>,
    /// Keep entry points out of the orphan list
    pub exempt_entry_points: bool,
    /// Number of hubs to report
    pub top_hubs: usize,
    /// Longest cycle to enumerate; unbounded when unset
    pub max_cycle_len: Option<usize>,
    /// Log progress events
    pub verbose: bool,
}

impl IncgraphConfig {
    /// Validates the configuration, ensuring the project root is a directory.
    pub fn validate(&self) -> Result<()> {
        if !self.path.is_dir() {
            return Err(IncgraphError::InvalidRoot(self.path.clone()));
        }
        Ok(())
    }

    /// Loads configuration from `path`. A missing file is not an error.
    pub fn load_from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| IncgraphError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| IncgraphError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            default_extension: self.default_extension.clone(),
            lossy_decoding: self.lossy_decoding,
        }
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        let entry_points = if self.exempt_entry_points {
            EntryPointPolicy::new(&self.entry_points)
        } else {
            EntryPointPolicy::none()
        };
        AnalysisOptions {
            top_hubs: self.top_hubs,
            entry_points,
            max_cycle_len: self.max_cycle_len,
        }
    }
}

impl Default for IncgraphConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            output: PathBuf::from("incgraph-report.md"),
            output_format: OutputFormat::Markdown,
            extensions: vec![DEFAULT_SOURCE_EXTENSION.to_string()],
            default_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            lossy_decoding: false,
            vendor_dirs: DEFAULT_VENDOR_DIRS.iter().map(|d| d.to_string()).collect(),
            ignore_patterns: Vec::new(),
            respect_gitignore: false,
            max_depth: None,
            entry_points: DEFAULT_ENTRY_POINTS.iter().map(|e| e.to_string()).collect(),
            exempt_entry_points: true,
            top_hubs: DEFAULT_TOP_HUBS,
            max_cycle_len: None,
            verbose: false,
        }
    }
}
