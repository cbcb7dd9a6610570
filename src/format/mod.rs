//! Output format modules for incgraph

pub mod json;
pub mod markdown;

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::utils::analysis::DependencyReport;

/// A single concrete rendering of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

pub trait Formatter {
    fn write_report(&mut self, output: &mut dyn Write, report: &DependencyReport) -> Result<()>;
}

pub fn create_formatter(format: ReportFormat) -> Box<dyn Formatter> {
    match format {
        ReportFormat::Json => Box::new(json::JsonFormatter),
        ReportFormat::Markdown => Box::new(markdown::MarkdownFormatter),
    }
}

/// Files to write for `format`. A single format writes `output` as given;
/// `Both` swaps the extension for `.md` and `.json`.
pub fn report_targets(format: OutputFormat, output: &Path) -> Vec<(ReportFormat, PathBuf)> {
    match format {
        OutputFormat::Markdown => vec![(ReportFormat::Markdown, output.to_path_buf())],
        OutputFormat::Json => vec![(ReportFormat::Json, output.to_path_buf())],
        OutputFormat::Both => [ReportFormat::Markdown, ReportFormat::Json]
            .into_iter()
            .map(|f| (f, output.with_extension(f.extension())))
            .collect(),
    }
}
