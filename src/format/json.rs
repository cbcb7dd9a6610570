//! JSON output format for incgraph

use anyhow::Result;

use std::io::Write;

use super::Formatter;
use crate::utils::analysis::DependencyReport;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn write_report(&mut self, output: &mut dyn Write, report: &DependencyReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut *output, report)?;
        writeln!(output)?;
        Ok(())
    }
}
