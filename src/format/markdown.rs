//! Markdown output format for incgraph

use anyhow::Result;
use std::io::Write;

use super::Formatter;
use crate::utils::analysis::{DependencyReport, nodes_in_cycles};

const MAX_CYCLES_SHOWN: usize = 10;
const MAX_ORPHANS_SHOWN: usize = 20;

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn write_report(&mut self, output: &mut dyn Write, report: &DependencyReport) -> Result<()> {
        writeln!(output, "# Include Graph Report")?;
        writeln!(output)?;
        writeln!(output, "## Dependency Analysis")?;
        writeln!(output)?;
        writeln!(output, "- **Nodes (files):** {}", report.node_count)?;
        writeln!(output, "- **Edges (include relationships):** {}", report.edge_count)?;

        // files nobody includes are not hubs
        let hubs: Vec<_> = report.hubs.iter().filter(|h| h.in_degree > 0).collect();
        if !hubs.is_empty() {
            writeln!(output)?;
            writeln!(output, "### Top Included Files (Hubs)")?;
            writeln!(output)?;
            writeln!(output, "| File | In-degree |")?;
            writeln!(output, "|------|-----------|")?;
            for hub in hubs {
                writeln!(output, "| `{}` | {} |", hub.path, hub.in_degree)?;
            }
        }

        if report.has_cycles() {
            writeln!(output)?;
            writeln!(
                output,
                "### Circular Dependencies ({} detected)",
                report.cycles.len()
            )?;
            writeln!(output)?;
            writeln!(
                output,
                "_{} files take part in at least one cycle._",
                nodes_in_cycles(&report.cycles).len()
            )?;
            writeln!(output)?;
            for (i, cycle) in report.cycles.iter().take(MAX_CYCLES_SHOWN).enumerate() {
                let chain = cycle
                    .nodes
                    .iter()
                    .map(|n| format!("`{}`", n))
                    .collect::<Vec<_>>()
                    .join(" → ");
                writeln!(output, "{}. {}", i + 1, chain)?;
            }
            if report.cycles.len() > MAX_CYCLES_SHOWN {
                writeln!(
                    output,
                    "- _...and {} more_",
                    report.cycles.len() - MAX_CYCLES_SHOWN
                )?;
            }
        }

        if !report.orphans.is_empty() {
            writeln!(output)?;
            writeln!(
                output,
                "### Orphaned Files ({} files with no incoming includes)",
                report.orphans.len()
            )?;
            writeln!(output)?;
            for orphan in report.orphans.iter().take(MAX_ORPHANS_SHOWN) {
                writeln!(output, "- `{}`", orphan)?;
            }
            if report.orphans.len() > MAX_ORPHANS_SHOWN {
                writeln!(
                    output,
                    "- _...and {} more_",
                    report.orphans.len() - MAX_ORPHANS_SHOWN
                )?;
            }
        }

        if !report.unreadable_files.is_empty()
            || report.dynamic_includes > 0
            || report.unresolved_includes > 0
        {
            writeln!(output)?;
            writeln!(output, "### Notes")?;
            writeln!(output)?;
            if report.dynamic_includes > 0 {
                writeln!(
                    output,
                    "- {} dynamic include(s) could not be resolved statically",
                    report.dynamic_includes
                )?;
            }
            if report.unresolved_includes > 0 {
                writeln!(
                    output,
                    "- {} include(s) point outside the scanned files",
                    report.unresolved_includes
                )?;
            }
            for path in &report.unreadable_files {
                writeln!(output, "- unreadable: `{}`", path)?;
            }
        }

        writeln!(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::analysis::{Cycle, Hub};

    fn render(report: &DependencyReport) -> String {
        let mut output = Vec::new();
        MarkdownFormatter.write_report(&mut output, report).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_sections() {
        let report = DependencyReport {
            node_count: 4,
            edge_count: 3,
            hubs: vec![
                Hub {
                    path: "config.php".to_string(),
                    in_degree: 2,
                },
                Hub {
                    path: "index.php".to_string(),
                    in_degree: 0,
                },
            ],
            cycles: vec![Cycle {
                nodes: vec!["a.php".to_string(), "b.php".to_string()],
            }],
            orphans: vec!["old.php".to_string()],
            ..Default::default()
        };

        let result = render(&report);
        assert!(result.contains("## Dependency Analysis"));
        assert!(result.contains("- **Nodes (files):** 4"));
        assert!(result.contains("| `config.php` | 2 |"));
        assert!(!result.contains("| `index.php` |"));
        assert!(result.contains("### Circular Dependencies (1 detected)"));
        assert!(result.contains("_2 files take part in at least one cycle._"));
        assert!(result.contains("1. `a.php` → `b.php`"));
        assert!(result.contains("- `old.php`"));
        assert!(!result.contains("### Notes"));
    }

    #[test]
    fn test_markdown_truncates_orphans() {
        let report = DependencyReport {
            node_count: 25,
            orphans: (0..25).map(|i| format!("f{:02}.php", i)).collect(),
            ..Default::default()
        };

        let result = render(&report);
        assert!(result.contains("- `f19.php`"));
        assert!(!result.contains("- `f20.php`"));
        assert!(result.contains("- _...and 5 more_"));
    }

    #[test]
    fn test_markdown_empty_report() {
        let result = render(&DependencyReport::default());
        assert!(result.contains("## Dependency Analysis"));
        assert!(result.contains("- **Edges (include relationships):** 0"));
        assert!(!result.contains("### Top Included Files"));
        assert!(!result.contains("### Orphaned Files"));
    }

    #[test]
    fn test_markdown_notes() {
        let report = DependencyReport {
            unreadable_files: vec!["broken.php".to_string()],
            dynamic_includes: 2,
            ..Default::default()
        };

        let result = render(&report);
        assert!(result.contains("### Notes"));
        assert!(result.contains("- 2 dynamic include(s)"));
        assert!(result.contains("- unreadable: `broken.php`"));
        assert!(!result.contains("outside the scanned files"));
    }
}
