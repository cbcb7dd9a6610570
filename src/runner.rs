use crate::config::IncgraphConfig;
use crate::core::{ScanEvent, discover_files};
use crate::format::{create_formatter, report_targets};
use crate::utils::analysis::{DependencyReport, analyze, build_dependency_graph};
use anyhow::{Context, Result, anyhow};
use crossbeam_channel::Sender;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Main entry point for the incgraph scanner in CLI mode.
///
/// The scan runs on a background thread; its events are consumed and logged
/// here. Returns the report once the worker has finished.
pub fn run(config: IncgraphConfig) -> Result<DependencyReport> {
    let (tx, rx) = crossbeam_channel::unbounded();

    let config_clone = config.clone();
    let worker = std::thread::spawn(move || {
        let result = run_scan(config_clone, Some(tx.clone()));
        if let Err(e) = &result {
            let _ = tx.send(ScanEvent::Error(format!("{:#}", e)));
        }
        result
    });

    for event in rx {
        match event {
            ScanEvent::StartScanning => info!(path = %config.path.display(), "scanning started"),
            ScanEvent::FilesFound { custom, vendor } => {
                info!(custom, vendor, "source files found")
            }
            ScanEvent::GraphBuilt { nodes, edges } => info!(nodes, edges, "include graph built"),
            ScanEvent::Complete(msg) => info!("{}", msg),
            ScanEvent::Error(e) => error!("{}", e),
        }
    }

    worker
        .join()
        .map_err(|_| anyhow!("scan worker panicked"))?
}

/// Discover, build, analyze and write the report to `config.output`.
pub fn run_scan(
    config: IncgraphConfig,
    tx: Option<Sender<ScanEvent>>,
) -> Result<DependencyReport> {
    let notify = |e: ScanEvent| {
        if let Some(ref tx) = tx {
            let _ = tx.send(e);
        }
    };

    notify(ScanEvent::StartScanning);

    let discovered = discover_files(&config)
        .with_context(|| format!("Failed to scan directory: {:?}", config.path))?;
    notify(ScanEvent::FilesFound {
        custom: discovered.file_count(),
        vendor: discovered.vendor_count,
    });

    let build =
        build_dependency_graph(&discovered.files, &discovered.root, &config.build_options());
    notify(ScanEvent::GraphBuilt {
        nodes: build.graph.node_count(),
        edges: build.graph.edge_count(),
    });

    let report = analyze(&build, &config.analysis_options());
    for cycle in &report.cycles {
        debug!(cycle = %cycle.cycle_path(), "include cycle");
    }

    let written = write_reports(&config, &report)?;
    notify(ScanEvent::Complete(format!("Written to {:?}", written)));
    Ok(report)
}

fn write_reports(config: &IncgraphConfig, report: &DependencyReport) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (format, path) in report_targets(config.output_format, &config.output) {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        create_formatter(format).write_report(&mut writer, report)?;
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_scan_emits_events_in_order() -> Result<()> {
        let project = TempDir::new()?;
        let out = TempDir::new()?;
        fs::write(project.path().join("index.php"), "<?php require 'lib.php';")?;
        fs::write(project.path().join("lib.php"), "<?php")?;

        let config = IncgraphConfig {
            path: project.path().to_path_buf(),
            output: out.path().join("report.json"),
            output_format: OutputFormat::Json,
            ..Default::default()
        };

        let (tx, rx) = crossbeam_channel::unbounded();
        let report = run_scan(config, Some(tx))?;
        let events: Vec<ScanEvent> = rx.iter().collect();

        assert_eq!(events[0], ScanEvent::StartScanning);
        assert_eq!(events[1], ScanEvent::FilesFound { custom: 2, vendor: 0 });
        assert_eq!(events[2], ScanEvent::GraphBuilt { nodes: 2, edges: 1 });
        assert!(matches!(events[3], ScanEvent::Complete(_)));

        assert_eq!(report.hubs[0].path, "lib.php");
        assert!(out.path().join("report.json").exists());
        Ok(())
    }

    #[test]
    fn test_run_scan_writes_both_formats() -> Result<()> {
        let project = TempDir::new()?;
        let out = TempDir::new()?;
        fs::write(project.path().join("a.php"), "<?php require 'b.php';")?;
        fs::write(project.path().join("b.php"), "<?php require 'a.php';")?;

        let config = IncgraphConfig {
            path: project.path().to_path_buf(),
            output: out.path().join("deps"),
            output_format: OutputFormat::Both,
            ..Default::default()
        };
        run_scan(config, None)?;

        let markdown = fs::read_to_string(out.path().join("deps.md"))?;
        assert!(markdown.contains("## Dependency Analysis"));
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.path().join("deps.json"))?)?;
        assert_eq!(json["cycles"], serde_json::json!([["a.php", "b.php"]]));
        assert!(!out.path().join("deps").exists());
        Ok(())
    }

    #[test]
    fn test_run_reports_invalid_root() -> Result<()> {
        let out = TempDir::new()?;
        let config = IncgraphConfig {
            path: out.path().join("missing"),
            output: out.path().join("report.md"),
            ..Default::default()
        };

        let err = run(config).unwrap_err();
        assert!(format!("{:#}", err).contains("not a directory"));
        assert!(!out.path().join("report.md").exists());
        Ok(())
    }
}
