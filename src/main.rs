use anyhow::Result;
use clap::{Parser, ValueEnum};
use incgraph::config::{CONFIG_FILE_NAME, OutputFormat};
use incgraph::format::report_targets;
use incgraph::{IncgraphConfig, run};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Md,
    Json,
    Both,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Md => OutputFormat::Markdown,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Both => OutputFormat::Both,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Include/require dependency graph for PHP projects",
    long_about = None
)]
struct Args {
    /// Project root to scan
    path: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Number of hubs to report
    #[arg(long)]
    top: Option<usize>,

    /// Longest include cycle to enumerate
    #[arg(long)]
    max_cycle_len: Option<usize>,

    /// Add vendor directory (relative to the root)
    #[arg(long)]
    vendor: Vec<String>,

    /// Add ignore pattern (glob)
    #[arg(long)]
    ignore: Vec<String>,

    /// Source file extensions (replaces the configured list)
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Report entry points such as index.php as orphans too
    #[arg(long)]
    no_entry_exemption: bool,

    /// Decode non-UTF-8 sources lossily instead of skipping them
    #[arg(long)]
    lossy_decoding: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load from file or default
    let mut config =
        IncgraphConfig::load_from_file(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default();

    // 2. Override with CLI args
    if let Some(p) = args.path {
        config.path = p;
    }
    if let Some(o) = args.output {
        config.output = o;
    }
    if let Some(f) = args.format {
        config.output_format = f.into();
    }
    if let Some(n) = args.top {
        config.top_hubs = n;
    }
    if let Some(n) = args.max_cycle_len {
        config.max_cycle_len = Some(n);
    }
    config.vendor_dirs.extend(args.vendor);
    config.ignore_patterns.extend(args.ignore);
    if !args.extensions.is_empty() {
        config.extensions = args.extensions;
    }
    if args.no_entry_exemption {
        config.exempt_entry_points = false;
    }
    if args.lossy_decoding {
        config.lossy_decoding = true;
    }
    if args.verbose {
        config.verbose = true;
    }

    let default_level = if config.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    config.validate()?;

    let outputs: Vec<String> = report_targets(config.output_format, &config.output)
        .into_iter()
        .map(|(_, path)| path.display().to_string())
        .collect();
    let report = run(config)?;
    eprintln!(
        "{} files, {} includes, {} cycles, {} orphans -> {}",
        report.node_count,
        report.edge_count,
        report.cycles.len(),
        report.orphans.len(),
        outputs.join(", ")
    );

    Ok(())
}
