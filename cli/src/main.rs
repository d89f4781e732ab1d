use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use nsdelay::clock::compute_actual_time;
use nsdelay::config::{AnnotatorConfig, ConfigError, LogLevel};
use nsdelay::delay::parse_delay;
use nsdelay::engine::{PassReport, process_delays};
use nsdelay::memdom::{MemTree, SnapshotError};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{0}` contains no signed delay")]
    NoDelay(String),
    #[error("`{0}` contains no valid time of day")]
    InvalidTime(String),
    #[error("--passes must be at least 1")]
    NoPasses,
}

#[derive(Parser, Debug)]
#[command(name = "nsdelay", about = "Compute actual times for journey planner delay markers")]
struct Cli {
    /// JSON config file; only `log_level` is used here.
    #[arg(long, env = "NSDELAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse marker text such as `+55` and print the delay as JSON.
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Apply a delay to a scheduled time.
    Actual {
        scheduled: String,
        #[arg(allow_hyphen_values = true)]
        delay: String,
    },
    /// Run the annotation pass over a JSON page snapshot.
    Annotate {
        snapshot: PathBuf,
        #[arg(long, default_value_t = 1)]
        passes: u32,
        #[arg(long, value_enum, default_value_t = Output::Html)]
        output: Output,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    /// The annotated tree as HTML.
    Html,
    /// The combined pass report as JSON.
    Report,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AnnotatorConfig::from_json(&read(path)?)?,
        None => AnnotatorConfig::default(),
    };
    init_tracing(config.log_level);

    match cli.command {
        Command::Parse { text } => {
            let delay = parse_delay(&text).ok_or(CliError::NoDelay(text))?;
            println!("{}", serde_json::to_string(&delay)?);
        }
        Command::Actual { scheduled, delay } => {
            println!("{}", actual_time(&scheduled, &delay)?);
        }
        Command::Annotate { snapshot, passes, output } => {
            let (tree, report) = annotate(&read(&snapshot)?, passes)?;
            match output {
                Output::Html => println!("{}", tree.to_html()),
                Output::Report => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn actual_time(scheduled: &str, delay: &str) -> Result<String, CliError> {
    let parsed = parse_delay(delay).ok_or_else(|| CliError::NoDelay(delay.to_string()))?;
    compute_actual_time(scheduled, parsed.signed_minutes).ok_or_else(|| CliError::InvalidTime(scheduled.to_string()))
}

fn annotate(raw: &str, passes: u32) -> Result<(MemTree, PassReport), CliError> {
    if passes == 0 {
        return Err(CliError::NoPasses);
    }
    let mut tree = MemTree::from_json(raw)?;
    let mut total = PassReport::default();
    for pass in 1..=passes {
        let report = process_delays(&mut tree);
        tracing::info!(pass, scanned = report.scanned, annotated = report.annotated, failed = report.failed, "pass done");
        total.merge(&report);
    }
    Ok((tree, total))
}
