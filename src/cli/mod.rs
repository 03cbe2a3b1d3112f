//! Command-line interface definitions.
//!
//! `portsweep <INPUT> <OUTPUT>` reads scan requests from INPUT, probes every
//! (target, port) pair and writes one CSV row per probe to OUTPUT.

mod scan;

pub use scan::ScanCommand;

use crate::config::AppSettings;
use crate::error::{CliResult, ConfigError};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// portsweep - probe TCP reachability across hosts, ranges and subnets.
///
/// Targets may be hostnames, IPv4 addresses, dash ranges
/// (10.0.0.1-10.0.0.20) or CIDR subnets (10.0.0.0/24).
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP reachability scanner", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanCommand,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a settings file (defaults to the XDG config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load settings and run the scan.
    pub async fn run(&self) -> CliResult<()> {
        let settings = self.load_settings()?;
        self.scan.execute(&settings, self.quiet).await
    }

    fn load_settings(&self) -> CliResult<AppSettings> {
        if let Some(path) = &self.config {
            return Ok(AppSettings::load_from(path)?);
        }

        match AppSettings::load() {
            Err(ConfigError::DirectoryNotFound) => {
                debug!("no configuration directory, using default settings");
                Ok(AppSettings::default())
            }
            other => Ok(other?),
        }
    }
}

/// Output format for the report printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format, same as the output file
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
