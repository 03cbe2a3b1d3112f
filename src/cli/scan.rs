//! Scan command implementation.
//!
//! Wires input reading, work list planning, the coordinator and the report
//! writers together.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::input::{read_input, InputFormat};
use crate::output;
use crate::scanner::{plan, Coordinator, ScanConfig};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Scan every request in an input file.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Input file: "<target> <port>,<port>" lines or a six-column CSV
    ///
    /// CSV rows are: target, ports separated by ';', then four passthrough
    /// columns copied into the report.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// CSV file to write results to
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Seconds to wait for a reply before marking a port filtered [default: 10]
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Number of probes to run at once [default: 5]
    #[arg(short = 'p', long = "poolsize", visible_alias = "concurrency")]
    pub poolsize: Option<usize>,

    /// Input file layout
    #[arg(long, value_enum, default_value = "auto")]
    pub input_format: InputFormat,

    /// Report format printed to stdout
    #[arg(short = 'f', long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Show a progress bar while scanning
    #[arg(long)]
    pub progress: bool,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        let config = self.scan_config(settings, quiet)?;

        let input = read_input(&self.input, self.input_format)?;
        if input.skipped > 0 && !quiet {
            output::print_warning(&format!(
                "skipped {} malformed line(s) in {}",
                input.skipped,
                self.input.display()
            ));
        }

        let work = plan(&input.requests, settings.max_addresses_per_target);
        if !quiet {
            for rejected in &work.rejected {
                output::print_warning(&format!(
                    "skipping '{}': {}",
                    rejected.request, rejected.error
                ));
            }
        }

        if work.is_empty() && !quiet {
            output::print_warning(&format!(
                "nothing to scan in {}, writing an empty report",
                self.input.display()
            ));
        }

        let chatty = !quiet && self.format == OutputFormat::Plain;
        if chatty && !work.is_empty() {
            output::print_scan_header(
                input.requests.len() - work.rejected.len(),
                work.units.len(),
                config.concurrency,
                config.timeout.as_secs(),
            );
        }

        let batch = Coordinator::new(config).run(work.units).await;

        output::export_csv(&batch, &input.metadata_columns, &self.output)?;
        info!(path = %self.output.display(), rows = batch.len(), "wrote results");

        if !quiet {
            output::format_results(&batch, &input.metadata_columns, self.format)?;
        }
        if chatty {
            output::print_success(&format!("Results written to {}", self.output.display()));
            output::print_info(&format!(
                "Execution Time {:.2} Seconds",
                batch.duration_ms as f64 / 1000.0
            ));
        }

        Ok(())
    }

    /// Settings defaults, overridden by any flags given.
    pub fn scan_config(&self, settings: &AppSettings, quiet: bool) -> CliResult<ScanConfig> {
        let mut config = settings.scan_config();

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(CliError::InvalidArgument(
                    "timeout must be at least 1 second".to_string(),
                ));
            }
            config = config.with_timeout(Duration::from_secs(timeout));
        }

        if let Some(poolsize) = self.poolsize {
            if poolsize == 0 {
                return Err(CliError::InvalidArgument(
                    "poolsize must be at least 1".to_string(),
                ));
            }
            config = config.with_concurrency(poolsize);
        }

        if self.progress {
            config = config.with_progress();
        }
        if quiet {
            config.show_progress = false;
        }

        Ok(config)
    }
}
