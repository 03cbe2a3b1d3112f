//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan results.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{export_csv, print_csv, write_csv, BASE_COLUMNS};
pub use json_format::{print_json, write_json};
pub use plain::{
    print_error, print_info, print_plain, print_scan_header, print_success, print_warning,
    write_plain,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::scanner::ScanBatch;

/// Format and print scan results according to the specified format.
pub fn format_results(
    batch: &ScanBatch,
    metadata_columns: &[String],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(batch)?,
        OutputFormat::Json => json_format::print_json(batch)?,
        OutputFormat::Csv => csv_format::print_csv(batch, metadata_columns)?,
    }
    Ok(())
}
