//! CSV output formatting.

use crate::scanner::ScanBatch;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Columns every report starts with.
pub const BASE_COLUMNS: [&str; 4] = ["Request", "Destination", "Port", "Result"];

/// Write a batch as CSV to any writer.
///
/// Passthrough columns are appended only when some outcome carries
/// metadata. Missing names fall back to "Field N".
pub fn write_csv<W: Write>(
    batch: &ScanBatch,
    metadata_columns: &[String],
    writer: W,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let width = batch.metadata_width();

    let mut header: Vec<String> = BASE_COLUMNS.iter().map(|s| s.to_string()).collect();
    header.extend((0..width).map(|i| {
        metadata_columns
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("Field {}", i + 1))
    }));
    wtr.write_record(&header)?;

    for outcome in batch {
        let mut row = vec![
            outcome.request.clone(),
            outcome.address.clone(),
            outcome.port.clone(),
            outcome.status.to_string(),
        ];
        row.extend(outcome.metadata.iter().cloned());
        row.resize(BASE_COLUMNS.len() + width, String::new());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a batch as CSV to a file, replacing it if it exists.
pub fn export_csv(batch: &ScanBatch, metadata_columns: &[String], path: &Path) -> csv::Result<()> {
    let file = File::create(path)?;
    write_csv(batch, metadata_columns, file)
}

/// Print results in CSV format.
pub fn print_csv(batch: &ScanBatch, metadata_columns: &[String]) -> csv::Result<()> {
    let stdout = io::stdout();
    write_csv(batch, metadata_columns, stdout.lock())
}
