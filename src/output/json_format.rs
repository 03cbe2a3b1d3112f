//! JSON output formatting.

use crate::scanner::ScanBatch;
use std::io::{self, Write};

/// Write a batch as pretty-printed JSON.
pub fn write_json<W: Write>(batch: &ScanBatch, mut writer: W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, batch)?;
    writeln!(writer)
}

/// Print results in JSON format.
pub fn print_json(batch: &ScanBatch) -> io::Result<()> {
    let stdout = io::stdout();
    write_json(batch, stdout.lock())
}
