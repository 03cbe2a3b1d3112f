//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::scanner::{ProbeStatus, ScanBatch};
use console::{style, Style};
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Print results in human-readable plain text format.
pub fn print_plain(batch: &ScanBatch) -> io::Result<()> {
    let stdout = io::stdout();
    write_plain(batch, stdout.lock())
}

/// Render the plain report to any writer.
pub fn write_plain<W: Write>(batch: &ScanBatch, mut out: W) -> io::Result<()> {
    let summary = batch.summary();

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out, "                  {} Scan Results", style("portsweep").cyan().bold())?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} probes in {:.2}s",
        style("Statistics:").bold(),
        summary.total,
        batch.duration_ms as f64 / 1000.0
    )?;
    writeln!(
        out,
        "               {} listening, {} not listening, {} filtered, {} unresolved, {} errors",
        style(summary.open).green().bold(),
        style(summary.not_listening).red(),
        style(summary.filtered).yellow(),
        style(summary.unresolved).magenta(),
        style(summary.errors).dim()
    )?;
    writeln!(out)?;

    if batch.is_empty() {
        writeln!(out, "  {}", style("No probes to display.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:<22}  {:<15}  {:>5}  {}",
            style("REQUEST").bold(),
            style("DESTINATION").bold(),
            style("PORT").bold(),
            style("RESULT").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for outcome in batch {
            writeln!(
                out,
                "  {:<22}  {:<15}  {:>5}  {}",
                truncate_string(&outcome.request, 22),
                truncate_string(&outcome.address, 15),
                outcome.port,
                status_style(&outcome.status).apply_to(outcome.status.to_string())
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

fn status_style(status: &ProbeStatus) -> Style {
    match status {
        ProbeStatus::Open => Style::new().green().bold(),
        ProbeStatus::NotListening => Style::new().red(),
        ProbeStatus::Filtered => Style::new().yellow(),
        ProbeStatus::NameResolutionFailed | ProbeStatus::HostLookupFailed => {
            Style::new().magenta()
        }
        ProbeStatus::OtherError(_) => Style::new().dim(),
    }
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(requests: usize, units: usize, concurrency: usize, timeout_secs: u64) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Requests: {}",
        style("•").dim(),
        style(requests).white().bold()
    );
    println!(
        "{} Probing {} (target, port) pairs, {} at a time, {}s timeout...",
        style("•").dim(),
        style(units).white().bold(),
        concurrency,
        timeout_secs
    );
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Truncate a string to a maximum length, adding ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Outcome;
    use crate::types::ProbeUnit;
    use chrono::Utc;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
    }

    #[test]
    fn test_plain_report_lists_every_outcome() {
        let batch = ScanBatch {
            started_at: Utc::now(),
            completed_at: Utc::now(),
            duration_ms: 2500,
            outcomes: vec![
                Outcome::new(ProbeUnit::new("web", "web", "443", vec![]), ProbeStatus::Open),
                Outcome::new(
                    ProbeUnit::new("web", "web", "8443", vec![]),
                    ProbeStatus::Filtered,
                ),
            ],
        };

        let mut buf = Vec::new();
        write_plain(&batch, &mut buf).unwrap();
        let text = console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).to_string();

        assert!(text.contains("2 probes in 2.50s"));
        assert!(text.contains("LISTENING"));
        assert!(text.contains("FILTERED"));
        assert!(text.contains("8443"));
    }
}
