//! Scan input files.
//!
//! Two layouts are accepted:
//! - Lines: `<target> <port>,<port>,...`, one request per line
//! - CSV: a header row, then `target,port;port;...,f1,f2,f3,f4` where the
//!   last four fields are passed through to the report unchanged
//!
//! Malformed lines are skipped with a warning; the rest of the file is
//! still read.

use crate::error::{InputError, InputResult};
use crate::types::ScanRequest;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Number of fields in a CSV input row.
pub const CSV_FIELDS: usize = 6;

/// Passthrough column names used when the CSV header cannot supply them.
pub const DEFAULT_METADATA_COLUMNS: [&str; 4] =
    ["Service", "Item Number", "Rule Identifier", "Description"];

/// Input file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputFormat {
    /// Pick CSV for `.csv` files, lines otherwise
    #[default]
    Auto,
    /// `<target> <ports>` per line
    Lines,
    /// Six-column CSV with a header row
    Csv,
}

impl InputFormat {
    /// Decide the concrete layout for `path`.
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => {
                let is_csv = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if is_csv {
                    Self::Csv
                } else {
                    Self::Lines
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Lines => write!(f, "lines"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Everything read from one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanInput {
    /// Requests in file order.
    pub requests: Vec<ScanRequest>,
    /// Names of the passthrough columns (empty for line input).
    pub metadata_columns: Vec<String>,
    /// Number of malformed lines that were skipped.
    pub skipped: usize,
}

/// Read and parse an input file.
pub fn read_input(path: &Path, format: InputFormat) -> InputResult<ScanInput> {
    let raw = fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = strip_non_ascii(&raw);

    match format.resolve(path) {
        InputFormat::Csv => parse_csv(text.as_bytes()),
        _ => Ok(parse_lines(&text)),
    }
}

/// Parse the line layout.
pub fn parse_lines(text: &str) -> ScanInput {
    let mut input = ScanInput::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() != 2 {
            warn!(line = idx + 1, content = line, "malformed input line, skipping");
            input.skipped += 1;
            continue;
        }

        input
            .requests
            .push(ScanRequest::new(fields[0], fields[1].split(',')));
    }

    input
}

/// Parse the CSV layout from any reader.
pub fn parse_csv<R: Read>(reader: R) -> InputResult<ScanInput> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let metadata_columns = if headers.len() == CSV_FIELDS {
        headers.iter().skip(2).map(str::to_string).collect()
    } else {
        DEFAULT_METADATA_COLUMNS.iter().map(|s| s.to_string()).collect()
    };

    let mut input = ScanInput {
        metadata_columns,
        ..ScanInput::default()
    };

    for record in rdr.records() {
        let record = record?;
        if record.len() != CSV_FIELDS {
            let line = record.position().map_or(0, |pos| pos.line());
            warn!(line, fields = record.len(), "malformed CSV row, skipping");
            input.skipped += 1;
            continue;
        }

        let request = ScanRequest::new(&record[0], record[1].split(';'))
            .with_metadata(record.iter().skip(2));
        input.requests.push(request);
    }

    Ok(input)
}

/// Drop NUL, DEL and every non-ASCII byte.
fn strip_non_ascii(raw: &[u8]) -> String {
    raw.iter()
        .filter(|&&b| b > 0 && b < 127)
        .map(|&b| b as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_parse_lines() {
        let input = parse_lines("10.0.0.1 22,80\nexample.com 443\n\n10.0.0.0/30 8080\n");
        assert_eq!(input.requests.len(), 3);
        assert_eq!(input.skipped, 0);
        assert_eq!(input.requests[0], ScanRequest::new("10.0.0.1", ["22", "80"]));
        assert_eq!(input.requests[2].request, "10.0.0.0/30");
        assert!(input.metadata_columns.is_empty());
    }

    #[test]
    fn test_parse_lines_skips_malformed() {
        let input = parse_lines("10.0.0.1\n10.0.0.2 80 extra\n10.0.0.3  80\n10.0.0.4 80\r\n");
        assert_eq!(input.skipped, 3);
        assert_eq!(input.requests, vec![ScanRequest::new("10.0.0.4", ["80"])]);
    }

    #[test]
    fn test_parse_csv() {
        let data = "\
Target,Ports,Service,Item Number,Rule Identifier,Description
10.0.0.1-10.0.0.2,22;80,ssh/http,1,R-100,\"web, and ssh\"
badrow,80
db.internal,5432,postgres,2,R-101,database
";
        let input = assert_ok!(parse_csv(data.as_bytes()));
        assert_eq!(input.skipped, 1);
        assert_eq!(
            input.metadata_columns,
            vec!["Service", "Item Number", "Rule Identifier", "Description"]
        );
        assert_eq!(input.requests.len(), 2);
        assert_eq!(input.requests[0].ports, vec!["22", "80"]);
        assert_eq!(
            input.requests[0].metadata,
            vec!["ssh/http", "1", "R-100", "web, and ssh"]
        );
        assert_eq!(input.requests[1].request, "db.internal");
    }

    #[test]
    fn test_parse_csv_custom_header() {
        let data = "host,ports,owner,ticket,zone,note\n10.1.1.1,443,ops,T-9,dmz,edge\n";
        let input = assert_ok!(parse_csv(data.as_bytes()));
        assert_eq!(input.metadata_columns, vec!["owner", "ticket", "zone", "note"]);
    }

    #[test]
    fn test_parse_csv_bad_header_uses_defaults() {
        let data = "host;ports\n10.1.1.1,443,a,b,c,d\n";
        let input = assert_ok!(parse_csv(data.as_bytes()));
        assert_eq!(input.metadata_columns, DEFAULT_METADATA_COLUMNS.to_vec());
        assert_eq!(input.requests.len(), 1);
    }

    #[test]
    fn test_strip_non_ascii() {
        assert_eq!(strip_non_ascii("10.0.0.1\u{feff} 80\u{7f}\n".as_bytes()), "10.0.0.1 80\n");
    }

    #[test]
    fn test_format_resolution() {
        assert_eq!(InputFormat::Auto.resolve(Path::new("t.CSV")), InputFormat::Csv);
        assert_eq!(InputFormat::Auto.resolve(Path::new("t.txt")), InputFormat::Lines);
        assert_eq!(InputFormat::Lines.resolve(Path::new("t.csv")), InputFormat::Lines);
    }

    #[test]
    fn test_read_input_from_files() {
        let mut csv_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(csv_file, "Target,Ports,Service,Item,Rule,Description").unwrap();
        writeln!(csv_file, "10.0.0.0/31,22;443,ssh,1,R1,d").unwrap();
        let input = assert_ok!(read_input(csv_file.path(), InputFormat::Auto));
        assert_eq!(input.requests.len(), 1);
        assert_eq!(input.requests[0].metadata.len(), 4);

        let mut txt_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(txt_file, "localhost 22,80").unwrap();
        let input = assert_ok!(read_input(txt_file.path(), InputFormat::Auto));
        assert_eq!(input.requests[0].ports, vec!["22", "80"]);
    }

    #[test]
    fn test_missing_file() {
        let err = assert_err!(read_input(Path::new("/nonexistent/targets.txt"), InputFormat::Lines));
        assert!(matches!(err, InputError::Read { .. }));
    }
}
