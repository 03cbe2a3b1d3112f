//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Probe failures are not
//! errors: they are reported as [`ProbeStatus`](crate::scanner::ProbeStatus)
//! values on each outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a target specification into addresses.
///
/// Each variant is an address parse error in the sense that the request
/// string could not be expanded. It fails only the request it belongs to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),

    #[error("invalid CIDR notation '{0}'")]
    InvalidCidr(String),

    #[error("range start {start} is above range end {end}")]
    InvertedRange { start: String, end: String },

    #[error("target expands to {count} addresses (max: {limit})")]
    TooManyAddresses { count: u64, limit: u64 },
}

/// Errors raised while reading scan input files.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read settings from {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid setting: {0}")]
    InvalidValue(String),
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for target expansion.
pub type ExpandResult<T> = Result<T, ExpandError>;

/// Result type alias for input reading.
pub type InputResult<T> = Result<T, InputError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
