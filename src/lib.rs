//! # portsweep - concurrent TCP reachability scanning
//!
//! portsweep checks which TCP ports answer across a list of targets and
//! reports, for every (target, port) pair, whether the port is listening,
//! refused, filtered, or could not be reached at all.
//!
//! ## Features
//!
//! - **Flexible Targeting**: hostnames, IPv4 addresses, dash ranges and
//!   CIDR subnets
//! - **Bounded Concurrency**: a fixed number of probes in flight, each with
//!   its own timeout
//! - **Typed Outcomes**: every probe yields exactly one classified result
//! - **Passthrough Metadata**: CSV input columns are echoed into the report
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{build, Coordinator, ScanConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let units = build("192.168.1.1-192.168.1.3", &["22".into(), "80".into()], &[]).unwrap();
//!     let config = ScanConfig::new()
//!         .with_concurrency(5)
//!         .with_timeout(Duration::from_secs(2));
//!
//!     let batch = Coordinator::new(config).run(units).await;
//!     for outcome in &batch {
//!         println!("{}:{} {}", outcome.address, outcome.port, outcome.status);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Target classification and expansion, ports, probe units
//! - [`scanner`] - Work list building, the TCP prober and the coordinator
//! - [`input`] - Line and CSV input files
//! - [`config`] - Persistent default settings
//! - [`output`] - Plain, JSON and CSV reports
//! - [`cli`] - Argument parsing and the scan pipeline
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ExpandError};
pub use scanner::{Coordinator, Outcome, ProbeStatus, Prober, ScanBatch, ScanConfig};
pub use types::{expand, ProbeUnit, ScanRequest, TargetSpec};
