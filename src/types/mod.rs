//! Core type definitions.
//!
//! Target classification, port validation and the records that flow from
//! input to the scan engine.

mod port;
mod probe;
mod target;

pub use port::{Port, PortError};
pub use probe::{ProbeUnit, ScanRequest};
pub use target::{expand, AddressSpan, Expansion, TargetSpec};
