//! Probe executor abstraction.
//!
//! Defines the outcome types every probe produces and the [`Prober`] trait
//! the coordinator drives, so a test double can stand in for real sockets.

use crate::types::ProbeUnit;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Classified result of one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// The connection was accepted.
    Open,
    /// No answer before the timeout (dropped silently, e.g. by a firewall).
    Filtered,
    /// The remote refused or reset the connection.
    NotListening,
    /// The name resolved, but not to any IPv4 address.
    NameResolutionFailed,
    /// The resolver could not look the host up.
    HostLookupFailed,
    /// Any other failure, with a short description.
    OtherError(String),
}

impl ProbeStatus {
    /// Check if the port accepted the connection.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "LISTENING"),
            Self::Filtered => write!(f, "FILTERED"),
            Self::NotListening => write!(f, "NOT LISTENING"),
            Self::NameResolutionFailed => write!(f, "No IPv4 address for host"),
            Self::HostLookupFailed => write!(f, "Hostname could not be resolved"),
            Self::OtherError(detail) => write!(f, "{}", detail),
        }
    }
}

/// The result of probing one [`ProbeUnit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub request: String,
    pub address: String,
    pub port: String,
    pub status: ProbeStatus,
    pub metadata: Vec<String>,
}

impl Outcome {
    /// Consume a unit, attaching its status.
    pub fn new(unit: ProbeUnit, status: ProbeStatus) -> Self {
        Self {
            request: unit.request,
            address: unit.address,
            port: unit.port,
            status,
            metadata: unit.metadata,
        }
    }
}

/// Executes a single probe.
///
/// Implementations must never panic or fail: every path yields an
/// [`Outcome`] for the unit they were given, within roughly `timeout`.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one unit.
    async fn probe(&self, unit: ProbeUnit, timeout: Duration) -> Outcome;
}
