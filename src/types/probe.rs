//! Scan requests and the probe units built from them.

use serde::{Deserialize, Serialize};

/// One validated input record: a target request, its ports, and any
/// passthrough fields the caller wants echoed into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Host, range ("A-B") or subnet ("A/N") as written by the user.
    pub request: String,
    /// Ports in the order given; validated only at probe time.
    pub ports: Vec<String>,
    /// Opaque passthrough fields.
    pub metadata: Vec<String>,
}

impl ScanRequest {
    /// Create a request without passthrough metadata.
    pub fn new<I, S>(request: impl Into<String>, ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            request: request.into(),
            ports: ports.into_iter().map(Into::into).collect(),
            metadata: Vec::new(),
        }
    }

    /// Attach passthrough metadata.
    pub fn with_metadata<I, S>(mut self, metadata: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata = metadata.into_iter().map(Into::into).collect();
        self
    }
}

/// One concrete connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeUnit {
    /// The original request string this unit was expanded from.
    pub request: String,
    /// Concrete host or IPv4 address to connect to.
    pub address: String,
    /// Port as supplied by the caller.
    pub port: String,
    pub metadata: Vec<String>,
}

impl ProbeUnit {
    pub fn new(
        request: impl Into<String>,
        address: impl Into<String>,
        port: impl Into<String>,
        metadata: Vec<String>,
    ) -> Self {
        Self {
            request: request.into(),
            address: address.into(),
            port: port.into(),
            metadata,
        }
    }
}
