//! Port validation.
//!
//! Ports travel through the work list as the strings the caller supplied
//! and are only converted to a [`Port`] when a probe is about to connect.
//! A bad port therefore fails its own probe and nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated TCP port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(String),
    #[error("invalid port number '{0}'")]
    InvalidFormat(String),
}

impl FromStr for Port {
    type Err = PortError;

    /// Parses a decimal port, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PortError::InvalidFormat(s.to_string()));
        }

        // All digits, so the only parse failure left is overflow.
        let value: u16 = trimmed
            .parse()
            .map_err(|_| PortError::OutOfRange(trimmed.to_string()))?;
        Self::new(value).ok_or_else(|| PortError::OutOfRange(trimmed.to_string()))
    }
}
