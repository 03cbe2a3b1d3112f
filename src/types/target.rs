//! Target specification types and address expansion.
//!
//! A request string is classified by pattern:
//! - Dash range: "192.168.1.1-192.168.1.20" (both endpoints included)
//! - CIDR subnet: "10.0.0.0/24" (network through broadcast address)
//! - Anything else: a hostname or IP passed through unexpanded
//!
//! The dash check runs before the slash check, so a request such as
//! "10.0.0.1-10.0.0.9/24" is treated as a (malformed) range.

use crate::error::{ExpandError, ExpandResult};
use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// The shape of a single target request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// A hostname or IP literal, resolved later by the socket layer.
    SingleHost(String),
    /// An inclusive range of IPv4 addresses.
    IpRange { start: Ipv4Addr, end: Ipv4Addr },
    /// A CIDR block, including its network and broadcast addresses.
    Subnet(Ipv4Network),
}

impl TargetSpec {
    /// Classify and parse a request string.
    pub fn parse(s: &str) -> ExpandResult<Self> {
        if has_digit_pair(s, '-') {
            return Self::parse_range(s);
        }

        if has_digit_pair(s, '/') {
            let network = Ipv4Network::from_str(s)
                .map_err(|_| ExpandError::InvalidCidr(s.to_string()))?;
            return Ok(Self::Subnet(network));
        }

        Ok(Self::SingleHost(s.to_string()))
    }

    fn parse_range(s: &str) -> ExpandResult<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ExpandError::InvalidAddress(s.to_string()))?;

        let start = parse_ipv4(start)?;
        let end = parse_ipv4(end)?;

        if start > end {
            return Err(ExpandError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self::IpRange { start, end })
    }

    /// Lazily produce every address this target covers, in ascending order.
    pub fn addresses(&self) -> Expansion {
        match self {
            Self::SingleHost(host) => Expansion::Host(Some(host.clone())),
            Self::IpRange { start, end } => Expansion::Span(AddressSpan::inclusive(*start, *end)),
            Self::Subnet(network) => Expansion::Span(AddressSpan::inclusive(
                network.network(),
                network.broadcast(),
            )),
        }
    }

    /// Number of addresses this target expands to.
    pub fn address_count(&self) -> u64 {
        self.addresses().address_count()
    }
}

impl FromStr for TargetSpec {
    type Err = ExpandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleHost(host) => write!(f, "{}", host),
            Self::IpRange { start, end } => write!(f, "{}-{}", start, end),
            Self::Subnet(network) => write!(f, "{}", network),
        }
    }
}

/// Expand a request string into its address strings.
///
/// The returned iterator is finite and can be restarted by cloning it
/// before consumption.
pub fn expand(spec: &str) -> ExpandResult<Expansion> {
    Ok(TargetSpec::parse(spec)?.addresses())
}

/// An ascending walk over a contiguous block of IPv4 addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpan {
    next: u64,
    // Exclusive; u64 so that 255.255.255.255 can be the last address.
    end: u64,
}

impl AddressSpan {
    /// A span covering `start..=end`.
    pub fn inclusive(start: Ipv4Addr, end: Ipv4Addr) -> Self {
        Self {
            next: u64::from(u32::from(start)),
            end: u64::from(u32::from(end)) + 1,
        }
    }

    /// Addresses not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }
}

impl Iterator for AddressSpan {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let addr = Ipv4Addr::from(self.next as u32);
        self.next += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// The address sequence produced by [`expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// A single unexpanded host string.
    Host(Option<String>),
    /// A numeric address block.
    Span(AddressSpan),
}

impl Expansion {
    /// Number of addresses left in the sequence.
    pub fn address_count(&self) -> u64 {
        match self {
            Self::Host(host) => u64::from(host.is_some()),
            Self::Span(span) => span.remaining(),
        }
    }
}

impl Iterator for Expansion {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Host(host) => host.take(),
            Self::Span(span) => span.next().map(|addr| addr.to_string()),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Host(host) => {
                let n = usize::from(host.is_some());
                (n, Some(n))
            }
            Self::Span(span) => span.size_hint(),
        }
    }
}

fn parse_ipv4(s: &str) -> ExpandResult<Ipv4Addr> {
    s.parse()
        .map_err(|_| ExpandError::InvalidAddress(s.to_string()))
}

/// True when `sep` appears directly between two ASCII digits.
fn has_digit_pair(s: &str, sep: char) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars
        .windows(3)
        .any(|w| w[1] == sep && w[0].is_ascii_digit() && w[2].is_ascii_digit())
}
