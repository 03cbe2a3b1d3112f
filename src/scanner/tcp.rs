//! TCP connect probe executor.
//!
//! Performs standard TCP connect probes using the operating system's
//! socket API. Each probe owns exactly one IPv4 socket, which is closed on
//! every exit path before the outcome is returned.

use crate::scanner::traits::{Outcome, ProbeStatus, Prober};
use crate::types::{Port, ProbeUnit};
use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// Per-probe timeout used when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP connect prober.
///
/// Does not require elevated privileges. Hostnames are resolved through
/// the system resolver; IPv4 literals are used as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProber;

impl TcpConnectProber {
    /// Create a new TCP connect prober.
    pub fn new() -> Self {
        Self
    }

    /// Resolve the unit's address to an IPv4 endpoint before `deadline`.
    async fn resolve(
        &self,
        address: &str,
        port: Port,
        deadline: Instant,
    ) -> Result<SocketAddr, ProbeStatus> {
        if let Ok(ip) = address.parse::<Ipv4Addr>() {
            return Ok(SocketAddr::V4(SocketAddrV4::new(ip, port.as_u16())));
        }

        classify_lookup(address, deadline, lookup_host((address, port.as_u16()))).await
    }

    /// Open one socket and attempt to connect before `deadline`.
    async fn connect(&self, addr: SocketAddr, deadline: Instant) -> ProbeStatus {
        let socket = match TcpSocket::new_v4() {
            Ok(socket) => socket,
            Err(e) => return ProbeStatus::OtherError(format!("socket creation failed: {}", e)),
        };

        classify_connect(deadline, socket.connect(addr)).await
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, unit: ProbeUnit, timeout: Duration) -> Outcome {
        let deadline = deadline_after(timeout);

        let status = match unit.port.parse::<Port>() {
            Err(e) => ProbeStatus::OtherError(e.to_string()),
            Ok(port) => match self.resolve(&unit.address, port, deadline).await {
                Ok(addr) => self.connect(addr, deadline).await,
                Err(status) => status,
            },
        };

        debug!(
            address = %unit.address,
            port = %unit.port,
            status = %status,
            "probe finished"
        );
        Outcome::new(unit, status)
    }
}

/// Wait for a host lookup until `deadline` and pick the first IPv4 endpoint.
async fn classify_lookup<F, I>(
    address: &str,
    deadline: Instant,
    lookup: F,
) -> Result<SocketAddr, ProbeStatus>
where
    F: Future<Output = io::Result<I>>,
    I: Iterator<Item = SocketAddr>,
{
    match timeout_at(deadline, lookup).await {
        Ok(Ok(mut addrs)) => addrs
            .find(SocketAddr::is_ipv4)
            .ok_or(ProbeStatus::NameResolutionFailed),
        Ok(Err(e)) => {
            debug!(address, error = %e, "host lookup failed");
            Err(ProbeStatus::HostLookupFailed)
        }
        Err(_) => {
            debug!(address, "host lookup timed out");
            Err(ProbeStatus::HostLookupFailed)
        }
    }
}

/// Wait for a connect attempt until `deadline` and classify how it ended.
///
/// Whatever the result, the stream or the pending connect (and with it the
/// socket) is dropped before this returns.
async fn classify_connect<F>(deadline: Instant, connect: F) -> ProbeStatus
where
    F: Future<Output = io::Result<TcpStream>>,
{
    match timeout_at(deadline, connect).await {
        Ok(Ok(stream)) => {
            drop(stream);
            ProbeStatus::Open
        }
        Ok(Err(e)) => classify_io_error(&e),
        Err(_) => ProbeStatus::Filtered,
    }
}

/// Map a failed connect to a probe status.
pub fn classify_io_error(err: &io::Error) -> ProbeStatus {
    match err.kind() {
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
            ProbeStatus::NotListening
        }
        // Kernel-level SYN timeout that beat our own deadline.
        io::ErrorKind::TimedOut => ProbeStatus::Filtered,
        _ => ProbeStatus::OtherError(err.to_string()),
    }
}

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(86400 * 365 * 30))
}
