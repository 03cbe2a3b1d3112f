//! Scan engine.
//!
//! Expands requests into probe units, runs TCP connect probes with bounded
//! concurrency on the tokio runtime, and gathers one outcome per unit into
//! a [`ScanBatch`].

mod batch;
pub mod tcp;
pub mod traits;
pub mod work_list;

use crate::types::ProbeUnit;
use chrono::Utc;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, warn};

pub use batch::{BatchSummary, ScanBatch};
pub use tcp::{TcpConnectProber, DEFAULT_TIMEOUT};
pub use traits::{Outcome, ProbeStatus, Prober};
pub use work_list::{build, plan, Rejected, WorkPlan, DEFAULT_MAX_ADDRESSES};

/// Number of simultaneous probes used when the caller does not supply one.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Per-batch scan parameters.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of probes in flight at once (at least 1).
    pub concurrency: usize,
    /// Timeout applied to every probe in the batch.
    pub timeout: Duration,
    /// Draw a progress bar on stderr while probing.
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            show_progress: false,
        }
    }
}

impl ScanConfig {
    /// Create a configuration with the default concurrency and timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit, clamped to a usable semaphore size.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable the progress bar.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }
}

/// Runs a batch of probes under a concurrency limit.
///
/// Each coordinator owns its own configuration and prober; nothing is
/// shared between separate coordinators or separate runs.
pub struct Coordinator<P = TcpConnectProber> {
    prober: Arc<P>,
    config: ScanConfig,
}

impl Coordinator<TcpConnectProber> {
    /// Create a coordinator that probes with real TCP connects.
    pub fn new(config: ScanConfig) -> Self {
        Self::with_prober(TcpConnectProber::new(), config)
    }
}

impl<P: Prober + 'static> Coordinator<P> {
    /// Create a coordinator around any prober.
    pub fn with_prober(prober: P, config: ScanConfig) -> Self {
        Self {
            prober: Arc::new(prober),
            config,
        }
    }

    /// Probe every unit and wait for all of them.
    ///
    /// All units are submitted up front; at most `concurrency` probes run at
    /// a time. Returns only once every unit has an outcome, in submission
    /// order.
    pub async fn run(&self, units: Vec<ProbeUnit>) -> ScanBatch {
        let started_at = Utc::now();
        let start = Instant::now();
        let total = units.len();

        info!(
            units = total,
            concurrency = self.config.concurrency,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "starting scan"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let progress = self.progress_bar(total);

        // Only what is needed to report a task that died before producing
        // its own outcome; metadata goes with the unit into the task.
        let mut submitted = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);

        for unit in units {
            let semaphore = Arc::clone(&semaphore);
            let prober = Arc::clone(&self.prober);
            let progress = progress.clone();
            let timeout = self.config.timeout;
            submitted.push((unit.request.clone(), unit.address.clone(), unit.port.clone()));

            handles.push(tokio::spawn(async move {
                // Held until the probe finishes; the semaphore is never closed.
                let _permit = semaphore.acquire_owned().await.ok();

                let outcome = prober.probe(unit, timeout).await;

                if let Some(pb) = &progress {
                    pb.inc(1);
                    if outcome.status.is_open() {
                        pb.set_message(format!("open: {}:{}", outcome.address, outcome.port));
                    }
                }

                outcome
            }));
        }

        let joined = join_all(handles).await;

        let outcomes: Vec<Outcome> = submitted
            .into_iter()
            .zip(joined)
            .map(|((request, address, port), joined)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(%address, %port, error = %e, "probe task failed");
                    Outcome::new(
                        ProbeUnit::new(request, address, port, Vec::new()),
                        ProbeStatus::OtherError(format!("probe task failed: {}", e)),
                    )
                }
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_with_message("scan complete");
        }

        let batch = ScanBatch::new(started_at, outcomes, start.elapsed());
        info!(
            outcomes = batch.len(),
            duration_ms = batch.duration_ms,
            "scan complete"
        );
        batch
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    }
}
