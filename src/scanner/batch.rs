//! The frozen result of one scan invocation.

use crate::scanner::traits::{Outcome, ProbeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Every outcome of one coordinator run, one per submitted unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanBatch {
    /// When the first probe was submitted.
    pub started_at: DateTime<Utc>,
    /// When the last probe finished.
    pub completed_at: DateTime<Utc>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Outcomes in submission order.
    pub outcomes: Vec<Outcome>,
}

impl ScanBatch {
    pub(crate) fn new(started_at: DateTime<Utc>, outcomes: Vec<Outcome>, elapsed: Duration) -> Self {
        Self {
            started_at,
            completed_at: Utc::now(),
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            outcomes,
        }
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if the batch holds no outcomes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over the outcomes.
    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }

    /// Width of the passthrough metadata, taken from the widest outcome.
    pub fn metadata_width(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.metadata.len())
            .max()
            .unwrap_or(0)
    }

    /// Tally outcomes by status.
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.outcomes.len(),
            ..BatchSummary::default()
        };

        for outcome in &self.outcomes {
            match outcome.status {
                ProbeStatus::Open => summary.open += 1,
                ProbeStatus::NotListening => summary.not_listening += 1,
                ProbeStatus::Filtered => summary.filtered += 1,
                ProbeStatus::NameResolutionFailed | ProbeStatus::HostLookupFailed => {
                    summary.unresolved += 1
                }
                ProbeStatus::OtherError(_) => summary.errors += 1,
            }
        }

        summary
    }
}

impl<'a> IntoIterator for &'a ScanBatch {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// Per-status counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub open: usize,
    pub not_listening: usize,
    pub filtered: usize,
    pub unresolved: usize,
    pub errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProbeUnit;

    fn outcome(port: &str, status: ProbeStatus, metadata: Vec<String>) -> Outcome {
        Outcome::new(ProbeUnit::new("h", "h", port, metadata), status)
    }

    #[test]
    fn test_summary_counts() {
        let batch = ScanBatch::new(
            Utc::now(),
            vec![
                outcome("1", ProbeStatus::Open, vec![]),
                outcome("2", ProbeStatus::Open, vec![]),
                outcome("3", ProbeStatus::NotListening, vec![]),
                outcome("4", ProbeStatus::Filtered, vec![]),
                outcome("5", ProbeStatus::HostLookupFailed, vec![]),
                outcome("6", ProbeStatus::NameResolutionFailed, vec![]),
                outcome("x", ProbeStatus::OtherError("bad".into()), vec![]),
            ],
            Duration::from_millis(1500),
        );

        let summary = batch.summary();
        assert_eq!(summary.total, 7);
        assert_eq!(summary.open, 2);
        assert_eq!(summary.not_listening, 1);
        assert_eq!(summary.filtered, 1);
        assert_eq!(summary.unresolved, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(batch.duration_ms, 1500);
        assert!(batch.completed_at >= batch.started_at);
    }

    #[test]
    fn test_metadata_width() {
        let empty = ScanBatch::new(Utc::now(), vec![], Duration::ZERO);
        assert_eq!(empty.metadata_width(), 0);
        assert!(empty.is_empty());

        let batch = ScanBatch::new(
            Utc::now(),
            vec![outcome("80", ProbeStatus::Open, vec!["a".into(), "b".into()])],
            Duration::ZERO,
        );
        assert_eq!(batch.metadata_width(), 2);
        assert_eq!(batch.len(), 1);
    }
}
