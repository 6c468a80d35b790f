//! Run-wide counters and latency statistics.
//!
//! Counters are plain atomics incremented once per outcome, so user tasks
//! share one `RunMetrics` behind an `Arc` without locking. Latency samples
//! are kept per user and merged after the run.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::session::Outcome;
use crate::streaming::ConversationIdScan;

/// Shared, lock-free run counters.
#[derive(Debug, Default)]
pub struct RunMetrics {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    timeouts: AtomicU64,
    conversations_started: AtomicU64,
    exchanges_without_conversation: AtomicU64,
    malformed_streams: AtomicU64,
}

/// Point-in-time copy of [`RunMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub timeouts: u64,
    pub conversations_started: u64,
    /// Successful exchanges by users without a conversation whose body
    /// carried no usable id.
    pub exchanges_without_conversation: u64,
    /// Subset of the above where every data block was malformed.
    pub malformed_streams: u64,
}

impl MetricsSnapshot {
    /// Fraction of requests that succeeded, 0.0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64
        }
    }
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one exchange.
    pub fn record(&self, outcome: &Outcome) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        match outcome {
            Outcome::Failed => {
                self.failed_requests.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Established(_) => {
                self.successful_requests.fetch_add(1, Ordering::Relaxed);
                self.conversations_started.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Continued => {
                self.successful_requests.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::NoConversation(scan) => {
                self.successful_requests.fetch_add(1, Ordering::Relaxed);
                self.exchanges_without_conversation
                    .fetch_add(1, Ordering::Relaxed);
                if matches!(scan, ConversationIdScan::Malformed { .. }) {
                    self.malformed_streams.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Count a timed-out exchange. Call in addition to [`RunMetrics::record`].
    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            conversations_started: self.conversations_started.load(Ordering::Relaxed),
            exchanges_without_conversation: self
                .exchanges_without_conversation
                .load(Ordering::Relaxed),
            malformed_streams: self.malformed_streams.load(Ordering::Relaxed),
        }
    }
}

/// Latency statistics for one measurement, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub count: usize,
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: u64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
}

impl LatencyStats {
    pub fn from_samples(mut samples: Vec<u64>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        samples.sort_unstable();

        let count = samples.len();
        let sum: u64 = samples.iter().sum();
        Self {
            count,
            min_ms: samples[0],
            max_ms: samples[count - 1],
            avg_ms: sum / count as u64,
            p50_ms: percentile(&samples, 0.50),
            p95_ms: percentile(&samples, 0.95),
            p99_ms: percentile(&samples, 0.99),
        }
    }
}

fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
