//! End-of-run JSON summary.

use std::path::Path;

use chatload_common::ChatloadError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::metrics::{LatencyStats, MetricsSnapshot};
use crate::runner::RunReport;

/// The artifact written when a run completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub app_id: String,
    pub target_url: String,
    pub users: usize,
    pub iterations: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub success_rate: f64,
    pub users_with_conversation: usize,
    pub latency: LatencyStats,
    pub first_chunk_latency: LatencyStats,
}

impl RunSummary {
    pub fn from_report(
        report: &RunReport,
        app_id: impl Into<String>,
        target_url: impl Into<String>,
    ) -> Self {
        Self {
            run_id: report.run_id.to_string(),
            app_id: app_id.into(),
            target_url: target_url.into(),
            users: report.users,
            iterations: report.iterations,
            started_at: report.started_at,
            finished_at: report.finished_at,
            elapsed_secs: report.elapsed.as_secs_f64(),
            metrics: report.metrics.clone(),
            success_rate: report.metrics.success_rate(),
            users_with_conversation: report.users_with_conversation,
            latency: report.latency.clone(),
            first_chunk_latency: report.first_chunk_latency.clone(),
        }
    }

    /// Human-readable lines for the terminal.
    pub fn to_text(&self) -> String {
        format!(
            "run {run}: {total} requests, {ok} ok, {failed} failed ({timeouts} timeouts), \
             success rate {rate:.1}%\n\
             conversations: {conv}/{users} users, {started} started, {without} exchanges without one\n\
             latency ms: avg={avg} p50={p50} p95={p95} p99={p99} max={max}\n\
             first chunk ms: avg={favg} p95={fp95}",
            run = self.run_id,
            total = self.metrics.total_requests,
            ok = self.metrics.successful_requests,
            failed = self.metrics.failed_requests,
            timeouts = self.metrics.timeouts,
            rate = self.success_rate * 100.0,
            conv = self.users_with_conversation,
            users = self.users,
            started = self.metrics.conversations_started,
            without = self.metrics.exchanges_without_conversation,
            avg = self.latency.avg_ms,
            p50 = self.latency.p50_ms,
            p95 = self.latency.p95_ms,
            p99 = self.latency.p99_ms,
            max = self.latency.max_ms,
            favg = self.first_chunk_latency.avg_ms,
            fp95 = self.first_chunk_latency.p95_ms,
        )
    }
}

/// Write `summary` as pretty JSON, creating parent directories.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), ChatloadError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    info!("wrote summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatload_common::RunId;
    use std::time::Duration;

    fn report() -> RunReport {
        let now = Utc::now();
        RunReport {
            run_id: RunId::new(),
            users: 2,
            iterations: 10,
            users_with_conversation: 2,
            metrics: MetricsSnapshot {
                total_requests: 10,
                successful_requests: 9,
                failed_requests: 1,
                timeouts: 1,
                conversations_started: 2,
                exchanges_without_conversation: 0,
                malformed_streams: 0,
            },
            latency: LatencyStats::from_samples(vec![10, 20, 30]),
            first_chunk_latency: LatencyStats::from_samples(vec![1, 2, 3]),
            started_at: now,
            finished_at: now,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn summary_flattens_counters() {
        let summary = RunSummary::from_report(&report(), "app", "http://x/chat-messages");
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["successful_requests"], 9);
        assert_eq!(json["failed_requests"], 1);
        assert_eq!(json["app_id"], "app");
        assert_eq!(json["latency"]["max_ms"], 30);
        assert!((summary.success_rate - 0.9).abs() < 1e-9);
        assert!((summary.elapsed_secs - 1.5).abs() < 1e-9);
    }

    #[test]
    fn write_summary_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("summary.json");
        let summary = RunSummary::from_report(&report(), "app", "http://x/chat-messages");

        write_summary(&path, &summary).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: RunSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.metrics.successful_requests, 9);
        assert_eq!(parsed.users, 2);
    }

    #[test]
    fn text_summary_mentions_counts() {
        let summary = RunSummary::from_report(&report(), "app", "http://x/chat-messages");
        let text = summary.to_text();
        assert!(text.contains("10 requests"));
        assert!(text.contains("9 ok"));
        assert!(text.contains("90.0%"));
    }
}
