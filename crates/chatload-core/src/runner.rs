//! Fixed-user runner.
//!
//! Spawns one tokio task per virtual user. Each task owns its
//! `VirtualUserState`, loops request → record → pause, and hands the state
//! back when it stops. Users stop when the run deadline passes, when they
//! reach their iteration budget, or when the stop signal flips to `true`.
//! An in-flight request is never cancelled; it is bounded by the client
//! timeout and recorded before the user checks whether to stop.

use std::sync::Arc;
use std::time::Duration;

use chatload_common::{virtual_user_id, RunId};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::metrics::{LatencyStats, MetricsSnapshot, RunMetrics};
use crate::session::{build_request, QueryPool, UserStates, VirtualUserState};
use crate::ChatTransport;

/// What to run: how many users, for how long, and how they pace.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub run_id: RunId,
    pub app_id: String,
    pub users: usize,
    /// Stop starting new iterations after this long.
    pub duration: Option<Duration>,
    /// Per-user iteration budget.
    pub iterations: Option<u64>,
    /// User `i` starts `i * ramp_up / users` after the run begins.
    pub ramp_up: Duration,
    pub pause_min: Duration,
    pub pause_max: Duration,
}

impl RunPlan {
    pub fn new(app_id: impl Into<String>, users: usize) -> Self {
        Self {
            run_id: RunId::new(),
            app_id: app_id.into(),
            users,
            duration: Some(Duration::from_secs(60)),
            iterations: None,
            ramp_up: Duration::ZERO,
            pause_min: Duration::from_secs(1),
            pause_max: Duration::from_secs(3),
        }
    }

    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_iterations(mut self, iterations: Option<u64>) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_ramp_up(mut self, ramp_up: Duration) -> Self {
        self.ramp_up = ramp_up;
        self
    }

    pub fn with_pause(mut self, min: Duration, max: Duration) -> Self {
        self.pause_min = min;
        self.pause_max = max.max(min);
        self
    }

    /// User id for the 1-based user `index`.
    pub fn user_id(&self, index: usize) -> String {
        virtual_user_id(&self.app_id, &self.run_id, index)
    }

    /// Start delay for the 0-based user `slot`.
    pub fn start_delay(&self, slot: usize) -> Duration {
        if self.users == 0 || self.ramp_up.is_zero() {
            return Duration::ZERO;
        }
        self.ramp_up.mul_f64(slot as f64 / self.users as f64)
    }

    /// Random think time in `[pause_min, pause_max]`.
    pub fn pause<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.pause_max <= self.pause_min {
            return self.pause_min;
        }
        let secs = rng.gen_range(self.pause_min.as_secs_f64()..=self.pause_max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// What one user task did.
#[derive(Debug, Clone)]
pub struct UserReport {
    pub state: VirtualUserState,
    pub iterations: u64,
    pub latencies_ms: Vec<u64>,
    pub first_chunk_ms: Vec<u64>,
}

impl UserReport {
    fn new(state: VirtualUserState) -> Self {
        Self {
            state,
            iterations: 0,
            latencies_ms: Vec::new(),
            first_chunk_ms: Vec::new(),
        }
    }
}

/// Aggregated result of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub users: usize,
    pub iterations: u64,
    pub users_with_conversation: usize,
    pub metrics: MetricsSnapshot,
    pub latency: LatencyStats,
    pub first_chunk_latency: LatencyStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// Drive `plan.users` virtual users against `transport` until the plan is
/// exhausted or `stop` becomes `true`.
///
/// States are checked out of `states` before the users start and checked
/// back in as they finish, so the caller keeps every user's conversation.
pub async fn run(
    transport: Arc<dyn ChatTransport>,
    pool: Arc<QueryPool>,
    plan: RunPlan,
    states: &mut UserStates,
    stop: watch::Receiver<bool>,
) -> RunReport {
    let started_at = Utc::now();
    let started = Instant::now();
    let deadline = plan.duration.map(|d| started + d);
    let metrics = Arc::new(RunMetrics::new());
    let plan = Arc::new(plan);

    info!(
        run = %plan.run_id,
        users = plan.users,
        duration = ?plan.duration,
        iterations = ?plan.iterations,
        "starting run"
    );

    let mut handles = Vec::with_capacity(plan.users);
    for slot in 0..plan.users {
        let state = states.checkout(&plan.user_id(slot + 1));
        let worker = UserWorker {
            transport: transport.clone(),
            pool: pool.clone(),
            plan: plan.clone(),
            metrics: metrics.clone(),
            stop: stop.clone(),
            deadline,
        };
        handles.push(tokio::spawn(worker.run(slot, state)));
    }

    let mut iterations = 0;
    let mut latencies = Vec::new();
    let mut first_chunks = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(report) => {
                iterations += report.iterations;
                latencies.extend(report.latencies_ms);
                first_chunks.extend(report.first_chunk_ms);
                states.check_in(report.state);
            }
            Err(e) => error!(error = %e, "virtual user task failed"),
        }
    }

    let snapshot = metrics.snapshot();
    info!(
        run = %plan.run_id,
        total = snapshot.total_requests,
        ok = snapshot.successful_requests,
        failed = snapshot.failed_requests,
        "run finished"
    );

    RunReport {
        run_id: plan.run_id.clone(),
        users: plan.users,
        iterations,
        users_with_conversation: states.with_conversation(),
        metrics: snapshot,
        latency: LatencyStats::from_samples(latencies),
        first_chunk_latency: LatencyStats::from_samples(first_chunks),
        started_at,
        finished_at: Utc::now(),
        elapsed: started.elapsed(),
    }
}

/// Everything one user task needs besides its own state.
struct UserWorker {
    transport: Arc<dyn ChatTransport>,
    pool: Arc<QueryPool>,
    plan: Arc<RunPlan>,
    metrics: Arc<RunMetrics>,
    stop: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

impl UserWorker {
    async fn run(mut self, slot: usize, state: VirtualUserState) -> UserReport {
        let mut report = UserReport::new(state);
        let mut rng = StdRng::from_entropy();

        let delay = self.plan.start_delay(slot);
        if !delay.is_zero() && self.pause(delay).await {
            return report;
        }

        while !self.should_stop(report.iterations) {
            self.iterate(&mut report, &mut rng).await;

            if self.should_stop(report.iterations) {
                break;
            }
            let think = self.plan.pause(&mut rng);
            if self.pause(think).await {
                break;
            }
        }

        debug!(
            user = %report.state.user_id(),
            iterations = report.iterations,
            conversation = report.state.conversation_id().unwrap_or(""),
            "virtual user done"
        );
        report
    }

    /// One request/record cycle.
    async fn iterate(&self, report: &mut UserReport, rng: &mut StdRng) {
        let request = build_request(&report.state, &self.pool, rng);

        let outcome = match self.transport.send(&request).await {
            Ok(exchange) => {
                report.latencies_ms.push(exchange.elapsed.as_millis() as u64);
                if let Some(first) = exchange.first_chunk {
                    report.first_chunk_ms.push(first.as_millis() as u64);
                }
                report.state.record_outcome(&exchange.body, true)
            }
            Err(e) => {
                if e.is_timeout() {
                    self.metrics.record_timeout();
                }
                warn!(user = %request.user, error = %e, "chat exchange failed");
                report.state.record_outcome("", false)
            }
        };

        self.metrics.record(&outcome);
        report.iterations += 1;
    }

    fn should_stop(&self, iterations: u64) -> bool {
        *self.stop.borrow()
            || self.deadline.is_some_and(|d| Instant::now() >= d)
            || self.plan.iterations.is_some_and(|max| iterations >= max)
    }

    /// Sleep for `duration` (cut short by the deadline or the stop signal).
    /// Returns whether the user should stop.
    async fn pause(&mut self, duration: Duration) -> bool {
        let mut wake = Instant::now() + duration;
        if let Some(deadline) = self.deadline {
            wake = wake.min(deadline);
        }

        tokio::select! {
            _ = tokio::time::sleep_until(wake) => {}
            Ok(()) = self.stop.changed() => {}
        }

        *self.stop.borrow()
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
