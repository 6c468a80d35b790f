use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Virtual-user count, run length and pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Number of concurrent virtual users.
    pub users: u32,
    /// Run length in seconds. 0 means bounded by `iterations` only.
    pub duration_secs: u64,
    /// Iterations per user. 0 means bounded by `duration_secs` only.
    pub iterations: u64,
    /// Users start evenly spread over this many seconds.
    pub ramp_up_secs: u64,
    /// Per-request timeout covering the whole streamed response.
    pub request_timeout_secs: u64,
    /// TCP/TLS connect timeout.
    pub connect_timeout_secs: u64,
    /// Lower bound of the randomized pause after each iteration.
    pub pause_min_secs: f64,
    /// Upper bound of the randomized pause after each iteration.
    pub pause_max_secs: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            users: 10,
            duration_secs: 60,
            iterations: 0,
            ramp_up_secs: 0,
            request_timeout_secs: 60,
            connect_timeout_secs: 10,
            pause_min_secs: 1.0,
            pause_max_secs: 3.0,
        }
    }
}

impl LoadConfig {
    pub fn duration(&self) -> Option<Duration> {
        (self.duration_secs > 0).then(|| Duration::from_secs(self.duration_secs))
    }

    pub fn iterations(&self) -> Option<u64> {
        (self.iterations > 0).then_some(self.iterations)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn ramp_up(&self) -> Duration {
        Duration::from_secs(self.ramp_up_secs)
    }
}
