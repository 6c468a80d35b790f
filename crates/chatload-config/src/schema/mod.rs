//! Config schema: the root `ChatloadConfig` and its sections.
//!
//! Every section derives `Default` and uses `#[serde(default)]`, so a
//! config file only needs the keys it wants to change.

mod load;
mod output;
mod queries;
mod target;

pub use load::LoadConfig;
pub use output::OutputConfig;
pub use queries::{QueryConfig, DEFAULT_QUERIES};
pub use target::TargetConfig;

use serde::{Deserialize, Serialize};

/// Root configuration for a load-test run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatloadConfig {
    pub target: TargetConfig,
    pub load: LoadConfig,
    pub queries: QueryConfig,
    pub output: OutputConfig,
}
