use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the end-of-run summary goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub summary_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: PathBuf::from("summary.json"),
        }
    }
}
