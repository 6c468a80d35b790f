use serde::{Deserialize, Serialize};
use std::fmt;

/// Short hex tag identifying one load-test run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    pub fn new() -> Self {
        Self(new_run_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn new_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// User identifier sent in the `user` field of every request.
///
/// Scoped by app and run so that repeated runs never share server-side
/// conversation lists.
pub fn virtual_user_id(app_id: &str, run: &RunId, index: usize) -> String {
    format!("loadtest-{app_id}-{run}-vu{index}")
}
