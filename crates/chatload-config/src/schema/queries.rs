use serde::{Deserialize, Serialize};

/// Queries used when no pool is configured.
pub const DEFAULT_QUERIES: &[&str] = &[
    "Hello, what can you help me with?",
    "Summarize the main features of your service.",
    "Can you explain that in simpler terms?",
    "What are the next steps?",
    "Give me a short example.",
    "Thanks! Anything else I should know?",
];

/// Fixed pool of user messages; one is picked at random per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub pool: Vec<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            pool: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
        }
    }
}
