//! Chat request construction.

use chatload_common::ChatloadError;
use rand::Rng;

use super::types::VirtualUserState;

pub const RESPONSE_MODE_STREAMING: &str = "streaming";

/// One request to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub query: String,
    pub conversation_id: Option<String>,
    pub user: String,
}

impl ChatRequest {
    /// JSON body for `POST /chat-messages`.
    ///
    /// An absent conversation id is sent as `""`, which the server treats
    /// as "start a new conversation".
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "inputs": {},
            "query": self.query,
            "response_mode": RESPONSE_MODE_STREAMING,
            "conversation_id": self.conversation_id.as_deref().unwrap_or(""),
            "user": self.user,
        })
    }
}

/// Fixed, non-empty pool of queries.
#[derive(Debug, Clone)]
pub struct QueryPool {
    queries: Vec<String>,
}

impl QueryPool {
    pub fn new(queries: Vec<String>) -> Result<Self, ChatloadError> {
        if queries.is_empty() {
            return Err(ChatloadError::Other("query pool is empty".into()));
        }
        Ok(Self { queries })
    }

    /// Pick one query uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let idx = rng.gen_range(0..self.queries.len());
        &self.queries[idx]
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Build the next request for `state`, carrying its conversation id if any.
pub fn build_request<R: Rng + ?Sized>(
    state: &VirtualUserState,
    pool: &QueryPool,
    rng: &mut R,
) -> ChatRequest {
    ChatRequest {
        query: pool.pick(rng).to_string(),
        conversation_id: state.conversation_id().map(str::to_string),
        user: state.user_id().to_string(),
    }
}
