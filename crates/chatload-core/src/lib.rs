//! Conversation-tracking load generator for streaming chat APIs.
//!
//! Provides:
//! - SSE block parsing and conversation-id extraction
//! - Per-virtual-user conversation state
//! - An HTTP client for `POST /chat-messages` with streamed responses
//! - Lock-free run counters and latency statistics
//! - A fixed-user runner and the end-of-run JSON summary

pub mod client;
pub mod metrics;
pub mod runner;
pub mod session;
pub mod streaming;
pub mod summary;

use std::time::Duration;

use async_trait::async_trait;

pub use client::{ClientConfig, HttpChatClient};
pub use metrics::{LatencyStats, MetricsSnapshot, RunMetrics};
pub use runner::{run, RunPlan, RunReport, UserReport};
pub use session::{build_request, ChatRequest, Outcome, QueryPool, UserStates, VirtualUserState};
pub use streaming::{extract_conversation_id, ChatResponseEvent, ConversationIdScan};
pub use summary::{write_summary, RunSummary};

/// Sends one chat request and buffers the streamed reply.
///
/// Implementations return `Ok` only for a `200 OK` response with a
/// non-empty body; everything else is a [`ChatError`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatExchange, ChatError>;
}

/// A completed, successful exchange.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    /// Full response body as received.
    pub body: String,
    /// Time from sending the request to the end of the stream.
    pub elapsed: Duration,
    /// Time from sending the request to the first body chunk.
    pub first_chunk: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("client error: {0}")]
    Client(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("empty response body")]
    EmptyBody,
}

impl ChatError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatError::Timeout)
    }
}

impl From<ChatError> for chatload_common::ChatloadError {
    fn from(err: ChatError) -> Self {
        chatload_common::ChatloadError::Chat(err.to_string())
    }
}
