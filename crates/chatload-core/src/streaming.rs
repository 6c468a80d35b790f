//! Server-Sent Events (SSE) block parsing for chat responses.
//!
//! The chat endpoint streams blank-line-delimited blocks. Blocks that start
//! with a `data:` marker carry a JSON payload; the first payload with a
//! non-empty `conversation_id` ties later requests to the same dialogue.
//!
//! Extraction works on the fully buffered body: the client reads the whole
//! stream (see [`crate::client`]) before the tracker looks at it.

use serde::Deserialize;

const DATA_MARKER: &str = "data:";

/// One parsed `data:` payload.
///
/// Only the fields the tracker cares about are modelled; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponseEvent {
    /// Event name (`message`, `message_end`, `error`, ...).
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

impl ChatResponseEvent {
    /// The conversation id exactly as sent, if present and not blank.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// Result of scanning a body for a conversation id.
///
/// `NotPresent` and `Malformed` lead to the same behavior (the user keeps
/// going without a conversation) but are reported separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationIdScan {
    /// First non-empty `conversation_id` found in a data block.
    Found(String),
    /// Every data block parsed, none carried an id (or there were none).
    NotPresent,
    /// No id found and `skipped` data blocks failed to parse.
    Malformed { skipped: usize },
}

impl ConversationIdScan {
    pub fn into_id(self) -> Option<String> {
        match self {
            ConversationIdScan::Found(id) => Some(id),
            _ => None,
        }
    }
}

/// Split a body into blank-line-delimited blocks.
///
/// CRLF line endings are normalized first. Empty blocks are dropped.
pub fn split_blocks(body: &str) -> Vec<String> {
    body.replace("\r\n", "\n")
        .split("\n\n")
        .map(|block| block.trim_matches('\n').to_string())
        .filter(|block| !block.trim().is_empty())
        .collect()
}

/// Payload of a block that starts with the `data:` marker.
pub fn data_payload(block: &str) -> Option<&str> {
    block
        .trim_start()
        .strip_prefix(DATA_MARKER)
        .map(str::trim)
}

/// Parse one `data:` payload.
pub fn parse_event(payload: &str) -> Result<ChatResponseEvent, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Parse every `data:` block in `body`, keeping per-block parse results.
pub fn parse_events(body: &str) -> Vec<Result<ChatResponseEvent, serde_json::Error>> {
    split_blocks(body)
        .iter()
        .filter_map(|block| data_payload(block))
        .map(parse_event)
        .collect()
}

/// Scan a response body for the first non-empty conversation id.
///
/// Blocks that fail to parse are skipped and the scan continues.
pub fn extract_conversation_id(body: &str) -> ConversationIdScan {
    let mut skipped = 0;

    for parsed in parse_events(body) {
        match parsed {
            Ok(event) => {
                if let Some(id) = event.conversation_id() {
                    return ConversationIdScan::Found(id.to_string());
                }
            }
            Err(e) => {
                tracing::trace!(error = %e, "skipping malformed data block");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        ConversationIdScan::Malformed { skipped }
    } else {
        ConversationIdScan::NotPresent
    }
}
