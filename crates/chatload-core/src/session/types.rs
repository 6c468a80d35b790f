//! Virtual-user state and exchange outcomes.

use serde::Serialize;
use tracing::{debug, warn};

use crate::streaming::{extract_conversation_id, ConversationIdScan};

/// Conversation state of one simulated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualUserState {
    user_id: String,
    conversation_id: Option<String>,
}

/// What a recorded exchange did to the user's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The exchange failed; state untouched.
    Failed,
    /// First successful exchange carrying an id; the id is now stored.
    Established(String),
    /// The user already had an id; the body was not inspected.
    Continued,
    /// Successful exchange but no usable id in the body.
    NoConversation(ConversationIdScan),
}

impl VirtualUserState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            conversation_id: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn has_conversation(&self) -> bool {
        self.conversation_id.is_some()
    }

    /// Record the result of one exchange.
    ///
    /// Extraction runs only for a successful exchange by a user that has no
    /// conversation yet. A stored id is never replaced.
    pub fn record_outcome(&mut self, response_body: &str, success: bool) -> Outcome {
        if !success {
            return Outcome::Failed;
        }
        if self.conversation_id.is_some() {
            return Outcome::Continued;
        }

        match extract_conversation_id(response_body) {
            ConversationIdScan::Found(id) => {
                debug!(user = %self.user_id, conversation = %id, "conversation established");
                self.conversation_id = Some(id.clone());
                Outcome::Established(id)
            }
            ConversationIdScan::Malformed { skipped } => {
                warn!(
                    user = %self.user_id,
                    skipped,
                    "response stream had only malformed data blocks; continuing without a conversation"
                );
                Outcome::NoConversation(ConversationIdScan::Malformed { skipped })
            }
            ConversationIdScan::NotPresent => {
                debug!(user = %self.user_id, "no conversation id in response");
                Outcome::NoConversation(ConversationIdScan::NotPresent)
            }
        }
    }

    /// Take over the conversation of `other` if this state has none.
    ///
    /// Used when a state comes back from a user task. Returns whether the
    /// id was adopted.
    pub(crate) fn adopt(&mut self, other: VirtualUserState) -> bool {
        if self.conversation_id.is_some() || other.user_id != self.user_id {
            return false;
        }
        self.conversation_id = other.conversation_id;
        self.conversation_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY_42: &str = "data: {\"conversation_id\":\"conv-42\"}\n\n";

    #[test]
    fn new_state_has_no_conversation() {
        let state = VirtualUserState::new("u1");
        assert_eq!(state.user_id(), "u1");
        assert!(!state.has_conversation());
    }

    #[test]
    fn success_with_id_establishes_conversation() {
        let mut state = VirtualUserState::new("u1");
        let outcome = state.record_outcome(BODY_42, true);
        assert_eq!(outcome, Outcome::Established("conv-42".into()));
        assert_eq!(state.conversation_id(), Some("conv-42"));
    }

    #[test]
    fn failure_leaves_state_untouched() {
        let mut state = VirtualUserState::new("u1");
        let outcome = state.record_outcome(BODY_42, false);
        assert_eq!(outcome, Outcome::Failed);
        assert!(!state.has_conversation());
    }

    #[test]
    fn stored_id_is_never_overwritten() {
        let mut state = VirtualUserState::new("u1");
        state.record_outcome(BODY_42, true);

        let other = "data: {\"conversation_id\":\"conv-99\"}\n\n";
        let outcome = state.record_outcome(other, true);
        assert_eq!(outcome, Outcome::Continued);
        assert_eq!(state.conversation_id(), Some("conv-42"));
    }

    #[test]
    fn continued_does_not_inspect_body() {
        let mut state = VirtualUserState::new("u1");
        state.record_outcome(BODY_42, true);
        // A body that would report Malformed if scanned.
        let outcome = state.record_outcome("data: {broken\n\n", true);
        assert_eq!(outcome, Outcome::Continued);
    }

    #[test]
    fn missing_id_keeps_user_without_conversation() {
        let mut state = VirtualUserState::new("u1");
        let outcome = state.record_outcome("data: {\"event\":\"ping\"}\n\n", true);
        assert_eq!(
            outcome,
            Outcome::NoConversation(ConversationIdScan::NotPresent)
        );
        assert!(!state.has_conversation());

        // A later exchange can still establish one.
        assert_eq!(
            state.record_outcome(BODY_42, true),
            Outcome::Established("conv-42".into())
        );
    }

    #[test]
    fn malformed_stream_is_reported() {
        let mut state = VirtualUserState::new("u1");
        let outcome = state.record_outcome("data: nope\n\n", true);
        assert_eq!(
            outcome,
            Outcome::NoConversation(ConversationIdScan::Malformed { skipped: 1 })
        );
    }

    #[test]
    fn adopt_respects_existing_id_and_user() {
        let mut fresh = VirtualUserState::new("u1");
        let mut returned = VirtualUserState::new("u1");
        returned.record_outcome(BODY_42, true);
        assert!(fresh.adopt(returned.clone()));
        assert_eq!(fresh.conversation_id(), Some("conv-42"));

        let mut other_user = VirtualUserState::new("u2");
        assert!(!other_user.adopt(returned));
        assert!(!other_user.has_conversation());
    }
}
