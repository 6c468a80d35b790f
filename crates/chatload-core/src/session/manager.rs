//! Registry of virtual-user states, owned by the driving harness.

use std::collections::HashMap;

use super::types::VirtualUserState;

/// All virtual-user states of a run, keyed by user id.
///
/// Entries are created lazily and never removed. The runner hands each
/// user task its own copy via [`UserStates::checkout`] and merges it back
/// with [`UserStates::check_in`] when the task finishes.
#[derive(Debug, Default)]
pub struct UserStates {
    states: HashMap<String, VirtualUserState>,
}

impl UserStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing state for `user_id`, or a fresh one without a conversation.
    pub fn get_or_create(&mut self, user_id: &str) -> &mut VirtualUserState {
        self.states
            .entry(user_id.to_string())
            .or_insert_with(|| VirtualUserState::new(user_id))
    }

    pub fn get(&self, user_id: &str) -> Option<&VirtualUserState> {
        self.states.get(user_id)
    }

    /// Owned copy of the state for `user_id`, creating it if needed.
    pub fn checkout(&mut self, user_id: &str) -> VirtualUserState {
        self.get_or_create(user_id).clone()
    }

    /// Merge a state returned by a user task.
    ///
    /// A conversation id already stored in the registry wins.
    pub fn check_in(&mut self, state: VirtualUserState) {
        let user_id = state.user_id().to_string();
        self.get_or_create(&user_id).adopt(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of users that hold a conversation id.
    pub fn with_conversation(&self) -> usize {
        self.states.values().filter(|s| s.has_conversation()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VirtualUserState> {
        self.states.values()
    }
}
