//! Per-virtual-user conversation tracking.
//!
//! A `VirtualUserState` remembers the conversation id the server assigned
//! to one simulated user. States are owned by whoever drives the user (the
//! runner moves each one into its task), so no state is shared between
//! users.

mod manager;
mod request;
mod types;

pub use manager::UserStates;
pub use request::{build_request, ChatRequest, QueryPool, RESPONSE_MODE_STREAMING};
pub use types::{Outcome, VirtualUserState};
