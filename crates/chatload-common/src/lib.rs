pub mod errors;
pub mod id;

pub use errors::{ChatloadError, ConfigError};
pub use id::{virtual_user_id, RunId};

pub type Result<T> = std::result::Result<T, ChatloadError>;
