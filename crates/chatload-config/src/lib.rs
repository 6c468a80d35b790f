//! chatload configuration.
//!
//! TOML file with serde defaults, `CHATLOAD_*` environment overrides and
//! validation. Resolution order, lowest to highest priority: built-in
//! defaults, config file, environment, CLI flags (applied by the binary).

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ChatloadConfig, LoadConfig, OutputConfig, QueryConfig, TargetConfig,
};

use chatload_common::ConfigError;
use std::path::Path;

/// Load config from `path` (or the platform default when `None`) and apply
/// environment overrides.
///
/// The result is not yet validated; call [`finalize`] after applying any
/// further overrides.
pub fn load_config(path: Option<&Path>) -> Result<ChatloadConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    env::apply_process_env(&mut config)?;
    Ok(config)
}

/// Validate a fully resolved config and require credentials.
pub fn finalize(config: ChatloadConfig) -> Result<ChatloadConfig, ConfigError> {
    validation::validate(&config)?;
    config.target.require_credentials()?;
    Ok(config)
}

/// Serialize a config to pretty JSON with the token redacted.
pub fn config_to_json(config: &ChatloadConfig) -> String {
    let mut redacted = config.clone();
    if !redacted.target.api_token.is_empty() {
        redacted.target.api_token = "[REDACTED]".into();
    }
    serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
