//! Core TOML config loading: read from path or platform default.

use crate::schema::ChatloadConfig;
use chatload_common::ConfigError;
use std::path::Path;
use tracing::{debug, info};

use super::paths::default_config_path;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields. The
/// result is not validated here: environment and CLI overrides still apply
/// on top, so validation runs on the resolved config. Unlike the default-path
/// lookup, an explicit path that does not exist is an error.
pub fn load_from_path(path: &Path) -> Result<ChatloadConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ChatloadConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/chatload/config.toml`
/// On Linux: `~/.config/chatload/config.toml`
///
/// A missing file is not an error: built-in defaults are returned.
pub fn load_default() -> Result<ChatloadConfig, ConfigError> {
    let path = match default_config_path() {
        Ok(path) => path,
        Err(e) => {
            debug!("no config directory available ({e}), using defaults");
            return Ok(ChatloadConfig::default());
        }
    };

    if !path.exists() {
        debug!("no config found at {}, using defaults", path.display());
        return Ok(ChatloadConfig::default());
    }

    load_from_path(&path)
}
