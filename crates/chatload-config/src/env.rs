//! `CHATLOAD_*` environment variable overrides.

use chatload_common::ConfigError;

use crate::schema::ChatloadConfig;

pub const ENV_BASE_URL: &str = "CHATLOAD_BASE_URL";
pub const ENV_APP_ID: &str = "CHATLOAD_APP_ID";
pub const ENV_API_TOKEN: &str = "CHATLOAD_API_TOKEN";
pub const ENV_USERS: &str = "CHATLOAD_USERS";
pub const ENV_DURATION_SECS: &str = "CHATLOAD_DURATION_SECS";

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut ChatloadConfig) -> Result<(), ConfigError> {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides using `lookup` to read variables.
///
/// Empty values are ignored so that `CHATLOAD_API_TOKEN=` does not wipe a
/// token set in the config file.
pub fn apply_env_overrides(
    config: &mut ChatloadConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(ENV_BASE_URL) {
        config.target.base_url = url;
    }
    if let Some(app_id) = get(ENV_APP_ID) {
        config.target.app_id = app_id;
    }
    if let Some(token) = get(ENV_API_TOKEN) {
        config.target.api_token = token;
    }
    if let Some(users) = get(ENV_USERS) {
        config.load.users = parse_number(ENV_USERS, &users)?;
    }
    if let Some(secs) = get(ENV_DURATION_SECS) {
        config.load.duration_secs = parse_number(ENV_DURATION_SECS, &secs)?;
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("{key}={value:?} is not a valid number")))
}
