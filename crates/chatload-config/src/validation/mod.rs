//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.
//!
//! Credentials are not checked here: a config file without a token is
//! valid on its own, and `TargetConfig::require_credentials` runs once all
//! overrides are applied.

mod helpers;
mod load;
mod misc;


use crate::schema::ChatloadConfig;
use chatload_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChatloadConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    load::validate_load(&mut errors, config);
    load::validate_pause(&mut errors, config);
    misc::validate_target(&mut errors, config);
    misc::validate_queries(&mut errors, config);
    misc::validate_output(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
