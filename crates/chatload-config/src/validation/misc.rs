//! Validation for the target, queries and output sections.

use crate::schema::ChatloadConfig;

pub(crate) fn validate_target(errors: &mut Vec<String>, config: &ChatloadConfig) {
    let url = config.target.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "target.base_url = {url:?} must start with http:// or https://"
        ));
    }
}

pub(crate) fn validate_queries(errors: &mut Vec<String>, config: &ChatloadConfig) {
    if config.queries.pool.is_empty() {
        errors.push("queries.pool must contain at least one query".into());
    } else if config.queries.pool.iter().any(|q| q.trim().is_empty()) {
        errors.push("queries.pool contains an empty query".into());
    }
}

pub(crate) fn validate_output(errors: &mut Vec<String>, config: &ChatloadConfig) {
    if config.output.summary_path.as_os_str().is_empty() {
        errors.push("output.summary_path must not be empty".into());
    }
}
