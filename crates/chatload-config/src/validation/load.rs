//! Validation for the `[load]` section.

use super::helpers::{validate_range, validate_range_f64};
use crate::schema::ChatloadConfig;

pub(crate) fn validate_load(errors: &mut Vec<String>, config: &ChatloadConfig) {
    let load = &config.load;
    validate_range(errors, "load.users", u64::from(load.users), 1, 10_000);
    validate_range(
        errors,
        "load.request_timeout_secs",
        load.request_timeout_secs,
        1,
        3_600,
    );
    validate_range(
        errors,
        "load.connect_timeout_secs",
        load.connect_timeout_secs,
        1,
        300,
    );

    if load.duration_secs == 0 && load.iterations == 0 {
        errors.push(
            "load.duration_secs and load.iterations are both 0; the run would never end".into(),
        );
    }

    if load.duration_secs > 0 && load.ramp_up_secs >= load.duration_secs {
        errors.push(format!(
            "load.ramp_up_secs = {} must be shorter than load.duration_secs = {}",
            load.ramp_up_secs, load.duration_secs
        ));
    }
}

pub(crate) fn validate_pause(errors: &mut Vec<String>, config: &ChatloadConfig) {
    let load = &config.load;
    validate_range_f64(errors, "load.pause_min_secs", load.pause_min_secs, 0.0, 600.0);
    validate_range_f64(errors, "load.pause_max_secs", load.pause_max_secs, 0.0, 600.0);

    if load.pause_min_secs > load.pause_max_secs {
        errors.push(format!(
            "load.pause_min_secs = {} is greater than load.pause_max_secs = {}",
            load.pause_min_secs, load.pause_max_secs
        ));
    }
}
