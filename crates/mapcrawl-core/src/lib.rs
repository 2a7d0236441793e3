pub mod app_config;
pub mod config;
pub mod listing;
pub mod query;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{dedup_key, Listing, NO_ADDRESS, NO_NAME, NO_PHONE};
pub use query::build_search_query;

use thiserror::Error;

/// Inclusive bounds accepted for the plateau threshold.
pub const MIN_STALL_PASSES: u32 = 3;
pub const MAX_STALL_PASSES: u32 = 10;
pub const DEFAULT_STALL_PASSES: u32 = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },
}

/// Validates a plateau threshold against [`MIN_STALL_PASSES`]..=[`MAX_STALL_PASSES`].
///
/// # Errors
///
/// Returns [`ConfigError::OutOfRange`] when `value` falls outside the bounds.
pub fn validate_stall_passes(value: u32) -> Result<u32, ConfigError> {
    if (MIN_STALL_PASSES..=MAX_STALL_PASSES).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            field: "max_stall_passes",
            min: u64::from(MIN_STALL_PASSES),
            max: u64::from(MAX_STALL_PASSES),
            value: u64::from(value),
        })
    }
}
