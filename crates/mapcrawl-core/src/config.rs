use crate::app_config::{AppConfig, Environment};
use crate::{validate_stall_passes, ConfigError, DEFAULT_STALL_PASSES};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("MAPCRAWL_ENV", "development"))?;
    let log_level = or_default("MAPCRAWL_LOG_LEVEL", "info");

    let max_stall_passes = parse_u32(
        "MAPCRAWL_MAX_STALL_PASSES",
        &DEFAULT_STALL_PASSES.to_string(),
    )?;
    let max_stall_passes =
        validate_stall_passes(max_stall_passes).map_err(|e| ConfigError::InvalidEnvVar {
            var: "MAPCRAWL_MAX_STALL_PASSES".to_string(),
            reason: e.to_string(),
        })?;

    let pacing_min_ms = parse_u64("MAPCRAWL_PACING_MIN_MS", "2500")?;
    let pacing_max_ms = parse_u64("MAPCRAWL_PACING_MAX_MS", "3800")?;
    if pacing_min_ms > pacing_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAPCRAWL_PACING_MAX_MS".to_string(),
            reason: format!("must be >= MAPCRAWL_PACING_MIN_MS ({pacing_min_ms})"),
        });
    }

    let settle_delay_ms = parse_u64("MAPCRAWL_SETTLE_DELAY_MS", "7000")?;

    Ok(AppConfig {
        env,
        log_level,
        max_stall_passes,
        pacing_min_ms,
        pacing_max_ms,
        settle_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MAPCRAWL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
