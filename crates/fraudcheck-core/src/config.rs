//! Environment-based configuration.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL of the published fraud-feed CSV.
    pub feed_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub refresh_interval: Duration,
    pub request_timeout_secs: u64,
}

/// Load configuration from the environment, reading `.env` files first.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are
/// invalid.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from env vars already in the process, without
/// touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are
/// invalid.
pub fn load_config_from_env() -> Result<AppConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Core parsing/validation, decoupled from the real environment so tests
/// can drive it with a plain `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_owned()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_owned()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_owned(),
                reason: e.to_string(),
            })
    };

    let feed_url = require("FRAUDCHECK_FEED_URL")?;

    let bind_addr = or_default("FRAUDCHECK_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "FRAUDCHECK_BIND_ADDR".to_owned(),
            reason: e.to_string(),
        })?;

    let log_level = or_default("FRAUDCHECK_LOG_LEVEL", "info");
    let refresh_interval =
        Duration::from_secs(parse_u64("FRAUDCHECK_REFRESH_INTERVAL_SECS", "600")?);
    let request_timeout_secs = parse_u64("FRAUDCHECK_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        feed_url,
        bind_addr,
        log_level,
        refresh_interval,
        request_timeout_secs,
    })
}
