//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup. A `.env` file is honored for local development.

use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLIMATIQ_BASE_URL: &str = "https://api.climatiq.io";
const DEFAULT_GOLD_STANDARD_BASE_URL: &str = "https://api.goldstandard.org";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Climatiq API key; remote estimates fail over to local factors without it
    pub climatiq_api_key: Option<String>,
    /// Climatiq API base URL
    pub climatiq_base_url: String,
    /// Gold Standard registry base URL (offset projects)
    pub gold_standard_base_url: String,
    /// Whether to call external providers at all
    pub remote_enabled: bool,
    /// Upper bound on every outbound request
    pub upstream_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only. Never touches the network.
    fn default() -> Self {
        Self {
            port: 8080,
            climatiq_api_key: None,
            climatiq_base_url: DEFAULT_CLIMATIQ_BASE_URL.to_string(),
            gold_standard_base_url: DEFAULT_GOLD_STANDARD_BASE_URL.to_string(),
            remote_enabled: false,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_PORT),
            climatiq_api_key: env::var("CLIMATIQ_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            climatiq_base_url: env::var("CLIMATIQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CLIMATIQ_BASE_URL.to_string()),
            gold_standard_base_url: env::var("GOLD_STANDARD_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GOLD_STANDARD_BASE_URL.to_string()),
            remote_enabled: match env::var("REMOTE_ENABLED") {
                Ok(v) => parse_bool("REMOTE_ENABLED", &v)?,
                Err(_) => true,
            },
            upstream_timeout: match env::var("UPSTREAM_TIMEOUT_SECS") {
                Ok(v) => parse_timeout("UPSTREAM_TIMEOUT_SECS", &v)?,
                Err(_) => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            },
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(name, value.to_string())),
    }
}

fn parse_timeout(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid(name, value.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
