//! Environment-driven configuration

use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_SWEEP_INTERVAL_SECS: u64 = 60;

/// Deployment environment name (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    /// When false only the synthetic generator is consulted.
    pub use_live_data: bool,
    /// Enables the secondary live provider when present.
    pub alpha_vantage_api_key: Option<String>,
    pub yahoo_base_url: String,
    pub alpha_vantage_base_url: String,
    pub provider_timeout: Duration,
    pub cache_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            environment: get_environment(),
            port: parse_var("PORT").unwrap_or(defaults.port),
            use_live_data: env::var("USE_LIVE_DATA")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.use_live_data),
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            alpha_vantage_base_url: env::var("ALPHA_VANTAGE_BASE_URL")
                .unwrap_or(defaults.alpha_vantage_base_url),
            provider_timeout: parse_var::<u64>("PROVIDER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_timeout),
            cache_sweep_interval: parse_var::<u64>("CACHE_SWEEP_INTERVAL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_sweep_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            use_live_data: false,
            alpha_vantage_api_key: None,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            alpha_vantage_base_url: DEFAULT_ALPHA_VANTAGE_BASE_URL.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            cache_sweep_interval: Duration::from_secs(DEFAULT_CACHE_SWEEP_INTERVAL_SECS),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
