use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the price page
#[derive(Debug, Clone)]
pub struct Config {
    pub price_url: String,
    pub threshold: f64,
    pub port: u16,
    pub refresh_ms: u64,
    pub fetch_timeout: Duration,
}

impl Config {
    pub const DEFAULT_PRICE_URL: &'static str =
        "https://api.wemixplay.com/info/v2/price-chart?symbol=CROW&range=1d";
    pub const DEFAULT_THRESHOLD: f64 = 0.75;
    pub const DEFAULT_PORT: u16 = 1234;
    pub const DEFAULT_REFRESH_MS: u64 = 1000;
    pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

    /// Read settings from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let price_url = lookup("CROW_PRICE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.price_url);

        let threshold = parse_var(&lookup, "CROW_THRESHOLD", defaults.threshold)?;
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "CROW_THRESHOLD",
                value: threshold.to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        let port = parse_var(&lookup, "CROW_PORT", defaults.port)?;
        let refresh_ms = parse_var(&lookup, "CROW_REFRESH_MS", defaults.refresh_ms)?;
        let timeout_secs = parse_var(
            &lookup,
            "CROW_FETCH_TIMEOUT_SECS",
            defaults.fetch_timeout.as_secs(),
        )?;

        Ok(Self {
            price_url,
            threshold,
            port,
            refresh_ms,
            fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_url: Self::DEFAULT_PRICE_URL.to_string(),
            threshold: Self::DEFAULT_THRESHOLD,
            port: Self::DEFAULT_PORT,
            refresh_ms: Self::DEFAULT_REFRESH_MS,
            fetch_timeout: Duration::from_secs(Self::DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
