use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the market API (listings, stats, scrape trigger)
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Ingestion jobs take tens of seconds, so the scrape call gets its own timeout
    pub scrape_timeout: Duration,
    pub requests_per_second: f64,
    pub burst_size: u32,
    pub price_history_ttl: Duration,
    /// Optional JSON file overriding the built-in bonus taxonomy
    pub taxonomy_path: Option<PathBuf>,
    pub default_server: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            scrape_timeout: Duration::from_secs(180),
            requests_per_second: 5.0,
            burst_size: 10,
            price_history_ttl: Duration::from_secs(300),
            taxonomy_path: None,
            default_server: "Marmara".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;

        log_info!(
            "Market API configured at {} (timeout {:?}, scrape timeout {:?})",
            config.api_base_url,
            config.request_timeout,
            config.scrape_timeout
        );

        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = match lookup("PAZAR_API_URL") {
            Some(url) => Self::validate_api_url(&url)?,
            None => defaults.api_base_url,
        };

        let request_timeout = Self::parse_secs(&lookup, "PAZAR_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(defaults.request_timeout);
        let scrape_timeout = Self::parse_secs(&lookup, "PAZAR_SCRAPE_TIMEOUT_SECS")?
            .unwrap_or(defaults.scrape_timeout);
        let price_history_ttl = Self::parse_secs(&lookup, "PAZAR_PRICE_HISTORY_TTL_SECS")?
            .unwrap_or(defaults.price_history_ttl);

        let requests_per_second = match lookup("PAZAR_REQUESTS_PER_SECOND") {
            Some(raw) => {
                let rate: f64 = raw.trim().parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "PAZAR_REQUESTS_PER_SECOND must be a number, got '{}'",
                        raw
                    ))
                })?;
                if !(rate > 0.0 && rate.is_finite()) {
                    return Err(AppError::ConfigError(
                        "PAZAR_REQUESTS_PER_SECOND must be positive".to_string(),
                    ));
                }
                rate
            }
            None => defaults.requests_per_second,
        };

        let burst_size = match lookup("PAZAR_BURST") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::ConfigError(format!("PAZAR_BURST must be an integer, got '{}'", raw))
            })?,
            None => defaults.burst_size,
        };

        let taxonomy_path = lookup("PAZAR_TAXONOMY_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let default_server = lookup("PAZAR_DEFAULT_SERVER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.default_server);

        Ok(Self {
            api_base_url,
            request_timeout,
            scrape_timeout,
            requests_per_second,
            burst_size: burst_size.max(1),
            price_history_ttl,
            taxonomy_path,
            default_server,
        })
    }

    fn validate_api_url(url: &str) -> AppResult<String> {
        let url = url.trim().trim_end_matches('/');

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::ConfigError(format!(
                "Invalid market API URL '{}'. Must start with http:// or https://",
                url
            )));
        }

        Ok(url.to_string())
    }

    fn parse_secs<F>(lookup: &F, key: &str) -> AppResult<Option<Duration>>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(key) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        key, raw
                    ))
                })?;
                Ok(Some(Duration::from_secs(secs)))
            }
            None => Ok(None),
        }
    }
}
