use crate::fetcher::RetryPolicy;
use crate::model::MarketRequest;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_EXPORT_PATH: &str = "live_crypto_data.xlsx";
pub const DEFAULT_FETCH_LIMIT: u32 = 50;
pub const DEFAULT_CHECK_INTERVAL_SECONDS: u64 = 300;
pub const DEFAULT_RATE_LIMIT_RETRY_SECONDS: u64 = 120;
pub const DEFAULT_STARTUP_DELAY_SECONDS: u64 = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub fetch_limit: u32,
    pub check_interval_seconds: u64,
    pub export_path: String,
    pub rate_limit_retry_seconds: u64,
    pub rate_limit_max_attempts: Option<u32>,
    pub startup_delay_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            check_interval_seconds: DEFAULT_CHECK_INTERVAL_SECONDS,
            export_path: DEFAULT_EXPORT_PATH.to_string(),
            rate_limit_retry_seconds: DEFAULT_RATE_LIMIT_RETRY_SECONDS,
            rate_limit_max_attempts: None,
            startup_delay_seconds: DEFAULT_STARTUP_DELAY_SECONDS,
        }
    }
}

impl AppConfig {
    pub fn market_request(&self) -> MarketRequest {
        MarketRequest {
            api_key: self.api_key.clone(),
            limit: self.fetch_limit,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            delay: Duration::from_secs(self.rate_limit_retry_seconds),
            max_attempts: self.rate_limit_max_attempts,
        }
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_seconds)
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
