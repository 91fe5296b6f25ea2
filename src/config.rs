use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::vybe;

/// Application settings, read from the environment (and `.env`).
///
/// Variable names are the upper-case field names, e.g. `VYBE_TIMEOUT_SECS`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub telegram_bot_token: String,

    #[serde(default)]
    pub vybe_api_key: String,

    #[serde(default = "default_api_url")]
    pub vybe_api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub vybe_timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub vybe_max_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub vybe_retry_delay_ms: u64,

    #[serde(default = "default_rate_limit_burst")]
    pub vybe_rate_limit_burst: u32,

    #[serde(default = "default_rate_limit_per_sec")]
    pub vybe_rate_limit_per_sec: f64,

    #[serde(default = "default_rate_limit_wait_secs")]
    pub vybe_rate_limit_default_wait_secs: u64,

    /// Transfers requested from the API per query
    #[serde(default = "default_transfers_fetch_limit")]
    pub transfers_fetch_limit: usize,

    /// Transfers shown in one message
    #[serde(default = "default_transfers_display_limit")]
    pub transfers_display_limit: usize,

    #[serde(default = "default_holdings_display_limit")]
    pub holdings_display_limit: usize,

    /// Unanswered prompts are dropped after this long
    #[serde(default = "default_pending_input_ttl_secs")]
    pub pending_input_ttl_secs: u64,
}

fn default_api_url() -> String {
    vybe::config::DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_rate_limit_burst() -> u32 {
    5
}

fn default_rate_limit_per_sec() -> f64 {
    2.0
}

fn default_rate_limit_wait_secs() -> u64 {
    30
}

fn default_transfers_fetch_limit() -> usize {
    10
}

fn default_transfers_display_limit() -> usize {
    5
}

fn default_holdings_display_limit() -> usize {
    10
}

fn default_pending_input_ttl_secs() -> u64 {
    15 * 60
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration from environment")?;
        Self::from_config(source)
    }

    pub fn from_config(source: config::Config) -> Result<Self> {
        let config: AppConfig = source
            .try_deserialize()
            .context("Invalid configuration value")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.telegram_bot_token.trim().is_empty(),
            "TELEGRAM_BOT_TOKEN must be set in environment variables"
        );
        ensure!(
            !self.vybe_api_key.trim().is_empty(),
            "VYBE_API_KEY must be set in environment variables"
        );
        ensure!(
            self.vybe_rate_limit_per_sec > 0.0,
            "VYBE_RATE_LIMIT_PER_SEC must be positive"
        );
        ensure!(
            self.vybe_timeout_secs > 0,
            "VYBE_TIMEOUT_SECS must be positive"
        );
        Ok(())
    }

    pub fn vybe(&self) -> vybe::Config {
        let mut config = vybe::Config::new(self.vybe_api_key.trim()).with_api_url(&self.vybe_api_url);
        config.timeout = Duration::from_secs(self.vybe_timeout_secs);
        config.max_retries = self.vybe_max_retries;
        config.retry_delay = Duration::from_millis(self.vybe_retry_delay_ms);
        config.rate_limit_burst = self.vybe_rate_limit_burst;
        config.rate_limit_per_sec = self.vybe_rate_limit_per_sec;
        config.default_retry_after_secs = self.vybe_rate_limit_default_wait_secs;
        config
    }

    pub fn pending_input_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.pending_input_ttl_secs as i64)
    }
}
