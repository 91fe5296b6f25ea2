use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.vybenetwork.xyz";

/// Settings of the Vybe Network HTTP client
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL, without trailing slash
    pub api_url: String,

    /// Sent as `X-API-KEY` on every request
    pub api_key: String,

    /// Whole-request timeout; expiry counts as upstream unavailable
    pub timeout: Duration,

    /// Automatic retries for transient failures
    pub max_retries: u32,

    /// Pause before a retry
    pub retry_delay: Duration,

    /// Token bucket capacity
    pub rate_limit_burst: u32,

    /// Token bucket refill rate
    pub rate_limit_per_sec: f64,

    /// Suggested wait when a 429 carries no `Retry-After`
    pub default_retry_after_secs: u64,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            max_retries: 1,
            retry_delay: Duration::from_millis(500),
            rate_limit_burst: 5,
            rate_limit_per_sec: 2.0,
            default_retry_after_secs: 30,
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }
}
