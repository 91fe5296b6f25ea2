use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::entity::{BotError, BotResult, Holdings, TokenInfo, Transfer, TransferTarget};
use crate::utils::truncate;
use crate::vybe::models::{
    ErrorResponse, InstructionNamesResponse, TokenBalanceResponse, TokenDetailsDto,
    TransfersResponse, API_KEY_HEADER,
};
use crate::vybe::{Config, TokenBucket};

/// Source of wallet and token data
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch_wallet_holdings(&self, address: &str) -> BotResult<Holdings>;

    async fn fetch_token_info(&self, mint: &str) -> BotResult<TokenInfo>;

    async fn fetch_recent_transfers(
        &self,
        target: &TransferTarget,
        limit: usize,
    ) -> BotResult<Vec<Transfer>>;

    async fn fetch_instruction_names(&self) -> BotResult<Vec<String>>;
}

/// HTTP client for the Vybe Network REST API
pub struct VybeClient {
    http: Client,
    config: Config,
    limiter: Arc<TokenBucket>,
}

impl VybeClient {
    pub fn new(config: Config) -> BotResult<Self> {
        let limiter = Arc::new(TokenBucket::new(
            config.rate_limit_burst,
            config.rate_limit_per_sec,
        ));
        Self::with_limiter(config, limiter)
    }

    /// Shares a rate limiter with other clients of the same API key.
    pub fn with_limiter(config: Config, limiter: Arc<TokenBucket>) -> BotResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> BotResult<T> {
        let mut attempt = 0;
        loop {
            match self.send_once(path, query).await {
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        "Vybe request {} failed ({}), retry {}/{}",
                        path, e, attempt, self.config.max_retries
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                result => return result,
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> BotResult<T> {
        self.limiter.acquire().await;

        let url = format!("{}{}", self.config.api_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.map_status(path, response).await);
        }

        let body = response.text().await.map_err(map_transport_error)?;
        serde_json::from_str(&body).map_err(|e| {
            error!(
                "Undecodable response from {}: {} (body: {})",
                path,
                e,
                truncate(&body, 200)
            );
            BotError::Internal(format!("Unexpected response from data provider: {}", e))
        })
    }

    async fn map_status(&self, path: &str, response: Response) -> BotError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| status.to_string());

        match status {
            StatusCode::NOT_FOUND => BotError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = retry_after.unwrap_or(self.config.default_retry_after_secs);
                warn!("Vybe rate limit hit on {}, retry after {}s", path, retry_after_secs);
                BotError::RateLimited { retry_after_secs }
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("Vybe rejected the API key on {}: {} {}", path, status, message);
                BotError::Internal(format!("Data provider refused credentials ({})", status))
            }
            s if s.is_server_error() => {
                BotError::UpstreamUnavailable(format!("HTTP {}: {}", s.as_u16(), message))
            }
            _ => BotError::InvalidAddress(message),
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> BotError {
    if e.is_decode() {
        BotError::Internal(format!("Failed to read response: {}", e))
    } else if e.is_timeout() {
        BotError::UpstreamUnavailable("request timed out".to_string())
    } else {
        BotError::UpstreamUnavailable(e.to_string())
    }
}

// JSON `message`/`error` field, else the raw body
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            message: Some(message),
        }) if !message.is_empty() => Some(message),
        _ => Some(truncate(body, 200)),
    }
}

#[async_trait]
impl DataProvider for VybeClient {
    async fn fetch_wallet_holdings(&self, address: &str) -> BotResult<Holdings> {
        let response: TokenBalanceResponse = self
            .get_json(&format!("/account/token-balance/{}", address), &[])
            .await?;
        Ok(response.into_holdings(address))
    }

    async fn fetch_token_info(&self, mint: &str) -> BotResult<TokenInfo> {
        let dto: TokenDetailsDto = self.get_json(&format!("/token/{}", mint), &[]).await?;
        if dto.is_empty() {
            return Err(BotError::NotFound(format!("no token data for {}", mint)));
        }
        Ok(dto.into_token_info(mint))
    }

    async fn fetch_recent_transfers(
        &self,
        target: &TransferTarget,
        limit: usize,
    ) -> BotResult<Vec<Transfer>> {
        let query = [
            (target.query_key(), target.address().to_string()),
            ("limit", limit.to_string()),
        ];
        let response: TransfersResponse = self.get_json("/token/transfers", &query).await?;
        Ok(response.into_transfers())
    }

    async fn fetch_instruction_names(&self) -> BotResult<Vec<String>> {
        let response: InstructionNamesResponse =
            self.get_json("/token/instruction-names", &[]).await?;
        Ok(response.into_names())
    }
}
