use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    pub mint: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub price_usd: Option<Decimal>,
    pub price_change_24h_pct: Option<Decimal>,
    pub supply: Option<Decimal>,
    pub market_cap_usd: Option<Decimal>,
    pub volume_24h_usd: Option<Decimal>,
    pub category: Option<String>,
    pub verified: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}
