//! Wire types of the Vybe Network REST API and their conversion into
//! entities. Numbers arrive either as JSON numbers or as strings, so
//! amounts go through a lenient decimal parser.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use crate::entity::{Holdings, TokenHolding, TokenInfo, Transfer};

pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceResponse {
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub total_token_value_usd: Option<Decimal>,
    #[serde(default)]
    pub data: Vec<TokenBalanceDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceDto {
    pub mint_address: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub price_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub value_usd: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetailsDto {
    #[serde(default)]
    pub mint_address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_u8_opt")]
    pub decimal: Option<u8>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub price: Option<Decimal>,
    #[serde(default, rename = "price1d", deserialize_with = "de_decimal_opt")]
    pub price_1d: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub current_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub market_cap: Option<Decimal>,
    #[serde(
        default,
        rename = "usdValueVolume24h",
        deserialize_with = "de_decimal_opt"
    )]
    pub usd_value_volume_24h: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "de_i64_opt")]
    pub update_time: Option<i64>,
}

impl TokenDetailsDto {
    /// The API answers unknown mints with an empty object rather than a 404.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
            && self.symbol.as_deref().map_or(true, str::is_empty)
    }

    pub fn into_token_info(self, requested_mint: &str) -> TokenInfo {
        let price_change_24h_pct = match (self.price, self.price_1d) {
            (Some(now), Some(before)) if !before.is_zero() => now
                .checked_sub(before)
                .and_then(|diff| diff.checked_div(before))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
            _ => None,
        };

        TokenInfo {
            mint: self
                .mint_address
                .unwrap_or_else(|| requested_mint.to_string()),
            name: self.name,
            symbol: self.symbol,
            decimals: self.decimal,
            price_usd: self.price,
            price_change_24h_pct,
            supply: self.current_supply,
            market_cap_usd: self.market_cap,
            volume_24h_usd: self.usd_value_volume_24h,
            category: self.category,
            verified: self.verified,
            updated_at: self.update_time.and_then(timestamp),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TransfersResponse {
    Wrapped { transfers: Vec<TransferDto> },
    Bare(Vec<TransferDto>),
}

impl TransfersResponse {
    pub fn into_transfers(self) -> Vec<Transfer> {
        let dtos = match self {
            TransfersResponse::Wrapped { transfers } => transfers,
            TransfersResponse::Bare(transfers) => transfers,
        };
        dtos.into_iter().map(TransferDto::into_transfer).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDto {
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub mint_address: Option<String>,
    #[serde(default)]
    pub sender_address: Option<String>,
    #[serde(default)]
    pub receiver_address: Option<String>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub calculated_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub value_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "de_i64_opt")]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub instruction_name: Option<String>,
}

impl TransferDto {
    fn into_transfer(self) -> Transfer {
        Transfer {
            signature: self.signature,
            mint: self.mint_address,
            // calculatedAmount is already adjusted for the mint's decimals
            amount: self.calculated_amount.or(self.amount),
            value_usd: self.value_usd,
            sender: self.sender_address,
            receiver: self.receiver_address,
            block_time: self.block_time.and_then(timestamp),
            instruction: self.instruction_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InstructionNamesResponse {
    Bare(Vec<String>),
    Wrapped {
        #[serde(alias = "instructionNames", alias = "data")]
        names: Vec<String>,
    },
}

impl InstructionNamesResponse {
    pub fn into_names(self) -> Vec<String> {
        match self {
            InstructionNamesResponse::Bare(names) => names,
            InstructionNamesResponse::Wrapped { names } => names,
        }
    }
}

impl TokenBalanceResponse {
    pub fn into_holdings(self, requested_owner: &str) -> Holdings {
        Holdings {
            owner: self
                .owner_address
                .unwrap_or_else(|| requested_owner.to_string()),
            total_value_usd: self.total_token_value_usd,
            tokens: self
                .data
                .into_iter()
                .map(|dto| TokenHolding {
                    mint: dto.mint_address,
                    symbol: dto.symbol,
                    name: dto.name,
                    amount: dto.amount.unwrap_or_default(),
                    price_usd: dto.price_usd,
                    value_usd: dto.value_usd,
                })
                .collect(),
        }
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    // Some endpoints report milliseconds
    let secs = if secs > 100_000_000_000 {
        secs / 1000
    } else {
        secs
    };
    DateTime::from_timestamp(secs, 0)
}

pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

fn de_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => parse_decimal(&text),
        Some(Value::Number(number)) => parse_decimal(&number.to_string()),
        _ => None,
    })
}

fn lenient_i64(value: Option<Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn de_i64_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_i64(Option::<Value>::deserialize(deserializer)?))
}

fn de_u8_opt<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_i64(Option::<Value>::deserialize(deserializer)?);
    Ok(value.and_then(|n| u8::try_from(n).ok()))
}
