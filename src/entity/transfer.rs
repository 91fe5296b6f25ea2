use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub signature: Option<String>,
    pub mint: Option<String>,
    pub amount: Option<Decimal>,
    pub value_usd: Option<Decimal>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub block_time: Option<DateTime<Utc>>,
    pub instruction: Option<String>,
}

/// Whose transfers to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferTarget {
    Wallet(String),
    Mint(String),
}

impl TransferTarget {
    /// Query parameter name understood by the transfers endpoint.
    pub fn query_key(&self) -> &'static str {
        match self {
            TransferTarget::Wallet(_) => "walletAddress",
            TransferTarget::Mint(_) => "mintAddress",
        }
    }

    pub fn address(&self) -> &str {
        match self {
            TransferTarget::Wallet(address) | TransferTarget::Mint(address) => address,
        }
    }
}
