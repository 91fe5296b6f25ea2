use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Token balances of one wallet, as reported by the data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holdings {
    pub owner: String,
    pub total_value_usd: Option<Decimal>,
    pub tokens: Vec<TokenHolding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenHolding {
    pub mint: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub amount: Decimal,
    pub price_usd: Option<Decimal>,
    pub value_usd: Option<Decimal>,
}

impl TokenHolding {
    // Symbol, then name, then the raw mint
    pub fn label(&self) -> &str {
        self.symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.mint)
    }
}
