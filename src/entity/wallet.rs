use serde::{Deserialize, Serialize};

use crate::utils::shorten_address;

/// A wallet the user asked us to remember under a nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub nickname: String,
    pub address: String,
}

impl WalletEntry {
    pub fn new(nickname: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            address: address.into(),
        }
    }

    /// `AbCde...VwXyz`
    pub fn preview(&self) -> String {
        shorten_address(&self.address)
    }

    /// Nicknames compare case-insensitively so "MyWhale" and "mywhale"
    /// cannot both exist for one chat.
    pub fn has_nickname(&self, nickname: &str) -> bool {
        self.nickname.to_lowercase() == nickname.trim().to_lowercase()
    }
}
