use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{BotError, BotResult, TokenInfo, Transfer, TransferTarget};
use crate::interactor::portfolio_interactor::sort_newest_first;
use crate::vybe::DataProvider;

#[async_trait]
pub trait TokenInteractor: Send + Sync {
    async fn get_token_info(&self, mint: &str) -> BotResult<TokenInfo>;

    async fn get_token_transfers(&self, mint: &str) -> BotResult<Vec<Transfer>>;

    /// Sorted, without duplicates.
    async fn get_instruction_names(&self) -> BotResult<Vec<String>>;
}

pub struct TokenInteractorImpl {
    data_provider: Arc<dyn DataProvider>,
    transfers_fetch_limit: usize,
}

impl TokenInteractorImpl {
    pub fn new(data_provider: Arc<dyn DataProvider>, transfers_fetch_limit: usize) -> Self {
        Self {
            data_provider,
            transfers_fetch_limit,
        }
    }
}

#[async_trait]
impl TokenInteractor for TokenInteractorImpl {
    async fn get_token_info(&self, mint: &str) -> BotResult<TokenInfo> {
        let info = self.data_provider.fetch_token_info(mint).await?;
        if info.name.is_none() && info.symbol.is_none() && info.price_usd.is_none() {
            return Err(BotError::NotFound(format!("no token data for {}", mint)));
        }
        Ok(info)
    }

    async fn get_token_transfers(&self, mint: &str) -> BotResult<Vec<Transfer>> {
        let mut transfers = self
            .data_provider
            .fetch_recent_transfers(
                &TransferTarget::Mint(mint.to_string()),
                self.transfers_fetch_limit,
            )
            .await?;
        sort_newest_first(&mut transfers);
        Ok(transfers)
    }

    async fn get_instruction_names(&self) -> BotResult<Vec<String>> {
        let mut names: Vec<String> = self
            .data_provider
            .fetch_instruction_names()
            .await?
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));
        names.dedup_by_key(|name| name.to_lowercase());
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Holdings;

    struct NamesProvider;

    #[async_trait]
    impl DataProvider for NamesProvider {
        async fn fetch_wallet_holdings(&self, _address: &str) -> BotResult<Holdings> {
            Err(BotError::Internal("unused".into()))
        }

        async fn fetch_token_info(&self, mint: &str) -> BotResult<TokenInfo> {
            Ok(TokenInfo {
                mint: mint.to_string(),
                ..TokenInfo::default()
            })
        }

        async fn fetch_recent_transfers(
            &self,
            _target: &TransferTarget,
            _limit: usize,
        ) -> BotResult<Vec<Transfer>> {
            Ok(Vec::new())
        }

        async fn fetch_instruction_names(&self) -> BotResult<Vec<String>> {
            Ok(vec![
                "Transfer".into(),
                " burn ".into(),
                "mintTo".into(),
                "MintTo".into(),
                "".into(),
                "transfer".into(),
                "Transfer".into(),
            ])
        }
    }

    #[tokio::test]
    async fn instruction_names_are_cleaned_up() {
        let interactor = TokenInteractorImpl::new(Arc::new(NamesProvider), 10);
        assert_eq!(
            interactor.get_instruction_names().await.unwrap(),
            vec!["burn", "MintTo", "Transfer"]
        );
    }

    #[tokio::test]
    async fn blank_token_data_counts_as_not_found() {
        let interactor = TokenInteractorImpl::new(Arc::new(NamesProvider), 10);
        let err = interactor
            .get_token_info("So11111111111111111111111111111111111111112")
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::NotFound(_)));
    }
}
