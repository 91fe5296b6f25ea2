use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::entity::{BotResult, Holdings, Transfer, TransferTarget};
use crate::vybe::DataProvider;

#[async_trait]
pub trait PortfolioInteractor: Send + Sync {
    /// Non-empty balances of `address`, most valuable first.
    async fn get_holdings(&self, address: &str) -> BotResult<Holdings>;

    async fn get_wallet_transfers(&self, address: &str) -> BotResult<Vec<Transfer>>;
}

pub struct PortfolioInteractorImpl {
    data_provider: Arc<dyn DataProvider>,
    transfers_fetch_limit: usize,
}

impl PortfolioInteractorImpl {
    pub fn new(data_provider: Arc<dyn DataProvider>, transfers_fetch_limit: usize) -> Self {
        Self {
            data_provider,
            transfers_fetch_limit,
        }
    }
}

#[async_trait]
impl PortfolioInteractor for PortfolioInteractorImpl {
    async fn get_holdings(&self, address: &str) -> BotResult<Holdings> {
        let mut holdings = self.data_provider.fetch_wallet_holdings(address).await?;

        holdings.tokens.retain(|token| !token.amount.is_zero());
        // Unpriced tokens sink to the bottom
        holdings
            .tokens
            .sort_by(|a, b| b.value_usd.unwrap_or_default().cmp(&a.value_usd.unwrap_or_default()));

        if holdings.total_value_usd.is_none() && holdings.tokens.iter().any(|t| t.value_usd.is_some()) {
            // None when the sum does not fit
            holdings.total_value_usd = holdings
                .tokens
                .iter()
                .filter_map(|t| t.value_usd)
                .try_fold(Decimal::ZERO, |total, value| total.checked_add(value));
        }

        Ok(holdings)
    }

    async fn get_wallet_transfers(&self, address: &str) -> BotResult<Vec<Transfer>> {
        let mut transfers = self
            .data_provider
            .fetch_recent_transfers(
                &TransferTarget::Wallet(address.to_string()),
                self.transfers_fetch_limit,
            )
            .await?;
        sort_newest_first(&mut transfers);
        Ok(transfers)
    }
}

pub(crate) fn sort_newest_first(transfers: &mut [Transfer]) {
    transfers.sort_by(|a, b| b.block_time.cmp(&a.block_time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BotError, TokenHolding, TokenInfo};
    use std::str::FromStr;

    struct FixedProvider;

    fn holding(symbol: &str, amount: &str, value: Option<&str>) -> TokenHolding {
        TokenHolding {
            mint: format!("{}-mint", symbol),
            symbol: Some(symbol.to_string()),
            name: None,
            amount: Decimal::from_str(amount).unwrap(),
            price_usd: None,
            value_usd: value.map(|v| Decimal::from_str(v).unwrap()),
        }
    }

    #[async_trait]
    impl DataProvider for FixedProvider {
        async fn fetch_wallet_holdings(&self, address: &str) -> BotResult<Holdings> {
            Ok(Holdings {
                owner: address.to_string(),
                total_value_usd: None,
                tokens: vec![
                    holding("DUST", "0", Some("0")),
                    holding("BONK", "1000", None),
                    holding("USDC", "10", Some("10")),
                    holding("SOL", "2", Some("300")),
                ],
            })
        }

        async fn fetch_token_info(&self, _mint: &str) -> BotResult<TokenInfo> {
            Err(BotError::NotFound("unused".into()))
        }

        async fn fetch_recent_transfers(
            &self,
            target: &TransferTarget,
            limit: usize,
        ) -> BotResult<Vec<Transfer>> {
            assert!(matches!(target, TransferTarget::Wallet(_)));
            assert_eq!(limit, 10);
            Ok(Vec::new())
        }

        async fn fetch_instruction_names(&self) -> BotResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn holdings_drop_empty_balances_and_sort_by_value() {
        let interactor = PortfolioInteractorImpl::new(Arc::new(FixedProvider), 10);
        let holdings = interactor.get_holdings("owner").await.unwrap();

        let labels: Vec<&str> = holdings.tokens.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["SOL", "USDC", "BONK"]);
        assert_eq!(holdings.total_value_usd, Some(Decimal::from(310)));
    }

    #[tokio::test]
    async fn wallet_transfers_use_the_configured_fetch_limit() {
        let interactor = PortfolioInteractorImpl::new(Arc::new(FixedProvider), 10);
        assert!(interactor.get_wallet_transfers("owner").await.unwrap().is_empty());
    }

    struct WhaleProvider;

    #[async_trait]
    impl DataProvider for WhaleProvider {
        async fn fetch_wallet_holdings(&self, address: &str) -> BotResult<Holdings> {
            let mut huge = holding("HUGE", "1", None);
            huge.value_usd = Some(Decimal::MAX);
            let mut other = holding("OTHER", "1", None);
            other.value_usd = Some(Decimal::MAX);
            Ok(Holdings {
                owner: address.to_string(),
                total_value_usd: None,
                tokens: vec![huge, other],
            })
        }

        async fn fetch_token_info(&self, _mint: &str) -> BotResult<TokenInfo> {
            Err(BotError::NotFound("unused".into()))
        }

        async fn fetch_recent_transfers(
            &self,
            _target: &TransferTarget,
            _limit: usize,
        ) -> BotResult<Vec<Transfer>> {
            Ok(Vec::new())
        }

        async fn fetch_instruction_names(&self) -> BotResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn total_that_overflows_is_left_out() {
        let interactor = PortfolioInteractorImpl::new(Arc::new(WhaleProvider), 10);
        let holdings = interactor.get_holdings("owner").await.unwrap();

        assert_eq!(holdings.tokens.len(), 2);
        assert_eq!(holdings.total_value_usd, None);
    }
}
