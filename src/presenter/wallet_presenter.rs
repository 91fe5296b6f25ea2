use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::entity::{ErrorKind, WalletEntry};
use crate::interactor::PortfolioInteractor;
use crate::router::Action;
use crate::view::{error_view, menu_view, wallet_view, ChatView};

#[async_trait]
pub trait WalletPresenter: Send + Sync {
    async fn show_saved(&self, wallet: &WalletEntry) -> Result<()>;
    async fn confirm_delete(&self, wallet: &WalletEntry) -> Result<()>;
    async fn show_deleted(&self, removed: &WalletEntry, remaining: &[WalletEntry]) -> Result<()>;
    async fn show_holdings(&self, wallet: &WalletEntry) -> Result<()>;
    async fn show_transfers(&self, wallet: &WalletEntry) -> Result<()>;
}

pub struct WalletPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
    holdings_limit: usize,
    transfers_limit: usize,
}

impl<I, V> WalletPresenterImpl<I, V>
where
    I: PortfolioInteractor,
    V: ChatView,
{
    pub fn new(
        interactor: Arc<I>,
        view: Arc<V>,
        holdings_limit: usize,
        transfers_limit: usize,
    ) -> Self {
        Self {
            interactor,
            view,
            holdings_limit,
            transfers_limit,
        }
    }
}

#[async_trait]
impl<I, V> WalletPresenter for WalletPresenterImpl<I, V>
where
    I: PortfolioInteractor + Send + Sync,
    V: ChatView + Send + Sync,
{
    async fn show_saved(&self, wallet: &WalletEntry) -> Result<()> {
        self.view.show(wallet_view::saved(wallet)).await
    }

    async fn confirm_delete(&self, wallet: &WalletEntry) -> Result<()> {
        self.view.show(wallet_view::confirm_delete(wallet)).await
    }

    async fn show_deleted(&self, removed: &WalletEntry, remaining: &[WalletEntry]) -> Result<()> {
        self.view.show(wallet_view::deleted(removed, remaining)).await
    }

    async fn show_holdings(&self, wallet: &WalletEntry) -> Result<()> {
        self.view.show_loading(menu_view::loading_message()).await?;
        info!("Fetching holdings of {} ({})", wallet.nickname, wallet.address);

        match self.interactor.get_holdings(&wallet.address).await {
            Ok(holdings) => {
                self.view
                    .show(wallet_view::holdings(wallet, &holdings, self.holdings_limit))
                    .await
            }
            Err(e) if e.kind() == ErrorKind::Internal => Err(e.into()),
            Err(e) => {
                warn!("Holdings lookup for {} failed: {}", wallet.address, e);
                self.view
                    .show(error_view::query_failed(
                        &e,
                        Action::ViewHoldings(wallet.nickname.clone()),
                        Action::SelectWallet(wallet.nickname.clone()),
                    ))
                    .await
            }
        }
    }

    async fn show_transfers(&self, wallet: &WalletEntry) -> Result<()> {
        self.view.show_loading(menu_view::loading_message()).await?;
        info!("Fetching transfers of {} ({})", wallet.nickname, wallet.address);

        match self.interactor.get_wallet_transfers(&wallet.address).await {
            Ok(transfers) => {
                self.view
                    .show(wallet_view::transfers(wallet, &transfers, self.transfers_limit))
                    .await
            }
            Err(e) if e.kind() == ErrorKind::Internal => Err(e.into()),
            Err(e) => {
                warn!("Transfers lookup for {} failed: {}", wallet.address, e);
                self.view
                    .show(error_view::query_failed(
                        &e,
                        Action::WalletTransfers(wallet.nickname.clone()),
                        Action::SelectWallet(wallet.nickname.clone()),
                    ))
                    .await
            }
        }
    }
}
