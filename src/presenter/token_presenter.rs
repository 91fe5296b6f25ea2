use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::entity::{BotError, ErrorKind};
use crate::interactor::TokenInteractor;
use crate::router::Action;
use crate::view::{error_view, menu_view, token_view, ChatView, Screen};

#[async_trait]
pub trait TokenPresenter: Send + Sync {
    async fn show_token_info(&self, mint: &str) -> Result<()>;
    async fn show_token_transfers(&self, mint: &str) -> Result<()>;
    async fn show_instruction_names(&self) -> Result<()>;
}

pub struct TokenPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
    transfers_limit: usize,
}

impl<I, V> TokenPresenterImpl<I, V>
where
    I: TokenInteractor,
    V: ChatView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>, transfers_limit: usize) -> Self {
        Self {
            interactor,
            view,
            transfers_limit,
        }
    }

    async fn render(&self, result: Result<Screen, BotError>, retry: Action) -> Result<()> {
        match result {
            Ok(screen) => self.view.show(screen).await,
            Err(e) if e.kind() == ErrorKind::Internal => Err(e.into()),
            Err(e) => {
                warn!("Token query failed: {}", e);
                self.view
                    .show(error_view::query_failed(&e, retry, Action::TokenMenu))
                    .await
            }
        }
    }
}

#[async_trait]
impl<I, V> TokenPresenter for TokenPresenterImpl<I, V>
where
    I: TokenInteractor + Send + Sync,
    V: ChatView + Send + Sync,
{
    async fn show_token_info(&self, mint: &str) -> Result<()> {
        self.view.show_loading(menu_view::loading_message()).await?;
        info!("Fetching token details for {}", mint);

        let result = self
            .interactor
            .get_token_info(mint)
            .await
            .map(|info| token_view::token_info(mint, &info));
        self.render(result, Action::TokenDetailsFor(mint.to_string()))
            .await
    }

    async fn show_token_transfers(&self, mint: &str) -> Result<()> {
        self.view.show_loading(menu_view::loading_message()).await?;
        info!("Fetching transfers of token {}", mint);

        let result = self
            .interactor
            .get_token_transfers(mint)
            .await
            .map(|transfers| token_view::token_transfers(mint, &transfers, self.transfers_limit));
        self.render(result, Action::TokenTransfersFor(mint.to_string()))
            .await
    }

    async fn show_instruction_names(&self) -> Result<()> {
        self.view.show_loading(menu_view::loading_message()).await?;

        let result = self
            .interactor
            .get_instruction_names()
            .await
            .map(|names| token_view::instruction_names(&names));
        self.render(result, Action::InstructionNames).await
    }
}
