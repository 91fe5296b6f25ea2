use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{Menu, Session, State};
use crate::view::{error_view, menu_view, ChatView};

/// Screens that need no data from the provider.
#[async_trait]
pub trait MenuPresenter: Send + Sync {
    async fn show_welcome(&self) -> Result<()>;
    async fn show_help(&self) -> Result<()>;
    async fn show_demo(&self) -> Result<()>;
    async fn show_goodbye(&self) -> Result<()>;
    async fn show_menu(&self, menu: &Menu, session: &Session) -> Result<()>;
    async fn show_cancelled(&self, menu: &Menu, session: &Session) -> Result<()>;
    async fn show_prompt(&self, state: &State) -> Result<()>;
    async fn show_reprompt(&self, state: &State, reason: &str) -> Result<()>;
    async fn show_unrecognized(&self) -> Result<()>;
    async fn show_wallet_missing(&self, nickname: &str, session: &Session) -> Result<()>;
    async fn show_internal_error(&self) -> Result<()>;
}

pub struct MenuPresenterImpl<V> {
    view: Arc<V>,
}

impl<V> MenuPresenterImpl<V>
where
    V: ChatView,
{
    pub fn new(view: Arc<V>) -> Self {
        Self { view }
    }
}

#[async_trait]
impl<V> MenuPresenter for MenuPresenterImpl<V>
where
    V: ChatView + Send + Sync,
{
    async fn show_welcome(&self) -> Result<()> {
        self.view.show(menu_view::welcome()).await
    }

    async fn show_help(&self) -> Result<()> {
        self.view.show(menu_view::help()).await
    }

    async fn show_demo(&self) -> Result<()> {
        self.view.show(menu_view::demo()).await
    }

    async fn show_goodbye(&self) -> Result<()> {
        self.view.show(menu_view::goodbye()).await
    }

    async fn show_menu(&self, menu: &Menu, session: &Session) -> Result<()> {
        self.view.show(menu_view::menu(menu, session)).await
    }

    async fn show_cancelled(&self, menu: &Menu, session: &Session) -> Result<()> {
        self.view.show(menu_view::cancelled(menu, session)).await
    }

    async fn show_prompt(&self, state: &State) -> Result<()> {
        self.view.show(menu_view::prompt(state)).await
    }

    async fn show_reprompt(&self, state: &State, reason: &str) -> Result<()> {
        self.view.show(menu_view::reprompt(state, reason)).await
    }

    async fn show_unrecognized(&self) -> Result<()> {
        self.view.show(menu_view::unrecognized()).await
    }

    async fn show_wallet_missing(&self, nickname: &str, session: &Session) -> Result<()> {
        self.view
            .show(menu_view::wallet_missing(nickname, &session.wallets))
            .await
    }

    async fn show_internal_error(&self) -> Result<()> {
        self.view.show(error_view::internal_error()).await
    }
}
