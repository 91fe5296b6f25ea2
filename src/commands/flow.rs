//! Runs one event through the state machine for one chat.

use anyhow::Result;
use log::{debug, error, info};
use std::sync::Arc;
use teloxide::types::ChatId;

use crate::di::ServiceContainer;
use crate::entity::{BotError, Session, WalletEntry};
use crate::presenter::{
    MenuPresenter, MenuPresenterImpl, TokenPresenter, TokenPresenterImpl, WalletPresenter,
    WalletPresenterImpl,
};
use crate::router::transition::{transition, Effect, Event};
use crate::view::ChatView;

/// Loads the chat's session, applies the transition for `event`, runs its
/// effect and stores the session again. Failures inside the effect are
/// answered with an apology and a reset flow; they never escape to the
/// dispatcher.
pub async fn handle_event<V>(
    chat_id: ChatId,
    event: Event,
    view: Arc<V>,
    services: &ServiceContainer,
) -> Result<()>
where
    V: ChatView + 'static,
{
    let sessions = services.sessions();
    let mut session = sessions.get(chat_id).await;

    let step = transition(&session, &event);
    debug!(
        "Chat {}: {:?} in {:?} -> {:?}, {:?}",
        chat_id, event, session.state, step.next, step.effect
    );
    session.state = step.next;
    session.navigate(&step.nav);

    let menus = MenuPresenterImpl::new(view.clone());
    if let Err(e) = execute(&step.effect, &mut session, &view, &menus, services).await {
        error!("Chat {}: failed to handle {:?}: {:#}", chat_id, step.effect, e);
        session.reset_flow();
        if let Err(e) = menus.show_internal_error().await {
            error!("Chat {}: failed to send apology: {:#}", chat_id, e);
        }
    }

    sessions.set(chat_id, session).await;
    Ok(())
}

fn saved_wallet(session: &Session, nickname: &str) -> Result<WalletEntry, BotError> {
    session
        .wallet(nickname)
        .cloned()
        .ok_or_else(|| BotError::WalletNotFound(nickname.to_string()))
}

async fn execute<V>(
    effect: &Effect,
    session: &mut Session,
    view: &Arc<V>,
    menus: &MenuPresenterImpl<V>,
    services: &ServiceContainer,
) -> Result<()>
where
    V: ChatView + 'static,
{
    let settings = services.settings();
    let wallets = || {
        WalletPresenterImpl::new(
            services.portfolio_interactor(),
            view.clone(),
            settings.holdings_display_limit,
            settings.transfers_display_limit,
        )
    };
    let tokens = || {
        TokenPresenterImpl::new(
            services.token_interactor(),
            view.clone(),
            settings.transfers_display_limit,
        )
    };

    match effect {
        Effect::Welcome => menus.show_welcome().await,
        Effect::Help => menus.show_help().await,
        Effect::ShowMenu(menu) => menus.show_menu(menu, session).await,
        Effect::Prompt => menus.show_prompt(&session.state).await,
        Effect::Reprompt(reason) => menus.show_reprompt(&session.state, reason).await,
        Effect::Cancelled(menu) => menus.show_cancelled(menu, session).await,
        Effect::Demo => menus.show_demo().await,
        Effect::EndChat => menus.show_goodbye().await,
        Effect::Unrecognized => menus.show_unrecognized().await,
        Effect::WalletMissing(nickname) => menus.show_wallet_missing(nickname, session).await,

        Effect::SaveWallet(entry) => {
            session.add_wallet(entry.clone())?;
            info!("Saved wallet {} ({})", entry.nickname, entry.address);
            wallets().show_saved(entry).await
        }
        Effect::ConfirmDelete(nickname) => {
            let wallet = saved_wallet(session, nickname)?;
            wallets().confirm_delete(&wallet).await
        }
        Effect::DeleteWallet(nickname) => {
            let removed = session.remove_wallet(nickname)?;
            info!("Deleted wallet {} ({})", removed.nickname, removed.address);
            wallets().show_deleted(&removed, &session.wallets).await
        }
        Effect::FetchHoldings(nickname) => {
            let wallet = saved_wallet(session, nickname)?;
            wallets().show_holdings(&wallet).await
        }
        Effect::FetchWalletTransfers(nickname) => {
            let wallet = saved_wallet(session, nickname)?;
            wallets().show_transfers(&wallet).await
        }

        Effect::FetchTokenInfo(mint) => tokens().show_token_info(mint).await,
        Effect::FetchTokenTransfers(mint) => tokens().show_token_transfers(mint).await,
        Effect::FetchInstructionNames => tokens().show_instruction_names().await,
    }
}
