use chrono::{DateTime, Duration, Utc};

use super::bot_error::{BotError, BotResult};
use super::wallet::WalletEntry;

/// Which free-text query the Token Tools menu is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenQuery {
    Details,
    Transfers,
}

/// Screens that can be stacked for back-navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Menu {
    Main,
    Wallets,
    MyWallets,
    WalletOptions(String),
    Tokens,
}

/// Conversation state of one chat.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    ViewingMenu(Menu),
    AwaitingWalletNickname,
    AwaitingWalletAddress {
        nickname: String,
    },
    AwaitingTokenQuery(TokenQuery),
}

impl State {
    pub fn is_awaiting_input(&self) -> bool {
        matches!(
            self,
            State::AwaitingWalletNickname
                | State::AwaitingWalletAddress { .. }
                | State::AwaitingTokenQuery(_)
        )
    }

    /// Menu a pending flow belongs to, used when the flow is cancelled.
    pub fn home_menu(&self) -> Menu {
        match self {
            State::AwaitingWalletNickname | State::AwaitingWalletAddress { .. } => Menu::Wallets,
            State::AwaitingTokenQuery(_) => Menu::Tokens,
            State::Idle | State::ViewingMenu(_) => Menu::Main,
        }
    }
}

/// How a transition moves the menu back-stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nav {
    Keep,
    /// Stack becomes `[Main]`.
    Root,
    /// Pop back to `menu` if it is already stacked, otherwise push it.
    Enter(Menu),
    Back,
    Clear,
}

/// Everything we remember about one chat. Never shared between chats.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub state: State,
    pub menu_stack: Vec<Menu>,
    pub wallets: Vec<WalletEntry>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn wallet(&self, nickname: &str) -> Option<&WalletEntry> {
        self.wallets.iter().find(|w| w.has_nickname(nickname))
    }

    pub fn wallet_by_address(&self, address: &str) -> Option<&WalletEntry> {
        self.wallets.iter().find(|w| w.address == address)
    }

    pub fn add_wallet(&mut self, entry: WalletEntry) -> BotResult<()> {
        if let Some(existing) = self.wallet(&entry.nickname) {
            return Err(BotError::NicknameTaken(existing.nickname.clone()));
        }
        if let Some(existing) = self.wallet_by_address(&entry.address) {
            return Err(BotError::DuplicateAddress(existing.nickname.clone()));
        }
        self.wallets.push(entry);
        Ok(())
    }

    pub fn remove_wallet(&mut self, nickname: &str) -> BotResult<WalletEntry> {
        let index = self
            .wallets
            .iter()
            .position(|w| w.has_nickname(nickname))
            .ok_or_else(|| BotError::WalletNotFound(nickname.to_string()))?;
        Ok(self.wallets.remove(index))
    }

    /// Menu shown by a Back press.
    pub fn parent_menu(&self) -> Menu {
        let len = self.menu_stack.len();
        if len >= 2 {
            self.menu_stack[len - 2].clone()
        } else {
            Menu::Main
        }
    }

    pub fn navigate(&mut self, nav: &Nav) {
        match nav {
            Nav::Keep => {}
            Nav::Root => self.menu_stack = vec![Menu::Main],
            Nav::Enter(menu) => {
                if let Some(pos) = self.menu_stack.iter().position(|m| m == menu) {
                    self.menu_stack.truncate(pos + 1);
                } else {
                    if self.menu_stack.is_empty() && *menu != Menu::Main {
                        self.menu_stack.push(Menu::Main);
                    }
                    self.menu_stack.push(menu.clone());
                }
            }
            Nav::Back => {
                self.menu_stack.pop();
                if self.menu_stack.is_empty() {
                    self.menu_stack.push(Menu::Main);
                }
            }
            Nav::Clear => self.menu_stack.clear(),
        }
    }

    /// Drop any pending input and navigation, keep saved wallets.
    pub fn reset_flow(&mut self) {
        self.state = State::Idle;
        self.menu_stack.clear();
    }

    /// Resets a pending input older than `ttl`. Returns whether it expired.
    pub fn expire_stale_input(&mut self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let stale = match self.updated_at {
            Some(updated_at) => now - updated_at > ttl,
            None => false,
        };
        if stale && self.state.is_awaiting_input() {
            self.reset_flow();
            return true;
        }
        false
    }
}
