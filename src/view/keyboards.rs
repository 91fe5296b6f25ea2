use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::entity::WalletEntry;
use crate::router::Action;

pub fn button(text: impl Into<String>, action: Action) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.encode())
}

fn single_column(buttons: Vec<InlineKeyboardButton>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(buttons.into_iter().map(|b| vec![b]))
}

fn main_menu_button() -> InlineKeyboardButton {
    button("🏠 Main Menu", Action::MainMenu)
}

pub fn main_menu() -> InlineKeyboardMarkup {
    single_column(vec![
        button("💼 Wallet Management", Action::WalletMenu),
        button("🪙 Token Tools", Action::TokenMenu),
        button("🎬 Demo", Action::Demo),
        button("👋 End Chat", Action::EndChat),
    ])
}

pub fn wallet_menu() -> InlineKeyboardMarkup {
    single_column(vec![
        button("➕ Save Wallet", Action::SaveWallet),
        button("⭐ My Wallets", Action::MyWallets),
        main_menu_button(),
    ])
}

pub fn token_menu() -> InlineKeyboardMarkup {
    single_column(vec![
        button("🪙 Token Details", Action::TokenDetails),
        button("🔄 Token Transfers", Action::TokenTransfers),
        button("📝 Instruction Names", Action::InstructionNames),
        main_menu_button(),
    ])
}

pub fn my_wallets(wallets: &[WalletEntry]) -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = wallets
        .iter()
        .map(|w| {
            button(
                format!("{} ({})", w.nickname, w.preview()),
                Action::SelectWallet(w.nickname.clone()),
            )
        })
        .collect();

    if wallets.is_empty() {
        buttons.push(button("➕ Save Wallet First", Action::SaveWallet));
    }
    buttons.push(button("⬅️ Back", Action::Back));
    buttons.push(main_menu_button());
    single_column(buttons)
}

pub fn wallet_options(nickname: &str) -> InlineKeyboardMarkup {
    single_column(vec![
        button("📊 View Holdings", Action::ViewHoldings(nickname.to_string())),
        button(
            "🔄 Recent Transfers",
            Action::WalletTransfers(nickname.to_string()),
        ),
        button("🗑️ Delete Wallet", Action::DeleteWallet(nickname.to_string())),
        button("⭐ My Wallets", Action::MyWallets),
        main_menu_button(),
    ])
}

pub fn confirm_delete(nickname: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("✅ Yes, delete", Action::ConfirmDelete(nickname.to_string())),
        button("✖️ Keep it", Action::SelectWallet(nickname.to_string())),
    ]])
}

/// Shown under a prompt that waits for typed input.
pub fn cancel_only() -> InlineKeyboardMarkup {
    single_column(vec![button("✖️ Cancel", Action::Cancel)])
}

/// Shown under a result or a recoverable error.
pub fn retry_or_back(retry: Option<Action>, back: Action) -> InlineKeyboardMarkup {
    let mut row = Vec::new();
    if let Some(retry) = retry {
        row.push(button("🔁 Retry", retry));
    }
    row.push(button("⬅️ Back", back));
    InlineKeyboardMarkup::new(vec![row, vec![main_menu_button()]])
}

pub fn back_to(action: Action) -> InlineKeyboardMarkup {
    retry_or_back(None, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::callback_data;

    #[test]
    fn wallet_list_links_each_wallet_by_nickname() {
        let wallets = vec![
            WalletEntry::new("MyWhale", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            WalletEntry::new("Cold", "So11111111111111111111111111111111111111112"),
        ];
        let data = callback_data(&my_wallets(&wallets));
        assert_eq!(
            data,
            vec!["wallet:select:MyWhale", "wallet:select:Cold", "nav:back", "main:menu"]
        );
    }

    #[test]
    fn empty_wallet_list_offers_to_save_one() {
        let data = callback_data(&my_wallets(&[]));
        assert_eq!(data[0], "wallet:save");
    }

    #[test]
    fn retry_button_is_optional() {
        assert_eq!(
            callback_data(&retry_or_back(Some(Action::InstructionNames), Action::TokenMenu)),
            vec!["token:instructions", "token:menu", "main:menu"]
        );
        assert_eq!(
            callback_data(&back_to(Action::TokenMenu)),
            vec!["token:menu", "main:menu"]
        );
    }
}
