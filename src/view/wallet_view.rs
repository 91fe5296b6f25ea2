use teloxide::utils::html::escape;

use crate::entity::{Holdings, Transfer, WalletEntry};
use crate::router::Action;
use crate::utils::{format_amount, format_price, format_usd};
use crate::view::{keyboards, transfer_view, Screen};

fn wallet_header(icon: &str, title: &str, wallet: &WalletEntry) -> String {
    format!(
        "{} <b>{} {}</b> (<code>{}</code>)",
        icon,
        title,
        escape(&wallet.nickname),
        escape(&wallet.preview())
    )
}

pub fn saved(wallet: &WalletEntry) -> Screen {
    Screen::new(
        format!(
            "✅ Wallet <b>{}</b> saved!\n<code>{}</code>\n\nWhat would you like to do next?",
            escape(&wallet.nickname),
            escape(&wallet.address)
        ),
        keyboards::wallet_options(&wallet.nickname),
    )
}

pub fn confirm_delete(wallet: &WalletEntry) -> Screen {
    Screen::new(
        format!(
            "🗑️ Delete wallet <b>{}</b> (<code>{}</code>)?",
            escape(&wallet.nickname),
            escape(&wallet.preview())
        ),
        keyboards::confirm_delete(&wallet.nickname),
    )
}

pub fn deleted(removed: &WalletEntry, remaining: &[WalletEntry]) -> Screen {
    Screen::new(
        format!(
            "🗑️ Wallet <b>{}</b> deleted.",
            escape(&removed.nickname)
        ),
        keyboards::my_wallets(remaining),
    )
}

pub fn holdings(wallet: &WalletEntry, holdings: &Holdings, limit: usize) -> Screen {
    let keyboard = keyboards::retry_or_back(
        Some(Action::ViewHoldings(wallet.nickname.clone())),
        Action::SelectWallet(wallet.nickname.clone()),
    );
    let header = wallet_header("📊", "Holdings of", wallet);

    if holdings.tokens.is_empty() {
        return Screen::new(
            format!("{}\n\n😕 This wallet holds no tokens.", header),
            keyboard,
        );
    }

    let mut lines = vec![header];
    if let Some(total) = holdings.total_value_usd {
        lines.push(format!("<b>Total value:</b> {}", format_usd(total)));
    }
    lines.push(String::new());

    for (i, token) in holdings.tokens.iter().take(limit).enumerate() {
        let mut line = format!(
            "{}. <b>{}</b>: {}",
            i + 1,
            escape(token.label()),
            format_amount(token.amount)
        );
        if let Some(value) = token.value_usd {
            line.push_str(&format!(" ≈ {}", format_usd(value)));
        }
        if let Some(price) = token.price_usd {
            line.push_str(&format!(" <i>@ {}</i>", format_price(price)));
        }
        lines.push(line);
    }

    if holdings.tokens.len() > limit {
        lines.push(String::new());
        lines.push(format!(
            "<i>...and {} more tokens</i>",
            holdings.tokens.len() - limit
        ));
    }

    Screen::new(lines.join("\n"), keyboard)
}

pub fn transfers(wallet: &WalletEntry, transfers: &[Transfer], limit: usize) -> Screen {
    let title = wallet_header("🔄", "Recent Transfers for", wallet);
    Screen::new(
        transfer_view::transfer_list(&title, transfers, limit),
        keyboards::retry_or_back(
            Some(Action::WalletTransfers(wallet.nickname.clone())),
            Action::SelectWallet(wallet.nickname.clone()),
        ),
    )
}
