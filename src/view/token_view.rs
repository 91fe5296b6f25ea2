use teloxide::utils::html::escape;

use crate::entity::{TokenInfo, Transfer};
use crate::router::Action;
use crate::utils::{
    format_amount, format_percent, format_price, format_timestamp, format_usd, shorten_address,
};
use crate::view::{keyboards, transfer_view, Screen};

pub const INSTRUCTION_NAMES_LIMIT: usize = 50;

/// Buttons link to `mint`, the address the user asked about.
pub fn token_info(mint: &str, info: &TokenInfo) -> Screen {
    let title = match (&info.name, &info.symbol) {
        (Some(name), Some(symbol)) => format!("{} ({})", escape(name), escape(symbol)),
        (Some(name), None) => escape(name),
        (None, Some(symbol)) => escape(symbol),
        (None, None) => escape(&shorten_address(&info.mint)),
    };

    let mut lines = vec![
        format!("🪙 <b>{}</b>", title),
        format!("<code>{}</code>", escape(&info.mint)),
        String::new(),
    ];

    if let Some(price) = info.price_usd {
        let change = info
            .price_change_24h_pct
            .map(|pct| format!(" ({} 24h)", format_percent(pct)))
            .unwrap_or_default();
        lines.push(format!("<b>Price:</b> {}{}", format_price(price), change));
    }
    if let Some(market_cap) = info.market_cap_usd {
        lines.push(format!("<b>Market cap:</b> {}", format_usd(market_cap)));
    }
    if let Some(volume) = info.volume_24h_usd {
        lines.push(format!("<b>24h volume:</b> {}", format_usd(volume)));
    }
    if let Some(supply) = info.supply {
        lines.push(format!("<b>Supply:</b> {}", format_amount(supply)));
    }
    if let Some(decimals) = info.decimals {
        lines.push(format!("<b>Decimals:</b> {}", decimals));
    }
    if let Some(category) = info.category.as_deref().filter(|c| !c.is_empty()) {
        lines.push(format!("<b>Category:</b> {}", escape(category)));
    }
    if let Some(verified) = info.verified {
        lines.push(format!(
            "<b>Verified:</b> {}",
            if verified { "✅ yes" } else { "❌ no" }
        ));
    }
    if let Some(updated_at) = &info.updated_at {
        lines.push(format!("\n<i>Updated {}</i>", format_timestamp(updated_at)));
    }

    Screen::new(
        lines.join("\n"),
        teloxide::types::InlineKeyboardMarkup::new(vec![
            vec![keyboards::button(
                "🔄 Recent Transfers",
                Action::TokenTransfersFor(mint.to_string()),
            )],
            vec![
                keyboards::button("🔁 Refresh", Action::TokenDetailsFor(mint.to_string())),
                keyboards::button("⬅️ Back", Action::TokenMenu),
            ],
        ]),
    )
}

pub fn token_transfers(mint: &str, transfers: &[Transfer], limit: usize) -> Screen {
    let title = format!(
        "🔄 <b>Recent Transfers of</b> <code>{}</code>",
        escape(&shorten_address(mint))
    );
    Screen::new(
        transfer_view::transfer_list(&title, transfers, limit),
        keyboards::retry_or_back(
            Some(Action::TokenTransfersFor(mint.to_string())),
            Action::TokenMenu,
        ),
    )
}

pub fn instruction_names(names: &[String]) -> Screen {
    let keyboard = keyboards::back_to(Action::TokenMenu);
    if names.is_empty() {
        return Screen::new(
            "😕 No instruction names are available right now.",
            keyboard,
        );
    }

    let mut lines = vec!["<b>📝 Solana Instruction Names</b>".to_string(), String::new()];
    lines.extend(
        names
            .iter()
            .take(INSTRUCTION_NAMES_LIMIT)
            .map(|name| format!("• <code>{}</code>", escape(name))),
    );
    if names.len() > INSTRUCTION_NAMES_LIMIT {
        lines.push(String::new());
        lines.push(format!(
            "<i>...and {} more instruction names</i>",
            names.len() - INSTRUCTION_NAMES_LIMIT
        ));
    }
    Screen::new(lines.join("\n"), keyboard)
}
