use teloxide::utils::html::escape;

use crate::entity::Transfer;
use crate::utils::{format_amount, format_timestamp, format_usd, shorten_address};

fn short_or_unknown(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => format!("<code>{}</code>", escape(&shorten_address(value))),
        _ => "?".to_string(),
    }
}

fn transfer_block(index: usize, transfer: &Transfer) -> String {
    let mut lines = vec![
        format!("<b>📤 Transfer #{}</b>", index),
        format!("<b>Token:</b> {}", short_or_unknown(transfer.mint.as_deref())),
    ];

    let amount = match (transfer.amount, transfer.value_usd) {
        (Some(amount), Some(value)) => format!("{} ({})", format_amount(amount), format_usd(value)),
        (Some(amount), None) => format_amount(amount),
        (None, _) => "?".to_string(),
    };
    lines.push(format!("<b>Amount:</b> {}", amount));
    lines.push(format!("<b>From:</b> {}", short_or_unknown(transfer.sender.as_deref())));
    lines.push(format!("<b>To:</b> {}", short_or_unknown(transfer.receiver.as_deref())));
    lines.push(format!(
        "<b>Time:</b> {}",
        transfer
            .block_time
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| "?".to_string())
    ));

    if let Some(instruction) = transfer
        .instruction
        .as_deref()
        .filter(|i| !i.is_empty() && *i != "Transfer")
    {
        lines.push(format!("<b>Type:</b> {}", escape(instruction)));
    }

    lines.join("\n")
}

/// Up to `limit` transfers under `title`, or the empty message.
pub fn transfer_list(title: &str, transfers: &[Transfer], limit: usize) -> String {
    if transfers.is_empty() {
        return format!("{}\n\n😕 No recent transfers found.", title);
    }

    let mut sections = vec![title.to_string()];
    sections.extend(
        transfers
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, t)| transfer_block(i + 1, t)),
    );
    if transfers.len() > limit {
        sections.push(format!(
            "<i>...and {} more transfers</i>",
            transfers.len() - limit
        ));
    }
    sections.join("\n\n")
}
