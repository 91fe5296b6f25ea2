use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::entity::{BotError, BotResult};

/// Longest nickname we accept, in bytes. Keeps callback data under
/// Telegram's 64-byte limit.
pub const MAX_NICKNAME_BYTES: usize = 32;

lazy_static! {
    static ref BASE58_ADDRESS: Regex = Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").unwrap();
}

// Validate Solana address: base58 charset, 32..=44 chars, 32 decoded bytes
pub fn validate_solana_address(address: &str) -> bool {
    if !BASE58_ADDRESS.is_match(address) {
        return false;
    }

    matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == 32)
}

// Users paste addresses with stray spaces and line breaks
pub fn normalize_address(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn parse_solana_address(input: &str) -> BotResult<String> {
    let address = normalize_address(input);
    if validate_solana_address(&address) {
        Ok(address)
    } else {
        Err(BotError::InvalidInput(
            "That doesn't look like a valid Solana address.".to_string(),
        ))
    }
}

/// Trims and checks a wallet nickname. Uniqueness is checked by the session.
pub fn validate_nickname(input: &str) -> BotResult<String> {
    let nickname = input.trim();

    if nickname.is_empty() {
        return Err(BotError::InvalidInput(
            "Nickname cannot be empty.".to_string(),
        ));
    }
    if nickname.len() > MAX_NICKNAME_BYTES {
        return Err(BotError::InvalidInput(format!(
            "Nickname is too long (max {} bytes).",
            MAX_NICKNAME_BYTES
        )));
    }
    if nickname.starts_with('/') {
        return Err(BotError::InvalidInput(
            "Nickname cannot start with '/'.".to_string(),
        ));
    }
    if nickname.chars().any(char::is_control) {
        return Err(BotError::InvalidInput(
            "Nickname must be a single line of text.".to_string(),
        ));
    }

    Ok(nickname.to_string())
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let start: String = chars[..5].iter().collect();
    let end: String = chars[chars.len() - 5..].iter().collect();

    format!("{}...{}", start, end)
}

/// Token amount with at most 6 decimals and thousands separators.
pub fn format_amount(amount: Decimal) -> String {
    group_thousands(
        amount
            .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
    )
}

/// `$1,234.56`
pub fn format_usd(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", group_thousands(rounded.abs()))
    } else {
        format!("${}", group_thousands(rounded.abs()))
    }
}

/// Small prices need more digits than `format_usd` gives them.
pub fn format_price(value: Decimal) -> String {
    if value.abs() >= Decimal::ONE {
        format_usd(value)
    } else {
        format!(
            "${}",
            value
                .round_dp_with_strategy(8, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
        )
    }
}

pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_positive() && !rounded.is_zero() {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}

pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn group_thousands(value: Decimal) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Cuts `text` to at most `max_chars` characters, marking the cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
