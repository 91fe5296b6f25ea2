use rand::seq::IndexedRandom;
use teloxide::utils::html::escape;

use crate::entity::{Menu, Session, State, TokenQuery, WalletEntry};
use crate::utils::MAX_NICKNAME_BYTES;
use crate::view::{keyboards, Screen};

const SOLANA_TIPS: [&str; 5] = [
    "Did you know? Solana orders transactions with Proof of History (PoH).",
    "Tip: Solana wallet addresses are base58 encoded and usually 43 or 44 characters long.",
    "Fact: SPL is the token standard on Solana, similar to ERC-20 on Ethereum.",
    "Did you know? Solana is known for fast confirmations and low fees.",
    "Tip: Always double-check an address before sending tokens!",
];

const LOADING_MESSAGES: [&str; 5] = [
    "⏳ Fetching data from the blockchain...",
    "⏳ Querying the Vybe Network API...",
    "⏳ Processing your request...",
    "⏳ Almost there...",
    "⏳ Compiling information...",
];

fn pick(options: &'static [&'static str]) -> &'static str {
    options.choose(&mut rand::rng()).copied().unwrap_or(options[0])
}

pub fn loading_message() -> &'static str {
    pick(&LOADING_MESSAGES)
}

pub fn welcome() -> Screen {
    Screen::new(
        format!(
            "👋 <b>Welcome to WhaleVybe!</b>\n\n\
             Track Solana wallets and explore token information right from this chat.\n\n\
             <i>{}</i>\n\n\
             Choose an option below to get started:",
            pick(&SOLANA_TIPS)
        ),
        keyboards::main_menu(),
    )
}

pub fn help() -> Screen {
    Screen::new(
        "<b>How it works</b>\n\n\
         Save a wallet ➔ give it a nickname ➔ check its holdings and transfers.\n\
         Token Tools look up any token by its mint address.\n\n\
         /start - main menu\n\
         /help - this message\n\
         /cancel - stop the current action",
        keyboards::main_menu(),
    )
}

pub fn demo() -> Screen {
    Screen::new(
        "🎬 <b>WhaleVybe Demo &amp; How-To</b>\n\n\
         1️⃣ <b>Wallet Management</b>\n\
         \u{20}  - Save a wallet under a nickname.\n\
         \u{20}  - Pick a saved wallet to see its holdings or recent transfers.\n\n\
         2️⃣ <b>Token Tools</b>\n\
         \u{20}  - Get details for any token mint address.\n\
         \u{20}  - View recent transfers of a token.\n\
         \u{20}  - Browse the known instruction names.\n\n\
         3️⃣ Press <b>End Chat</b> when you're finished.\n\n\
         <i>Tip: send /cancel anytime to stop the current action.</i>",
        keyboards::main_menu(),
    )
}

pub fn goodbye() -> Screen {
    Screen::text_only(
        "👋 Thanks for using WhaleVybe! Your saved wallets stay here until the bot restarts.\n\
         Send /start whenever you want to come back.",
    )
}

pub fn menu(menu: &Menu, session: &Session) -> Screen {
    match menu {
        Menu::Main => Screen::new("<b>🏠 Main Menu</b>\nChoose an option:", keyboards::main_menu()),
        Menu::Wallets => Screen::new(
            "<b>💼 Wallet Management</b>\nManage your saved Solana wallets.",
            keyboards::wallet_menu(),
        ),
        Menu::MyWallets => my_wallets(&session.wallets),
        Menu::WalletOptions(nickname) => match session.wallet(nickname) {
            Some(wallet) => wallet_options(wallet),
            None => wallet_missing(nickname, &session.wallets),
        },
        Menu::Tokens => Screen::new(
            "<b>🪙 Token Tools</b>\nExplore Solana token details and transfers.",
            keyboards::token_menu(),
        ),
    }
}

pub fn my_wallets(wallets: &[WalletEntry]) -> Screen {
    let text = if wallets.is_empty() {
        "<b>⭐ My Wallets</b>\nYou haven't saved any wallets yet.".to_string()
    } else {
        format!(
            "<b>⭐ My Wallets</b> ({})\nSelect a wallet to see its options:",
            wallets.len()
        )
    };
    Screen::new(text, keyboards::my_wallets(wallets))
}

pub fn wallet_options(wallet: &WalletEntry) -> Screen {
    Screen::new(
        format!(
            "💼 <b>{}</b>\n<code>{}</code>\n\nWhat would you like to do?",
            escape(&wallet.nickname),
            escape(&wallet.address)
        ),
        keyboards::wallet_options(&wallet.nickname),
    )
}

pub fn wallet_missing(nickname: &str, wallets: &[WalletEntry]) -> Screen {
    Screen::new(
        format!(
            "😕 Wallet <b>{}</b> was not found. It may have been deleted.",
            escape(nickname)
        ),
        keyboards::my_wallets(wallets),
    )
}

pub fn cancelled(menu: &Menu, session: &Session) -> Screen {
    let target = match menu {
        Menu::Wallets => "Wallet Management",
        Menu::Tokens => "Token Tools",
        _ => "Main Menu",
    };
    let home = self::menu(menu, session);
    Screen {
        text: format!("<i>Action cancelled.</i> Back to {}.\n\n{}", target, home.text),
        keyboard: home.keyboard,
    }
}

/// Question for the input `state` waits for.
pub fn prompt(state: &State) -> Screen {
    let text = match state {
        State::AwaitingWalletNickname => format!(
            "<b>Step 1 of 2:</b> Choose a nickname for the wallet (up to {} bytes).",
            MAX_NICKNAME_BYTES
        ),
        State::AwaitingWalletAddress { nickname } => format!(
            "<b>Step 2 of 2:</b> Send the Solana address to save as <b>{}</b>.",
            escape(nickname)
        ),
        State::AwaitingTokenQuery(TokenQuery::Details) => {
            "<b>🪙 Token Details</b>\nSend the token mint address.".to_string()
        }
        State::AwaitingTokenQuery(TokenQuery::Transfers) => {
            "<b>🔄 Token Transfers</b>\nSend the token mint address.".to_string()
        }
        State::Idle | State::ViewingMenu(_) => return unrecognized(),
    };
    Screen::new(
        format!("{}\n\n<i>Send /cancel to stop.</i>", text),
        keyboards::cancel_only(),
    )
}

pub fn reprompt(state: &State, reason: &str) -> Screen {
    let prompt = prompt(state);
    Screen {
        text: format!("⚠️ {}\n\n{}", escape(reason), prompt.text),
        keyboard: prompt.keyboard,
    }
}

pub fn unrecognized() -> Screen {
    Screen::new(
        "🤔 Sorry, I didn't understand that. Please use the menu below.",
        keyboards::main_menu(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::callback_data;

    #[test]
    fn welcome_includes_a_tip_and_root_menu() {
        let screen = welcome();
        assert!(SOLANA_TIPS.iter().any(|tip| screen.text.contains(tip)));
        let data = callback_data(screen.keyboard.as_ref().unwrap());
        assert_eq!(data, vec!["wallet:menu", "token:menu", "main:demo", "main:end"]);
    }

    #[test]
    fn user_text_is_escaped() {
        let session = Session {
            wallets: vec![WalletEntry::new(
                "<b>evil</b>",
                "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            )],
            ..Session::default()
        };
        let screen = menu(&Menu::WalletOptions("<b>evil</b>".into()), &session);
        assert!(screen.text.contains("&lt;b&gt;evil&lt;/b&gt;"));
        assert!(!screen.text.contains("<b>evil"));
    }

    #[test]
    fn reprompt_explains_and_asks_again() {
        let state = State::AwaitingWalletAddress {
            nickname: "MyWhale".into(),
        };
        let screen = reprompt(&state, "That doesn't look like a valid Solana address.");
        assert!(screen.text.contains("doesn&#39;t look like") || screen.text.contains("doesn't look like"));
        assert!(screen.text.contains("<b>MyWhale</b>"));
        assert_eq!(callback_data(screen.keyboard.as_ref().unwrap()), vec!["nav:cancel"]);
    }

    #[test]
    fn cancel_returns_to_the_flow_menu() {
        let screen = cancelled(&Menu::Tokens, &Session::default());
        assert!(screen.text.starts_with("<i>Action cancelled.</i> Back to Token Tools."));
        assert_eq!(
            callback_data(screen.keyboard.as_ref().unwrap())[0],
            "token:details"
        );
    }

    #[test]
    fn missing_wallet_falls_back_to_wallet_list() {
        let screen = menu(&Menu::WalletOptions("Ghost".into()), &Session::default());
        assert!(screen.text.contains("Ghost"));
        assert_eq!(callback_data(screen.keyboard.as_ref().unwrap())[0], "wallet:save");
    }

    #[test]
    fn goodbye_removes_the_keyboard() {
        assert!(goodbye().keyboard.is_none());
    }
}
