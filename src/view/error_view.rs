use teloxide::utils::html::escape;

use crate::entity::{BotError, ErrorKind};
use crate::router::Action;
use crate::view::{keyboards, Screen};

/// A failed lookup. Transient failures get a Retry button.
pub fn query_failed(error: &BotError, retry: Action, back: Action) -> Screen {
    match error.kind() {
        ErrorKind::InvalidInput => {
            let text = match error {
                BotError::InvalidAddress(message) => format!(
                    "⚠️ The data provider rejected that address.\n<i>{}</i>",
                    escape(message)
                ),
                BotError::NotFound(_) => {
                    "😕 Nothing was found for that address. Check it and try again.".to_string()
                }
                other => format!("⚠️ {}", escape(&other.to_string())),
            };
            Screen::new(text, keyboards::back_to(back))
        }
        ErrorKind::UpstreamUnavailable => Screen::new(
            "🙁 The data provider is not responding right now. Please try again in a moment.",
            keyboards::retry_or_back(Some(retry), back),
        ),
        ErrorKind::RateLimited => {
            let wait = match error {
                BotError::RateLimited { retry_after_secs } => *retry_after_secs,
                _ => 0,
            };
            Screen::new(
                format!(
                    "⏳ Too many requests right now. Please wait about {} seconds, then retry.",
                    wait
                ),
                keyboards::retry_or_back(Some(retry), back),
            )
        }
        ErrorKind::Internal => internal_error(),
    }
}

pub fn internal_error() -> Screen {
    Screen::new(
        "🙁 Sorry, something went wrong on our side. Let's start over from the main menu.",
        keyboards::main_menu(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::callback_data;

    fn buttons(screen: &Screen) -> Vec<String> {
        callback_data(screen.keyboard.as_ref().unwrap())
    }

    #[test]
    fn each_error_kind_reads_differently() {
        let retry = Action::InstructionNames;
        let back = Action::TokenMenu;
        let texts: Vec<String> = [
            BotError::InvalidAddress("bad <mint>".into()),
            BotError::NotFound("x".into()),
            BotError::UpstreamUnavailable("HTTP 502".into()),
            BotError::RateLimited {
                retry_after_secs: 12,
            },
            BotError::Internal("boom".into()),
        ]
        .iter()
        .map(|e| query_failed(e, retry.clone(), back.clone()).text)
        .collect();

        for (i, a) in texts.iter().enumerate() {
            for b in texts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(texts[0].contains("bad &lt;mint&gt;"));
        assert!(texts[3].contains("about 12 seconds"));
        assert!(!texts[4].contains("boom"));
    }

    #[test]
    fn only_retryable_errors_offer_retry() {
        let retry = Action::ViewHoldings("MyWhale".into());
        let back = Action::SelectWallet("MyWhale".into());

        let upstream = query_failed(
            &BotError::UpstreamUnavailable("timeout".into()),
            retry.clone(),
            back.clone(),
        );
        assert_eq!(buttons(&upstream)[0], "wallet:holdings:MyWhale");

        let invalid = query_failed(&BotError::NotFound("x".into()), retry, back);
        assert_eq!(buttons(&invalid), vec!["wallet:select:MyWhale", "main:menu"]);
    }
}
