//! The conversation state machine.
//!
//! `transition` maps the current session and an incoming event to the next
//! state, a back-stack move and the effect to run. It performs no I/O, so
//! every path through the bot is covered by the tests below.

use crate::entity::{BotError, Menu, Nav, Session, State, TokenQuery, WalletEntry};
use crate::router::callback_data::Action;
use crate::utils::{parse_solana_address, validate_nickname};

/// Something the user did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Start,
    Help,
    Cancel,
    Press(Action),
    Text(String),
}

/// What to do once the session has moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Welcome,
    Help,
    ShowMenu(Menu),
    /// Ask for the input the next state waits for
    Prompt,
    /// Ask again, explaining what was wrong
    Reprompt(String),
    Cancelled(Menu),
    Demo,
    EndChat,
    Unrecognized,
    WalletMissing(String),
    SaveWallet(WalletEntry),
    ConfirmDelete(String),
    DeleteWallet(String),
    FetchHoldings(String),
    FetchWalletTransfers(String),
    FetchTokenInfo(String),
    FetchTokenTransfers(String),
    FetchInstructionNames,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: State,
    pub nav: Nav,
    pub effect: Effect,
}

impl Transition {
    fn new(next: State, nav: Nav, effect: Effect) -> Self {
        Self { next, nav, effect }
    }

    fn show(menu: Menu) -> Self {
        let next = viewing(&menu);
        Self::new(next, Nav::Enter(menu.clone()), Effect::ShowMenu(menu))
    }

    fn stay(session: &Session, effect: Effect) -> Self {
        Self::new(session.state.clone(), Nav::Keep, effect)
    }

    fn wallet_missing(nickname: &str) -> Self {
        Self::new(
            State::ViewingMenu(Menu::MyWallets),
            Nav::Enter(Menu::MyWallets),
            Effect::WalletMissing(nickname.to_string()),
        )
    }
}

fn viewing(menu: &Menu) -> State {
    match menu {
        Menu::Main => State::Idle,
        other => State::ViewingMenu(other.clone()),
    }
}

pub fn transition(session: &Session, event: &Event) -> Transition {
    match event {
        Event::Start => Transition::new(State::Idle, Nav::Root, Effect::Welcome),
        Event::Help => Transition::stay(session, Effect::Help),
        Event::Cancel => cancel(session),
        Event::Press(action) => press(session, action),
        Event::Text(text) => text_input(session, text),
    }
}

fn cancel(session: &Session) -> Transition {
    let menu = session.state.home_menu();
    let nav = if menu == Menu::Main {
        Nav::Root
    } else {
        Nav::Enter(menu.clone())
    };
    Transition::new(State::Idle, nav, Effect::Cancelled(menu))
}

fn press(session: &Session, action: &Action) -> Transition {
    match action {
        Action::MainMenu => Transition::new(State::Idle, Nav::Root, Effect::ShowMenu(Menu::Main)),
        Action::WalletMenu => Transition::show(Menu::Wallets),
        Action::MyWallets => Transition::show(Menu::MyWallets),
        Action::TokenMenu => Transition::show(Menu::Tokens),
        Action::Back => {
            let parent = session.parent_menu();
            Transition::new(viewing(&parent), Nav::Back, Effect::ShowMenu(parent))
        }
        Action::Cancel => cancel(session),
        Action::Demo => Transition::new(State::Idle, Nav::Root, Effect::Demo),
        Action::EndChat => Transition::new(State::Idle, Nav::Clear, Effect::EndChat),

        Action::SaveWallet => Transition::new(
            State::AwaitingWalletNickname,
            Nav::Enter(Menu::Wallets),
            Effect::Prompt,
        ),
        Action::SelectWallet(nick) => match session.wallet(nick) {
            Some(wallet) => Transition::show(Menu::WalletOptions(wallet.nickname.clone())),
            None => Transition::wallet_missing(nick),
        },
        Action::ViewHoldings(nick) => on_wallet(session, nick, Effect::FetchHoldings),
        Action::WalletTransfers(nick) => on_wallet(session, nick, Effect::FetchWalletTransfers),
        Action::DeleteWallet(nick) => on_wallet(session, nick, Effect::ConfirmDelete),
        Action::ConfirmDelete(nick) => match session.wallet(nick) {
            Some(wallet) => Transition::new(
                State::ViewingMenu(Menu::MyWallets),
                Nav::Enter(Menu::MyWallets),
                Effect::DeleteWallet(wallet.nickname.clone()),
            ),
            None => Transition::wallet_missing(nick),
        },

        Action::TokenDetails => Transition::new(
            State::AwaitingTokenQuery(TokenQuery::Details),
            Nav::Enter(Menu::Tokens),
            Effect::Prompt,
        ),
        Action::TokenTransfers => Transition::new(
            State::AwaitingTokenQuery(TokenQuery::Transfers),
            Nav::Enter(Menu::Tokens),
            Effect::Prompt,
        ),
        Action::TokenDetailsFor(mint) => token_result(Effect::FetchTokenInfo(mint.clone())),
        Action::TokenTransfersFor(mint) => {
            token_result(Effect::FetchTokenTransfers(mint.clone()))
        }
        Action::InstructionNames => token_result(Effect::FetchInstructionNames),
    }
}

// Wallet buttons carry the nickname, which may have been deleted since
fn on_wallet(session: &Session, nick: &str, effect: fn(String) -> Effect) -> Transition {
    match session.wallet(nick) {
        Some(wallet) => {
            let menu = Menu::WalletOptions(wallet.nickname.clone());
            Transition::new(
                State::ViewingMenu(menu.clone()),
                Nav::Enter(menu),
                effect(wallet.nickname.clone()),
            )
        }
        None => Transition::wallet_missing(nick),
    }
}

fn token_result(effect: Effect) -> Transition {
    Transition::new(
        State::ViewingMenu(Menu::Tokens),
        Nav::Enter(Menu::Tokens),
        effect,
    )
}

fn text_input(session: &Session, text: &str) -> Transition {
    match &session.state {
        State::AwaitingWalletNickname => match validate_nickname(text) {
            Err(e) => Transition::stay(session, Effect::Reprompt(e.to_string())),
            Ok(nickname) => match session.wallet(&nickname) {
                Some(existing) => Transition::stay(
                    session,
                    Effect::Reprompt(BotError::NicknameTaken(existing.nickname.clone()).to_string()),
                ),
                None => Transition::new(
                    State::AwaitingWalletAddress { nickname },
                    Nav::Keep,
                    Effect::Prompt,
                ),
            },
        },
        State::AwaitingWalletAddress { nickname } => match parse_solana_address(text) {
            Err(e) => Transition::stay(session, Effect::Reprompt(e.to_string())),
            Ok(address) => match session.wallet_by_address(&address) {
                Some(existing) => Transition::stay(
                    session,
                    Effect::Reprompt(
                        BotError::DuplicateAddress(existing.nickname.clone()).to_string(),
                    ),
                ),
                None => {
                    let menu = Menu::WalletOptions(nickname.clone());
                    Transition::new(
                        State::ViewingMenu(menu.clone()),
                        Nav::Enter(menu),
                        Effect::SaveWallet(WalletEntry::new(nickname.clone(), address)),
                    )
                }
            },
        },
        State::AwaitingTokenQuery(query) => match parse_solana_address(text) {
            Err(e) => Transition::stay(session, Effect::Reprompt(e.to_string())),
            Ok(mint) => {
                let effect = match query {
                    TokenQuery::Details => Effect::FetchTokenInfo(mint),
                    TokenQuery::Transfers => Effect::FetchTokenTransfers(mint),
                };
                Transition::new(State::ViewingMenu(Menu::Tokens), Nav::Keep, effect)
            }
        },
        State::Idle | State::ViewingMenu(_) => {
            Transition::new(State::Idle, Nav::Root, Effect::Unrecognized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHALE: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";
    const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    fn in_state(state: State) -> Session {
        Session {
            state,
            ..Session::default()
        }
    }

    fn with_wallet() -> Session {
        Session {
            state: State::ViewingMenu(Menu::MyWallets),
            menu_stack: vec![Menu::Main, Menu::Wallets, Menu::MyWallets],
            wallets: vec![WalletEntry::new("MyWhale", WHALE)],
            updated_at: None,
        }
    }

    fn press(session: &Session, action: Action) -> Transition {
        transition(session, &Event::Press(action))
    }

    fn text(session: &Session, input: &str) -> Transition {
        transition(session, &Event::Text(input.to_string()))
    }

    #[test]
    fn start_resets_to_root_menu() {
        let session = in_state(State::AwaitingWalletNickname);
        let t = transition(&session, &Event::Start);
        assert_eq!(t, Transition::new(State::Idle, Nav::Root, Effect::Welcome));
    }

    #[test]
    fn help_keeps_the_current_state() {
        let session = in_state(State::AwaitingTokenQuery(TokenQuery::Details));
        let t = transition(&session, &Event::Help);
        assert_eq!(t.next, session.state);
        assert_eq!(t.effect, Effect::Help);
    }

    #[test]
    fn cancel_from_every_awaiting_state_returns_to_idle() {
        let cases = [
            (State::AwaitingWalletNickname, Menu::Wallets),
            (
                State::AwaitingWalletAddress {
                    nickname: "MyWhale".into(),
                },
                Menu::Wallets,
            ),
            (State::AwaitingTokenQuery(TokenQuery::Details), Menu::Tokens),
            (State::AwaitingTokenQuery(TokenQuery::Transfers), Menu::Tokens),
        ];

        for (state, home) in cases {
            let session = in_state(state.clone());
            for event in [Event::Cancel, Event::Press(Action::Cancel)] {
                let t = transition(&session, &event);
                assert_eq!(t.next, State::Idle, "{state:?}");
                assert_eq!(t.effect, Effect::Cancelled(home.clone()));
                assert_eq!(t.nav, Nav::Enter(home.clone()));
            }
        }
    }

    #[test]
    fn cancel_without_pending_input_goes_home() {
        let t = transition(&in_state(State::ViewingMenu(Menu::Tokens)), &Event::Cancel);
        assert_eq!(t, Transition::new(State::Idle, Nav::Root, Effect::Cancelled(Menu::Main)));
    }

    #[test]
    fn menu_buttons_update_state_and_stack() {
        let session = Session::default();
        assert_eq!(
            press(&session, Action::WalletMenu),
            Transition::new(
                State::ViewingMenu(Menu::Wallets),
                Nav::Enter(Menu::Wallets),
                Effect::ShowMenu(Menu::Wallets)
            )
        );
        assert_eq!(
            press(&session, Action::MainMenu),
            Transition::new(State::Idle, Nav::Root, Effect::ShowMenu(Menu::Main))
        );
        assert_eq!(press(&session, Action::TokenMenu).next, State::ViewingMenu(Menu::Tokens));
    }

    #[test]
    fn back_shows_the_parent_menu() {
        let session = with_wallet();
        let t = press(&session, Action::Back);
        assert_eq!(t.next, State::ViewingMenu(Menu::Wallets));
        assert_eq!(t.nav, Nav::Back);
        assert_eq!(t.effect, Effect::ShowMenu(Menu::Wallets));

        let t = press(&Session::default(), Action::Back);
        assert_eq!(t.next, State::Idle);
        assert_eq!(t.effect, Effect::ShowMenu(Menu::Main));
    }

    #[test]
    fn save_wallet_flow_asks_nickname_then_address() {
        let t = press(&Session::default(), Action::SaveWallet);
        assert_eq!(t.next, State::AwaitingWalletNickname);
        assert_eq!(t.effect, Effect::Prompt);

        let t = text(&in_state(State::AwaitingWalletNickname), "  MyWhale ");
        assert_eq!(
            t.next,
            State::AwaitingWalletAddress {
                nickname: "MyWhale".into()
            }
        );
        assert_eq!(t.effect, Effect::Prompt);

        let session = in_state(State::AwaitingWalletAddress {
            nickname: "MyWhale".into(),
        });
        let t = text(&session, WHALE);
        assert_eq!(
            t.effect,
            Effect::SaveWallet(WalletEntry::new("MyWhale", WHALE))
        );
        assert_eq!(t.next, State::ViewingMenu(Menu::WalletOptions("MyWhale".into())));
    }

    #[test]
    fn taken_nickname_is_reprompted() {
        let mut session = with_wallet();
        session.state = State::AwaitingWalletNickname;
        let t = text(&session, "mywhale");
        assert_eq!(t.next, State::AwaitingWalletNickname);
        assert!(matches!(t.effect, Effect::Reprompt(ref m) if m.contains("MyWhale")));
    }

    #[test]
    fn invalid_address_keeps_waiting_for_one() {
        let session = in_state(State::AwaitingWalletAddress {
            nickname: "MyWhale".into(),
        });
        let t = text(&session, "definitely not base58 0OIl");
        assert_eq!(t.next, session.state);
        assert_eq!(t.nav, Nav::Keep);
        assert!(matches!(t.effect, Effect::Reprompt(_)));
    }

    #[test]
    fn already_saved_address_is_reprompted() {
        let mut session = with_wallet();
        session.state = State::AwaitingWalletAddress {
            nickname: "Second".into(),
        };
        let t = text(&session, WHALE);
        assert!(matches!(t.effect, Effect::Reprompt(ref m) if m.contains("MyWhale")));
    }

    #[test]
    fn token_queries_fetch_after_valid_mint() {
        let session = in_state(State::AwaitingTokenQuery(TokenQuery::Details));
        let t = text(&session, USDC);
        assert_eq!(t.effect, Effect::FetchTokenInfo(USDC.into()));
        assert_eq!(t.next, State::ViewingMenu(Menu::Tokens));

        let session = in_state(State::AwaitingTokenQuery(TokenQuery::Transfers));
        assert_eq!(text(&session, USDC).effect, Effect::FetchTokenTransfers(USDC.into()));

        assert_eq!(
            press(&Session::default(), Action::InstructionNames).effect,
            Effect::FetchInstructionNames
        );
    }

    #[test]
    fn free_text_outside_a_prompt_is_not_understood() {
        for state in [State::Idle, State::ViewingMenu(Menu::Wallets)] {
            let t = text(&in_state(state), "hello");
            assert_eq!(t, Transition::new(State::Idle, Nav::Root, Effect::Unrecognized));
        }
    }

    #[test]
    fn wallet_buttons_resolve_nickname_case_insensitively() {
        let session = with_wallet();
        let t = press(&session, Action::ViewHoldings("mywhale".into()));
        assert_eq!(t.effect, Effect::FetchHoldings("MyWhale".into()));
        assert_eq!(t.next, State::ViewingMenu(Menu::WalletOptions("MyWhale".into())));

        assert_eq!(
            press(&session, Action::WalletTransfers("MyWhale".into())).effect,
            Effect::FetchWalletTransfers("MyWhale".into())
        );
    }

    #[test]
    fn delete_requires_confirmation() {
        let session = with_wallet();
        assert_eq!(
            press(&session, Action::DeleteWallet("MyWhale".into())).effect,
            Effect::ConfirmDelete("MyWhale".into())
        );
        let t = press(&session, Action::ConfirmDelete("MyWhale".into()));
        assert_eq!(t.effect, Effect::DeleteWallet("MyWhale".into()));
        assert_eq!(t.next, State::ViewingMenu(Menu::MyWallets));
    }

    #[test]
    fn stale_wallet_button_reports_missing_wallet() {
        let t = press(&Session::default(), Action::SelectWallet("Ghost".into()));
        assert_eq!(t.effect, Effect::WalletMissing("Ghost".into()));
        assert_eq!(t.next, State::ViewingMenu(Menu::MyWallets));
    }

    #[test]
    fn end_chat_clears_navigation() {
        let t = press(&with_wallet(), Action::EndChat);
        assert_eq!(t, Transition::new(State::Idle, Nav::Clear, Effect::EndChat));
    }
}
