mod bot_error;
mod holdings;
mod state;
mod token_info;
mod transfer;
mod wallet;

pub use bot_error::{BotError, BotResult, ErrorKind};
pub use holdings::{Holdings, TokenHolding};
pub use state::{Menu, Nav, Session, State, TokenQuery};
pub use token_info::TokenInfo;
pub use transfer::{Transfer, TransferTarget};
pub use wallet::WalletEntry;
