pub mod menu_presenter;
pub mod token_presenter;
pub mod wallet_presenter;

pub use menu_presenter::{MenuPresenter, MenuPresenterImpl};
pub use token_presenter::{TokenPresenter, TokenPresenterImpl};
pub use wallet_presenter::{WalletPresenter, WalletPresenterImpl};
