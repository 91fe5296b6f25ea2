pub mod portfolio_interactor;
pub mod session_store;
pub mod token_interactor;

pub use portfolio_interactor::{PortfolioInteractor, PortfolioInteractorImpl};
pub use session_store::{InMemorySessionStore, SessionStore};
pub use token_interactor::{TokenInteractor, TokenInteractorImpl};
