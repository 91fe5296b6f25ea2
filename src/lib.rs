pub mod commands;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod utils;
pub mod view;
pub mod vybe;

// Re-export commonly used items
pub use config::AppConfig;
pub use di::{ServiceContainer, Settings};
pub use entity::*;
pub use router::{Router, TelegramRouter};
pub use view::{ChatView, Screen, TelegramChatView};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
