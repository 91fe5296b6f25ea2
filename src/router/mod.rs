use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::commands::{self, callback::handle_callback, input::handle_text, Command};
use crate::di::ServiceContainer;

pub mod callback_data;
pub mod transition;

pub use callback_data::Action;
pub use transition::{transition, Effect, Event, Transition};

// Base router trait
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        let services_for_commands = self.services.clone();
        let services_for_text = self.services.clone();
        let services_for_callbacks = self.services.clone();

        // Use Command enum with teloxide's command filter
        let command_handler = teloxide::filter_command::<Command, _>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let services = services_for_commands.clone();
                async move { commands::handle_command(bot, msg, cmd, services).await }
            },
        );

        // Everything else typed into the chat
        let message_handler = Update::filter_message().branch(command_handler).endpoint(
            move |bot: Bot, msg: Message| {
                let services = services_for_text.clone();
                async move { handle_text(bot, msg, services).await }
            },
        );

        // Add callback query handler for our buttons
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, services).await }
            },
        );

        dptree::entry()
            .branch(message_handler)
            .branch(callback_handler)
    }
}
