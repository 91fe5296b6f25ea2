use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use crate::di::ServiceContainer;
use crate::router::transition::Event;
use crate::view::TelegramChatView;

pub mod callback;
pub mod flow;
pub mod input;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// Event the command feeds into the conversation
    fn event() -> Event;

    /// Execute the command
    async fn execute(bot: Bot, msg: Message, services: Arc<ServiceContainer>) -> Result<()> {
        let chat_id = msg.chat.id;
        info!("/{} from chat {}", Self::command_name(), chat_id);

        let view = Arc::new(TelegramChatView::new(bot, chat_id));
        flow::handle_event(chat_id, Self::event(), view, &services).await
    }
}

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn event() -> Event {
        Event::Start
    }
}

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn event() -> Event {
        Event::Help
    }
}

pub struct CancelCommand;

impl CommandHandler for CancelCommand {
    fn command_name() -> &'static str {
        "cancel"
    }

    fn event() -> Event {
        Event::Cancel
    }
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the main menu")]
    Start,
    #[command(description = "explain how the bot works")]
    Help,
    #[command(description = "stop the current action")]
    Cancel,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    match cmd {
        Command::Start => StartCommand::execute(bot, msg, services).await,
        Command::Help => HelpCommand::execute(bot, msg, services).await,
        Command::Cancel => CancelCommand::execute(bot, msg, services).await,
    }
}
