//! WhaleVybe Telegram bot - main executable
//!
//! Lets users save Solana wallets under nicknames and look up holdings,
//! transfers and token details through the Vybe Network API.
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;
use teloxide::{dptree, prelude::*, utils::command::BotCommands};

use whale_vybe_bot::commands::Command;
use whale_vybe_bot::{AppConfig, Router, ServiceContainer, TelegramRouter};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting WhaleVybe Telegram Bot v{}", whale_vybe_bot::VERSION);

    // Load and validate configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Using Vybe API at {}", config.vybe_api_url);

    // Create Telegram bot instance
    let bot = Bot::new(config.telegram_bot_token.trim());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    info!("Initializing bot application...");
    let services = Arc::new(
        ServiceContainer::new(&config).context("Failed to initialize services")?,
    );
    let router = TelegramRouter::new(services.clone());
    let handler = router.setup_handlers();

    // Build dispatcher with dependency injections and control-C handling
    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![services])
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    info!("Bot stopped");
    Ok(())
}
