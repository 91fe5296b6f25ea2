use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::flow::handle_event;
use crate::di::ServiceContainer;
use crate::router::transition::Event;
use crate::router::Action;
use crate::view::TelegramChatView;

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query: {}", err);
    }

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };

    let chat_id = match q.message {
        Some(ref msg) => msg.chat().id,
        None => ChatId(q.from.id.0 as i64),
    };

    info!("Received callback {} from user {}", data, q.from.id);

    let Some(action) = Action::decode(data) else {
        warn!("Ignoring unknown callback data {:?}", data);
        return Ok(());
    };

    let view = match q.regular_message() {
        Some(message) => TelegramChatView::editing(bot, chat_id, message.id),
        None => TelegramChatView::new(bot, chat_id),
    };

    handle_event(chat_id, Event::Press(action), Arc::new(view), &services).await
}
