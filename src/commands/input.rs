use anyhow::Result;
use log::debug;
use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::flow::handle_event;
use crate::di::ServiceContainer;
use crate::router::transition::Event;
use crate::view::TelegramChatView;

/// Any message that is not a known command. Non-text messages count as
/// empty text, so a pending prompt is simply asked again.
pub async fn handle_text(bot: Bot, msg: Message, services: Arc<ServiceContainer>) -> Result<()> {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default().to_string();
    debug!("Text input from chat {}", chat_id);

    let view = Arc::new(TelegramChatView::new(bot, chat_id));
    handle_event(chat_id, Event::Text(text), view, &services).await
}
