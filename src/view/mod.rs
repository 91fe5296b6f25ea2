use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardMarkup, MessageId, ParseMode},
    ApiError, Bot, RequestError,
};
use tokio::sync::Mutex;

pub mod error_view;
pub mod keyboards;
pub mod menu_view;
pub mod token_view;
pub mod transfer_view;
pub mod wallet_view;

/// A rendered chat message: HTML text plus optional inline buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Screen {
    pub fn new(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }
}

/// Where screens end up. One instance serves one incoming update.
#[async_trait]
pub trait ChatView: Send + Sync {
    async fn show(&self, screen: Screen) -> Result<()>;

    /// Placeholder replaced by the next `show`.
    async fn show_loading(&self, text: &str) -> Result<()>;
}

pub struct TelegramChatView {
    bot: Bot,
    chat_id: ChatId,
    anchor: Mutex<Option<MessageId>>,
}

impl TelegramChatView {
    /// Replies with new messages, e.g. to typed input.
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            anchor: Mutex::new(None),
        }
    }

    /// Edits the message the pressed button belongs to.
    pub fn editing(bot: Bot, chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            anchor: Mutex::new(Some(message_id)),
        }
    }

    async fn edit(&self, message_id: MessageId, screen: &Screen) -> Result<bool> {
        let mut request = self
            .bot
            .edit_message_text(self.chat_id, message_id, screen.text.clone())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = &screen.keyboard {
            request = request.reply_markup(keyboard.clone());
        }

        match request.await {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(true),
            Err(e) => {
                warn!(
                    "Failed to edit message {} in chat {}: {}, sending a new one",
                    message_id.0, self.chat_id, e
                );
                Ok(false)
            }
        }
    }

    async fn send(&self, screen: &Screen) -> Result<MessageId> {
        let mut request = self
            .bot
            .send_message(self.chat_id, screen.text.clone())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = &screen.keyboard {
            request = request.reply_markup(keyboard.clone());
        }
        let message = request.await?;
        Ok(message.id)
    }
}

#[async_trait]
impl ChatView for TelegramChatView {
    async fn show(&self, screen: Screen) -> Result<()> {
        let mut anchor = self.anchor.lock().await;
        if let Some(message_id) = *anchor {
            if self.edit(message_id, &screen).await? {
                return Ok(());
            }
        }
        *anchor = Some(self.send(&screen).await?);
        Ok(())
    }

    async fn show_loading(&self, text: &str) -> Result<()> {
        self.show(Screen::text_only(text)).await
    }
}

/// Callback data of every button, row by row.
#[cfg(test)]
pub(crate) fn callback_data(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
    use teloxide::types::InlineKeyboardButtonKind;

    keyboard
        .inline_keyboard
        .iter()
        .flatten()
        .filter_map(|b| match &b.kind {
            InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
            _ => None,
        })
        .collect()
}
