use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use log::debug;
use teloxide::types::ChatId;

use crate::entity::Session;

/// Per-chat conversation state. Sessions never leak between chats.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Session of `chat_id`, a fresh one if the chat is new.
    async fn get(&self, chat_id: ChatId) -> Session;

    async fn set(&self, chat_id: ChatId, session: Session);

    async fn clear(&self, chat_id: ChatId);
}

/// Process-local store. Everything is lost on restart.
pub struct InMemorySessionStore {
    sessions: DashMap<ChatId, Session>,
    pending_input_ttl: chrono::Duration,
}

impl InMemorySessionStore {
    pub fn new(pending_input_ttl: chrono::Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            pending_input_ttl,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, chat_id: ChatId) -> Session {
        let Some(mut entry) = self.sessions.get_mut(&chat_id) else {
            return Session::default();
        };

        if entry.expire_stale_input(Utc::now(), self.pending_input_ttl) {
            debug!("Pending input of chat {} expired", chat_id);
        }
        entry.clone()
    }

    async fn set(&self, chat_id: ChatId, mut session: Session) {
        session.updated_at = Some(Utc::now());
        self.sessions.insert(chat_id, session);
    }

    async fn clear(&self, chat_id: ChatId) {
        self.sessions.remove(&chat_id);
    }
}
