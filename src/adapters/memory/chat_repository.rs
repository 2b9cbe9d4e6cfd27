//! In-memory chat and message store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{ChatId, DomainError, MessageId, Timestamp, UserId};
use crate::domain::messaging::{Chat, ChatMessage};
use crate::ports::ChatRepository;

/// Chat persistence backed by a `HashMap` of chats and a `Vec` of
/// messages in insertion order.
pub struct InMemoryChatRepository {
    chats: RwLock<HashMap<ChatId, Chat>>,
    messages: RwLock<Vec<ChatMessage>>,
    next_message_id: AtomicI64,
}

impl InMemoryChatRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            chats: RwLock::new(HashMap::new()),
            messages: RwLock::new(Vec::new()),
            next_message_id: AtomicI64::new(1),
        }
    }

    /// Registers a chat, replacing any existing entry with the same id.
    pub fn add_chat(&self, chat: Chat) {
        self.chats
            .write()
            .expect("InMemoryChatRepository: chats lock poisoned")
            .insert(chat.id, chat);
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn find_chat(&self, id: ChatId) -> Result<Option<Chat>, DomainError> {
        Ok(self
            .chats
            .read()
            .expect("InMemoryChatRepository: chats lock poisoned")
            .get(&id)
            .cloned())
    }

    async fn create_message(
        &self,
        chat_id: ChatId,
        author: UserId,
        body: &str,
        attachment_url: Option<String>,
        voice_url: Option<String>,
    ) -> Result<ChatMessage, DomainError> {
        let message = ChatMessage {
            id: MessageId::new(self.next_message_id.fetch_add(1, Ordering::Relaxed)),
            chat_id,
            author,
            body: body.to_string(),
            attachment_url,
            voice_url,
            created_at: Timestamp::now(),
        };
        self.messages
            .write()
            .expect("InMemoryChatRepository: messages lock poisoned")
            .push(message.clone());
        Ok(message)
    }

    async fn find_message(&self, id: MessageId) -> Result<Option<ChatMessage>, DomainError> {
        Ok(self
            .messages
            .read()
            .expect("InMemoryChatRepository: messages lock poisoned")
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn delete_message(&self, id: MessageId) -> Result<(), DomainError> {
        self.messages
            .write()
            .expect("InMemoryChatRepository: messages lock poisoned")
            .retain(|m| m.id != id);
        Ok(())
    }

    async fn unread_count(&self, chat_id: ChatId, user: UserId) -> Result<u64, DomainError> {
        Ok(self
            .messages
            .read()
            .expect("InMemoryChatRepository: messages lock poisoned")
            .iter()
            .filter(|m| m.chat_id == chat_id && m.author != user)
            .count() as u64)
    }
}
