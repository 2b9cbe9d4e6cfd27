//! ChatRepository port - chats and chat messages.

use async_trait::async_trait;

use crate::domain::foundation::{ChatId, DomainError, MessageId, UserId};
use crate::domain::messaging::{Chat, ChatMessage};

/// Port for chat and chat-message persistence.
///
/// Create and delete are single-row atomic operations; the realtime layer
/// relies on that atomicity instead of holding any cross-connection lock.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Finds a chat by id. Returns `Ok(None)` for an unknown id.
    async fn find_chat(&self, id: ChatId) -> Result<Option<Chat>, DomainError>;

    /// Creates a message in a chat and returns the stored row.
    async fn create_message(
        &self,
        chat_id: ChatId,
        author: UserId,
        body: &str,
        attachment_url: Option<String>,
        voice_url: Option<String>,
    ) -> Result<ChatMessage, DomainError>;

    /// Finds a message by id. Returns `Ok(None)` for an unknown id.
    async fn find_message(&self, id: MessageId) -> Result<Option<ChatMessage>, DomainError>;

    /// Deletes a message by id. The caller is responsible for the
    /// ownership check; deleting an absent id is a no-op.
    async fn delete_message(&self, id: MessageId) -> Result<(), DomainError>;

    /// Number of messages in the chat addressed to `user` (i.e. authored
    /// by the other party) that the user has not yet acknowledged.
    async fn unread_count(&self, chat_id: ChatId, user: UserId) -> Result<u64, DomainError>;
}
