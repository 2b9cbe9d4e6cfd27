//! Two-party chats and their messages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatId, MessageId, Timestamp, UserId};

/// A direct chat between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique id of this chat.
    pub id: ChatId,
    /// The user who opened the chat.
    pub sender: UserId,
    /// The other party.
    pub recipient: UserId,
}

impl Chat {
    /// Creates a new chat record.
    pub fn new(id: ChatId, sender: UserId, recipient: UserId) -> Self {
        Self {
            id,
            sender,
            recipient,
        }
    }

    /// Returns true if the user is one of the two parties.
    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.sender == user_id || self.recipient == user_id
    }

    /// Returns the other party of the chat, or `None` if the user is not a
    /// participant.
    pub fn other_party(&self, user_id: UserId) -> Option<UserId> {
        if self.sender == user_id {
            Some(self.recipient)
        } else if self.recipient == user_id {
            Some(self.sender)
        } else {
            None
        }
    }
}

/// One message inside a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique id of this message.
    pub id: MessageId,
    /// The chat this message belongs to.
    pub chat_id: ChatId,
    /// The author of the message.
    pub author: UserId,
    /// Free-text body.
    pub body: String,
    /// URL of an attached file, if any.
    pub attachment_url: Option<String>,
    /// URL of an attached voice clip, if any.
    pub voice_url: Option<String>,
    /// When the message was created.
    pub created_at: Timestamp,
}

impl ChatMessage {
    /// Returns true if the given user wrote this message.
    ///
    /// Deletion is only permitted when this holds for the requester.
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author == user_id
    }
}
