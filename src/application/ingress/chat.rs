//! Chat ingress - create and delete chat messages.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::AuthenticatedIdentity;
use crate::domain::messaging::{html_escape, GroupName};
use crate::ports::{Broadcaster, ChatRepository, NotificationRepository, UserDirectory};

use super::frames::{
    to_payload, ChatClientFrame, ChatMessageFrame, ChatServerFrame, DeleteMessageFrame,
    NotificationFrame, OutboundChatMessage,
};
use super::IngressError;

/// Ingress handler for chat endpoints.
///
/// Mutate-then-broadcast: the chat mutation must succeed before anything
/// is sent, so a persistence failure never produces a partial broadcast.
pub struct ChatIngress {
    users: Arc<dyn UserDirectory>,
    chats: Arc<dyn ChatRepository>,
    notifications: Arc<dyn NotificationRepository>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl ChatIngress {
    /// Creates a new chat ingress handler.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        chats: Arc<dyn ChatRepository>,
        notifications: Arc<dyn NotificationRepository>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            users,
            chats,
            notifications,
            broadcaster,
        }
    }

    /// Handles one opaque inbound text frame from `identity`'s connection.
    pub async fn handle_frame(
        &self,
        identity: &AuthenticatedIdentity,
        raw: &str,
    ) -> Result<(), IngressError> {
        let frame: ChatClientFrame = serde_json::from_str(raw)
            .map_err(|e| IngressError::MalformedPayload(e.to_string()))?;

        match frame {
            ChatClientFrame::ChatMessage(msg) => self.handle_chat_message(identity, msg).await,
            ChatClientFrame::DeleteMessage(del) => self.handle_delete_message(identity, del).await,
        }
    }

    /// Creates a chat message, broadcasts it to the chat's group, then
    /// notifies the recipient on the well-known notification group.
    pub async fn handle_chat_message(
        &self,
        identity: &AuthenticatedIdentity,
        frame: ChatMessageFrame,
    ) -> Result<(), IngressError> {
        let chat_id = frame
            .chat_id
            .ok_or(IngressError::MissingRequiredField("chatId"))?;
        let user_id = frame
            .user_id
            .ok_or(IngressError::MissingRequiredField("user_id"))?;
        let context = match frame.context {
            Some(ref c) if !c.trim().is_empty() => c.clone(),
            _ => return Err(IngressError::MissingRequiredField("context")),
        };

        // The identity comes from the validated session, never the payload.
        if user_id != identity.user_id {
            return Err(IngressError::Unauthorized(format!(
                "frame user_id {} does not match connection identity {}",
                user_id, identity.user_id
            )));
        }

        let author = self
            .users
            .find_user(user_id)
            .await?
            .ok_or(IngressError::UnknownReferent {
                kind: "user",
                id: user_id.value(),
            })?;

        let chat = self
            .chats
            .find_chat(chat_id)
            .await?
            .ok_or(IngressError::UnknownReferent {
                kind: "chat",
                id: chat_id.value(),
            })?;

        // Two-party chat: the recipient is implied by the chat itself, so
        // the field is optional. When present it must name the other party.
        let implied_recipient =
            chat.other_party(author.id)
                .ok_or_else(|| {
                    IngressError::Unauthorized(format!(
                        "user {} is not a participant of chat {}",
                        author.id, chat_id
                    ))
                })?;
        let recipient = match frame.recipient {
            Some(recipient) if recipient == implied_recipient => recipient,
            Some(recipient) => {
                return Err(IngressError::Unauthorized(format!(
                    "recipient {} is not the other party of chat {}",
                    recipient, chat_id
                )))
            }
            None => implied_recipient,
        };

        let message = self
            .chats
            .create_message(chat_id, author.id, &context, frame.attachment, frame.voice)
            .await?;

        info!(
            message_id = %message.id,
            chat_id = %chat_id,
            author = %author.id,
            "chat message created"
        );

        let broadcast = ChatServerFrame::SendMessage {
            message: OutboundChatMessage::from_message(&message, &author.username),
        };
        self.broadcaster
            .broadcast(&GroupName::chat(chat_id), &to_payload(&broadcast))
            .await;

        // Notification side effect. A failure here aborts the second
        // broadcast only; the chat mutation and its broadcast already
        // happened.
        let unread = self.chats.unread_count(chat_id, recipient).await?;
        let text = format!(
            "You have {} new message(s) from {}",
            unread,
            html_escape(&author.username)
        );
        let (notification, _created) = self
            .notifications
            .get_or_create(recipient, &text)
            .await?;
        self.broadcaster
            .broadcast(
                &GroupName::notifications(),
                &to_payload(&NotificationFrame::from_notification(&notification)),
            )
            .await;

        Ok(())
    }

    /// Deletes one of the requester's own messages and broadcasts the
    /// deleted id to the chat's group.
    pub async fn handle_delete_message(
        &self,
        identity: &AuthenticatedIdentity,
        frame: DeleteMessageFrame,
    ) -> Result<(), IngressError> {
        let message_id = frame
            .message_id
            .ok_or(IngressError::MissingRequiredField("message_id"))?;
        let user_id = frame
            .user_id
            .ok_or(IngressError::MissingRequiredField("user_id"))?;

        if user_id != identity.user_id {
            return Err(IngressError::Unauthorized(format!(
                "frame user_id {} does not match connection identity {}",
                user_id, identity.user_id
            )));
        }

        let message = self
            .chats
            .find_message(message_id)
            .await?
            .ok_or(IngressError::UnknownReferent {
                kind: "message",
                id: message_id.value(),
            })?;

        // Ownership check before deletion, never mere existence.
        if !message.is_authored_by(user_id) {
            warn!(
                message_id = %message_id,
                requester = %user_id,
                author = %message.author,
                "unauthorized delete attempt"
            );
            return Err(IngressError::Unauthorized(format!(
                "user {} is not the author of message {}",
                user_id, message_id
            )));
        }

        self.chats.delete_message(message_id).await?;

        info!(message_id = %message_id, chat_id = %message.chat_id, "chat message deleted");

        let broadcast = ChatServerFrame::DeleteMessage { message_id };
        self.broadcaster
            .broadcast(&GroupName::chat(message.chat_id), &to_payload(&broadcast))
            .await;

        Ok(())
    }
}
