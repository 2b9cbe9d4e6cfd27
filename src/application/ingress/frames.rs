//! Wire protocol frames: JSON text, one frame per logical event.
//!
//! Inbound frames deserialize every field as optional so that a missing
//! field is reported as `MissingRequiredField` by the handler, while a
//! frame that is not valid JSON (or carries an unknown `type` tag) fails
//! deserialization outright and becomes `MalformedPayload`.
//!
//! Outbound frames omit absent optional keys entirely (no `null`), which
//! keeps client-side rendering logic simple.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatId, MessageId, NotificationId, UserId};
use crate::domain::messaging::{ChatMessage, Notification};

// ════════════════════════════════════════════════════════════════════════════════
// Client → Server
// ════════════════════════════════════════════════════════════════════════════════

/// Frames accepted on a chat endpoint, discriminated by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatClientFrame {
    /// Create a message in a chat.
    ChatMessage(ChatMessageFrame),
    /// Delete one of the requester's own messages.
    DeleteMessage(DeleteMessageFrame),
}

/// Inbound chat-message creation frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessageFrame {
    /// The target chat.
    #[serde(rename = "chatId")]
    pub chat_id: Option<ChatId>,
    /// The other party, who receives the unread-count notification.
    pub recipient: Option<UserId>,
    /// The author; must match the connection identity.
    pub user_id: Option<UserId>,
    /// Free-text message body.
    pub context: Option<String>,
    /// Attached file, if any.
    #[serde(default)]
    pub attachment: Option<String>,
    /// Attached voice clip, if any.
    #[serde(default)]
    pub voice: Option<String>,
}

/// Inbound message deletion frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteMessageFrame {
    /// The message to delete.
    pub message_id: Option<MessageId>,
    /// The requester; must match the connection identity and the
    /// message author.
    pub user_id: Option<UserId>,
}

/// Inbound comment frame. Untagged: the comment endpoint accepts exactly
/// one shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentFrame {
    /// Short title line.
    pub title: Option<String>,
    /// The author; must match the connection identity.
    pub user_id: Option<UserId>,
    /// Free-text comment body.
    pub content: Option<String>,
    /// Wire-level id of the target kind.
    pub content_type_id: Option<i64>,
    /// Id of the target entity within its kind.
    pub object_id: Option<i64>,
    /// Attached file, if any.
    #[serde(default)]
    pub file: Option<String>,
    /// Attached image, if any.
    #[serde(default)]
    pub image: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Server → Client
// ════════════════════════════════════════════════════════════════════════════════

/// Frames broadcast on a chat group, discriminated by `type`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatServerFrame {
    /// A new message was created.
    SendMessage {
        /// The created message, rendered for clients.
        message: OutboundChatMessage,
    },
    /// A message was deleted; clients remove it locally by id.
    DeleteMessage {
        /// Id of the deleted message.
        message_id: MessageId,
    },
    /// Optional negative acknowledgment, sent to the offending sender only
    /// when `realtime.nack_on_error` is enabled.
    Error {
        /// Human-readable reason the frame was dropped.
        reason: String,
    },
}

/// A chat message rendered for broadcast.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundChatMessage {
    /// Message body.
    pub context: String,
    /// Author display name.
    pub username: String,
    /// Creation timestamp, ISO-8601.
    pub date: String,
    /// The chat this message belongs to.
    #[serde(rename = "chatId")]
    pub chat_id: ChatId,
    /// Id of the stored message.
    pub message_id: MessageId,
    /// Id of the author.
    pub user_id: UserId,
    /// Voice clip URL; key omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_url: Option<String>,
    /// Attachment URL; key omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl OutboundChatMessage {
    /// Renders a stored message for broadcast.
    pub fn from_message(message: &ChatMessage, username: &str) -> Self {
        Self {
            context: message.body.clone(),
            username: username.to_string(),
            date: message.created_at.to_iso8601(),
            chat_id: message.chat_id,
            message_id: message.id,
            user_id: message.author,
            voice_url: message.voice_url.clone(),
            attachment_url: message.attachment_url.clone(),
        }
    }
}

/// Frames broadcast on a comments group.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommentServerFrame {
    /// A new comment was created.
    SendComment {
        /// The created comment, rendered for clients.
        comment: OutboundComment,
        /// File URL; key omitted when absent.
        #[serde(skip_serializing_if = "Option::is_none")]
        file_url: Option<String>,
        /// Image URL; key omitted when absent.
        #[serde(skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
}

/// A comment rendered for broadcast.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundComment {
    /// Author display name.
    pub username: String,
    /// Comment body.
    pub content: String,
    /// Id of the author.
    pub user_id: UserId,
    /// Id of the target entity.
    pub object_id: i64,
    /// Composite target identifier (object id + content type id).
    pub object_ct_id: String,
}

/// Frame broadcast on the notification group. Untagged: the notification
/// endpoint carries exactly one shape.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationFrame {
    /// Human-readable, HTML-safe message.
    pub message: String,
    /// Id of the stored notification, used by mark-read.
    pub id: NotificationId,
}

impl NotificationFrame {
    /// Renders a stored notification for broadcast.
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            message: notification.message.clone(),
            id: notification.id,
        }
    }
}

/// Serializes an outbound frame into the JSON payload handed to the
/// broadcaster. Outbound frame types contain nothing unserializable, so
/// this cannot fail at runtime.
pub fn to_payload<T: Serialize>(frame: &T) -> serde_json::Value {
    serde_json::to_value(frame).expect("outbound frame serialization cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    mod client_frames {
        use super::*;

        #[test]
        fn deserializes_chat_message() {
            let json = r#"{
                "type": "chat_message",
                "chatId": 42,
                "recipient": 3,
                "user_id": 7,
                "context": "hello"
            }"#;

            let frame: ChatClientFrame = serde_json::from_str(json).unwrap();
            match frame {
                ChatClientFrame::ChatMessage(msg) => {
                    assert_eq!(msg.chat_id, Some(ChatId::new(42)));
                    assert_eq!(msg.user_id, Some(UserId::new(7)));
                    assert_eq!(msg.context.as_deref(), Some("hello"));
                    assert_eq!(msg.attachment, None);
                }
                _ => panic!("Expected ChatMessage"),
            }
        }

        #[test]
        fn deserializes_chat_message_with_missing_fields() {
            let json = r#"{"type": "chat_message", "context": "hi"}"#;
            let frame: ChatClientFrame = serde_json::from_str(json).unwrap();
            match frame {
                ChatClientFrame::ChatMessage(msg) => {
                    assert_eq!(msg.chat_id, None);
                    assert_eq!(msg.user_id, None);
                }
                _ => panic!("Expected ChatMessage"),
            }
        }

        #[test]
        fn deserializes_delete_message() {
            let json = r#"{"type": "delete_message", "message_id": 99, "user_id": 7}"#;
            let frame: ChatClientFrame = serde_json::from_str(json).unwrap();
            match frame {
                ChatClientFrame::DeleteMessage(del) => {
                    assert_eq!(del.message_id, Some(MessageId::new(99)));
                    assert_eq!(del.user_id, Some(UserId::new(7)));
                }
                _ => panic!("Expected DeleteMessage"),
            }
        }

        #[test]
        fn rejects_unknown_type_tag() {
            let json = r#"{"type": "launch_missiles"}"#;
            let result: Result<ChatClientFrame, _> = serde_json::from_str(json);
            assert!(result.is_err());
        }

        #[test]
        fn deserializes_comment_frame() {
            let json = r#"{
                "title": "Nice",
                "user_id": 7,
                "content": "Great post",
                "content_type_id": 2,
                "object_id": 17
            }"#;

            let frame: CommentFrame = serde_json::from_str(json).unwrap();
            assert_eq!(frame.title.as_deref(), Some("Nice"));
            assert_eq!(frame.content_type_id, Some(2));
            assert_eq!(frame.file, None);
            assert_eq!(frame.image, None);
        }
    }

    mod server_frames {
        use super::*;
        use crate::domain::foundation::NotificationId;

        fn message(voice: Option<&str>, attachment: Option<&str>) -> ChatMessage {
            ChatMessage {
                id: MessageId::new(5),
                chat_id: ChatId::new(42),
                author: UserId::new(7),
                body: "hello".to_string(),
                attachment_url: attachment.map(String::from),
                voice_url: voice.map(String::from),
                created_at: Timestamp::now(),
            }
        }

        #[test]
        fn serializes_send_message() {
            let frame = ChatServerFrame::SendMessage {
                message: OutboundChatMessage::from_message(&message(None, None), "alice"),
            };

            let json = serde_json::to_string(&frame).unwrap();
            assert!(json.contains(r#""type":"send_message""#));
            assert!(json.contains(r#""context":"hello""#));
            assert!(json.contains(r#""username":"alice""#));
            assert!(json.contains(r#""chatId":42"#));
        }

        #[test]
        fn send_message_omits_absent_urls() {
            let frame = ChatServerFrame::SendMessage {
                message: OutboundChatMessage::from_message(&message(None, None), "alice"),
            };

            let json = serde_json::to_string(&frame).unwrap();
            assert!(!json.contains("voice_url"));
            assert!(!json.contains("attachment_url"));
        }

        #[test]
        fn send_message_carries_present_urls() {
            let frame = ChatServerFrame::SendMessage {
                message: OutboundChatMessage::from_message(
                    &message(Some("/media/voice/5.ogg"), Some("/media/files/5.pdf")),
                    "alice",
                ),
            };

            let json = serde_json::to_string(&frame).unwrap();
            assert!(json.contains(r#""voice_url":"/media/voice/5.ogg""#));
            assert!(json.contains(r#""attachment_url":"/media/files/5.pdf""#));
        }

        #[test]
        fn serializes_delete_message() {
            let frame = ChatServerFrame::DeleteMessage {
                message_id: MessageId::new(99),
            };

            let json = serde_json::to_string(&frame).unwrap();
            assert_eq!(json, r#"{"type":"delete_message","message_id":99}"#);
        }

        #[test]
        fn serializes_comment_without_attachments() {
            let frame = CommentServerFrame::SendComment {
                comment: OutboundComment {
                    username: "alice".to_string(),
                    content: "Great post".to_string(),
                    user_id: UserId::new(7),
                    object_id: 17,
                    object_ct_id: "172".to_string(),
                },
                file_url: None,
                image_url: None,
            };

            let json = serde_json::to_string(&frame).unwrap();
            assert!(json.contains(r#""type":"send_comment""#));
            assert!(json.contains(r#""object_ct_id":"172""#));
            assert!(!json.contains("file_url"));
            assert!(!json.contains("image_url"));
        }

        #[test]
        fn serializes_notification_frame() {
            let frame = NotificationFrame {
                message: "You have 2 new message(s) from alice".to_string(),
                id: NotificationId::new(11),
            };

            let json = serde_json::to_string(&frame).unwrap();
            assert_eq!(
                json,
                r#"{"message":"You have 2 new message(s) from alice","id":11}"#
            );
        }

        #[test]
        fn to_payload_produces_json_value() {
            let frame = ChatServerFrame::DeleteMessage {
                message_id: MessageId::new(1),
            };
            let value = to_payload(&frame);
            assert_eq!(value["type"], "delete_message");
            assert_eq!(value["message_id"], 1);
        }
    }
}
