//! Messaging domain - broadcast groups, chats, comments, notifications.

mod chat;
mod comment;
mod group;
mod notification;

pub use chat::{Chat, ChatMessage};
pub use comment::{Comment, CommentTarget, TargetKind};
pub use group::GroupName;
pub use notification::{html_escape, Notification};
