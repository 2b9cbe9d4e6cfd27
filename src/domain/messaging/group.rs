//! Broadcast group names.
//!
//! A group is nothing more than a string key into the in-memory registry:
//! it exists while it has members and carries no other state. Well-known
//! groups (the notification room, the default comments room) have fixed
//! names; chat groups are parameterized by chat id.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ChatId, ValidationError};

/// Fixed name of the process-wide notification channel.
const NOTIFICATION_ROOM: &str = "notification_room";

/// Fixed name of the default comments channel.
const COMMENTS_ROOM: &str = "comments_room";

/// Name of a broadcast group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Creates a group name from a client-supplied path segment.
    ///
    /// Names are restricted to ASCII alphanumerics, `_` and `-`, at most
    /// 100 characters, so a route parameter can never smuggle in separators
    /// or control characters.
    pub fn parse(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::empty_field("group"));
        }
        if name.len() > 100 {
            return Err(ValidationError::invalid_format("group", "longer than 100 characters"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ValidationError::invalid_format(
                "group",
                "only ASCII alphanumerics, '_' and '-' are allowed",
            ));
        }
        Ok(Self(name))
    }

    /// The well-known notification group every client listens on.
    pub fn notifications() -> Self {
        Self(NOTIFICATION_ROOM.to_string())
    }

    /// The default comments group.
    pub fn comments() -> Self {
        Self(COMMENTS_ROOM.to_string())
    }

    /// The group for a single chat, e.g. `chat_42`.
    pub fn chat(chat_id: ChatId) -> Self {
        Self(format!("chat_{}", chat_id))
    }

    /// Returns the group name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
