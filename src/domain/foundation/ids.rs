//! Strongly-typed identifier value objects.
//!
//! Persistent entities carry integer identifiers assigned by the store;
//! live connections carry an opaque UUID assigned at handshake time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! int_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an id from a raw integer value.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw integer value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

int_id! {
    /// Unique identifier for a user account.
    UserId
}

int_id! {
    /// Unique identifier for a two-party chat.
    ChatId
}

int_id! {
    /// Unique identifier for a chat message.
    MessageId
}

int_id! {
    /// Unique identifier for a comment.
    CommentId
}

int_id! {
    /// Unique identifier for a notification.
    NotificationId
}

int_id! {
    /// Unique identifier for a community.
    CommunityId
}

int_id! {
    /// Unique identifier for a community follow request.
    FollowRequestId
}

/// Opaque identifier for one live client connection.
///
/// Assigned when the handshake is accepted; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Creates a new random ConnectionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ConnectionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
