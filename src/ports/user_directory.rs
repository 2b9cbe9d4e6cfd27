//! UserDirectory port - user profile lookup.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Minimal user profile needed by the realtime layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Unique user id.
    pub id: UserId,
    /// Display name carried on outbound frames.
    pub username: String,
}

impl UserProfile {
    /// Creates a new user profile.
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Port for resolving user ids referenced by inbound frames.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by id. Returns `Ok(None)` for an unknown id.
    async fn find_user(&self, id: UserId) -> Result<Option<UserProfile>, DomainError>;
}
