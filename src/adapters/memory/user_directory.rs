//! In-memory user directory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{UserDirectory, UserProfile};

/// User lookup backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user, replacing any existing entry with the same id.
    pub fn add_user(&self, id: UserId, username: impl Into<String>) {
        self.users
            .write()
            .expect("InMemoryUserDirectory: lock poisoned")
            .insert(id, UserProfile::new(id, username));
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .users
            .read()
            .expect("InMemoryUserDirectory: lock poisoned")
            .get(&id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_user_returns_registered_profile() {
        let directory = InMemoryUserDirectory::new();
        directory.add_user(UserId::new(7), "alice");

        let profile = directory.find_user(UserId::new(7)).await.unwrap().unwrap();
        assert_eq!(profile.username, "alice");
    }

    #[tokio::test]
    async fn find_user_returns_none_for_unknown_id() {
        let directory = InMemoryUserDirectory::new();
        assert!(directory.find_user(UserId::new(99)).await.unwrap().is_none());
    }
}
