//! In-memory notification store.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::messaging::Notification;
use crate::ports::NotificationRepository;

/// Notification persistence backed by a `Vec` in insertion order, with
/// get-or-create deduplication on (recipient, message).
pub struct InMemoryNotificationRepository {
    rows: RwLock<Vec<Notification>>,
    next_id: AtomicI64,
}

impl InMemoryNotificationRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryNotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn get_or_create(
        &self,
        recipient: UserId,
        message: &str,
    ) -> Result<(Notification, bool), DomainError> {
        let mut rows = self
            .rows
            .write()
            .expect("InMemoryNotificationRepository: lock poisoned");
        if let Some(existing) = rows
            .iter()
            .find(|n| n.recipient == recipient && n.message == message)
        {
            return Ok((existing.clone(), false));
        }
        let row = Notification::new(
            NotificationId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            recipient,
            message,
        );
        rows.push(row.clone());
        Ok((row, true))
    }

    async fn list_for(&self, recipient: UserId) -> Result<Vec<Notification>, DomainError> {
        Ok(self
            .rows
            .read()
            .expect("InMemoryNotificationRepository: lock poisoned")
            .iter()
            .filter(|n| n.recipient == recipient)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: NotificationId, recipient: UserId) -> Result<bool, DomainError> {
        let mut rows = self
            .rows
            .write()
            .expect("InMemoryNotificationRepository: lock poisoned");
        let before = rows.len();
        rows.retain(|n| !(n.id == id && n.recipient == recipient));
        Ok(rows.len() < before)
    }

    async fn delete_all_for(&self, recipient: UserId) -> Result<u64, DomainError> {
        let mut rows = self
            .rows
            .write()
            .expect("InMemoryNotificationRepository: lock poisoned");
        let before = rows.len();
        rows.retain(|n| n.recipient != recipient);
        Ok((before - rows.len()) as u64)
    }
}
