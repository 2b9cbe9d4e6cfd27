//! Notification service - listing and acknowledging notifications.
//!
//! Acknowledging deletes the row: the store only ever holds unread
//! notifications, so "mark read" and "delete" are the same operation.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedIdentity, DomainError, NotificationId};
use crate::domain::messaging::Notification;
use crate::ports::NotificationRepository;

/// Read-and-acknowledge facade over the notification store.
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// All unread notifications for the caller.
    pub async fn list(
        &self,
        identity: &AuthenticatedIdentity,
    ) -> Result<Vec<Notification>, DomainError> {
        self.notifications.list_for(identity.user_id).await
    }

    /// Acknowledges a single notification. Returns false when the id does
    /// not exist or belongs to someone else.
    pub async fn mark_read(
        &self,
        identity: &AuthenticatedIdentity,
        id: NotificationId,
    ) -> Result<bool, DomainError> {
        let removed = self.notifications.delete(id, identity.user_id).await?;
        if removed {
            info!(notification = %id, user = %identity.user_id, "notification acknowledged");
        }
        Ok(removed)
    }

    /// Acknowledges every notification for the caller. Returns the number
    /// removed.
    pub async fn mark_all_read(
        &self,
        identity: &AuthenticatedIdentity,
    ) -> Result<u64, DomainError> {
        let removed = self.notifications.delete_all_for(identity.user_id).await?;
        info!(user = %identity.user_id, count = removed, "all notifications acknowledged");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryNotificationRepository;
    use crate::domain::foundation::UserId;

    fn bob() -> AuthenticatedIdentity {
        AuthenticatedIdentity::new(UserId::new(3), "bob")
    }

    #[tokio::test]
    async fn mark_read_removes_only_the_callers_row() {
        let store = Arc::new(InMemoryNotificationRepository::new());
        let (mine, _) = store.get_or_create(UserId::new(3), "for bob").await.unwrap();
        let (other, _) = store.get_or_create(UserId::new(7), "for alice").await.unwrap();

        let service = NotificationService::new(store.clone());

        assert!(service.mark_read(&bob(), mine.id).await.unwrap());
        assert!(!service.mark_read(&bob(), other.id).await.unwrap());

        assert!(service.list(&bob()).await.unwrap().is_empty());
        assert_eq!(store.list_for(UserId::new(7)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mark_all_read_reports_the_removed_count() {
        let store = Arc::new(InMemoryNotificationRepository::new());
        store.get_or_create(UserId::new(3), "one").await.unwrap();
        store.get_or_create(UserId::new(3), "two").await.unwrap();

        let service = NotificationService::new(store);

        assert_eq!(service.mark_all_read(&bob()).await.unwrap(), 2);
        assert_eq!(service.mark_all_read(&bob()).await.unwrap(), 0);
    }
}
