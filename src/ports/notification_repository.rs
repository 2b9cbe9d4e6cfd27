//! NotificationRepository port - unread notifications.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::messaging::Notification;

/// Port for notification persistence.
///
/// A stored notification is by definition unread; the recipient deletes it
/// to acknowledge. `get_or_create` deduplicates by (recipient, message) so
/// repeated side-effect triggers never pile up identical rows.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Returns the existing notification with this exact recipient and
    /// message, or creates one. The boolean is true when a row was created.
    async fn get_or_create(
        &self,
        recipient: UserId,
        message: &str,
    ) -> Result<(Notification, bool), DomainError>;

    /// All unread notifications for a user, oldest first.
    async fn list_for(&self, recipient: UserId) -> Result<Vec<Notification>, DomainError>;

    /// Deletes one notification if it belongs to `recipient`.
    /// Returns true when a row was deleted.
    async fn delete(&self, id: NotificationId, recipient: UserId) -> Result<bool, DomainError>;

    /// Deletes every notification for a user, returning the count removed.
    async fn delete_all_for(&self, recipient: UserId) -> Result<u64, DomainError>;
}
