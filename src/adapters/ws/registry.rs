//! In-process group registry and fan-out dispatcher.
//!
//! Groups are named multicast lists: a connection joins any number of
//! groups, and a broadcast to a group walks its members in registration
//! order. Membership is explicit state here, not an emergent property of
//! channel subscriptions, so join and leave are observable operations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use crate::domain::foundation::ConnectionId;
use crate::domain::messaging::GroupName;
use crate::ports::Broadcaster;

/// Sender half of one connection's outbound queue.
///
/// Payloads are pre-serialized and shared, so a thousand-member broadcast
/// clones an `Arc`, not a string.
#[derive(Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::Sender<Arc<String>>,
}

impl ConnectionHandle {
    /// Creates a handle around a connection's outbound sender.
    pub fn new(id: ConnectionId, tx: mpsc::Sender<Arc<String>>) -> Self {
        Self { id, tx }
    }

    /// The connection this handle belongs to.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues a payload without waiting. Returns false when the
    /// connection's queue is full or its writer task is gone.
    pub fn send(&self, payload: Arc<String>) -> bool {
        self.tx.try_send(payload).is_ok()
    }
}

/// Registry mapping group names to their member connections.
///
/// `RwLock` because broadcasts (reads) vastly outnumber joins and leaves
/// (writes). Members are kept in a `Vec` to preserve registration order
/// during fan-out.
#[derive(Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<GroupName, Vec<ConnectionHandle>>>,
}

impl GroupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a group, creating the group on first join.
    /// Joining a group the connection is already in is a no-op.
    pub async fn join(&self, group: &GroupName, handle: ConnectionHandle) {
        let mut groups = self.groups.write().await;
        let members = groups.entry(group.clone()).or_default();
        if members.iter().any(|m| m.id() == handle.id()) {
            return;
        }
        debug!(group = %group, connection = %handle.id(), "connection joined group");
        members.push(handle);
    }

    /// Removes a connection from a group. Removing an absent member is a
    /// no-op; the group itself is dropped once empty.
    pub async fn leave(&self, group: &GroupName, id: ConnectionId) {
        let mut groups = self.groups.write().await;
        if let Some(members) = groups.get_mut(group) {
            members.retain(|m| m.id() != id);
            if members.is_empty() {
                groups.remove(group);
            }
            debug!(group = %group, connection = %id, "connection left group");
        }
    }

    /// Snapshot of the group's current members, in registration order.
    pub async fn members(&self, group: &GroupName) -> Vec<ConnectionId> {
        self.groups
            .read()
            .await
            .get(group)
            .map(|m| m.iter().map(ConnectionHandle::id).collect())
            .unwrap_or_default()
    }

    /// Number of members currently in a group (0 for an unknown group).
    pub async fn member_count(&self, group: &GroupName) -> usize {
        self.groups
            .read()
            .await
            .get(group)
            .map(|m| m.len())
            .unwrap_or(0)
    }

    /// All groups with at least one member.
    pub async fn active_groups(&self) -> Vec<GroupName> {
        self.groups.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl Broadcaster for GroupRegistry {
    /// Fans a payload out to every member of the group, in registration
    /// order. Serialization happens once; a member whose queue is full is
    /// skipped and logged, never unregistered here. Cleanup belongs to the
    /// session that owns the connection.
    async fn broadcast(&self, group: &GroupName, payload: &serde_json::Value) {
        let text = Arc::new(payload.to_string());

        let groups = self.groups.read().await;
        let Some(members) = groups.get(group) else {
            debug!(group = %group, "broadcast to empty group");
            return;
        };

        for member in members {
            if !member.send(Arc::clone(&text)) {
                warn!(
                    group = %group,
                    connection = %member.id(),
                    "dropping broadcast for unreachable connection"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> (ConnectionHandle, mpsc::Receiver<Arc<String>>) {
        let (tx, rx) = mpsc::channel(8);
        (ConnectionHandle::new(ConnectionId::new(), tx), rx)
    }

    fn group() -> GroupName {
        GroupName::parse("chat_42").unwrap()
    }

    #[tokio::test]
    async fn broadcast_reaches_every_member() {
        let registry = GroupRegistry::new();
        let (h1, mut rx1) = handle();
        let (h2, mut rx2) = handle();
        registry.join(&group(), h1).await;
        registry.join(&group(), h2).await;

        registry
            .broadcast(&group(), &serde_json::json!({"type": "ping"}))
            .await;

        assert_eq!(rx1.recv().await.unwrap().as_str(), r#"{"type":"ping"}"#);
        assert_eq!(rx2.recv().await.unwrap().as_str(), r#"{"type":"ping"}"#);
    }

    #[tokio::test]
    async fn broadcast_excludes_other_groups() {
        let registry = GroupRegistry::new();
        let other = GroupName::parse("chat_99").unwrap();
        let (h1, mut rx1) = handle();
        let (h2, mut rx2) = handle();
        registry.join(&group(), h1).await;
        registry.join(&other, h2).await;

        registry
            .broadcast(&group(), &serde_json::json!({"n": 1}))
            .await;

        assert!(rx1.recv().await.is_some());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn members_receive_in_registration_order() {
        let registry = GroupRegistry::new();
        let mut receivers = Vec::new();
        let mut ids = Vec::new();
        for _ in 0..5 {
            let (h, rx) = handle();
            ids.push(h.id());
            registry.join(&group(), h).await;
            receivers.push(rx);
        }

        registry.broadcast(&group(), &serde_json::json!({"seq": 1})).await;

        for rx in &mut receivers {
            assert!(rx.try_recv().is_ok());
        }
        assert_eq!(registry.members(&group()).await, ids);

        // Removing the middle member keeps the relative order of the rest.
        registry.leave(&group(), ids[2]).await;
        let expected: Vec<_> = ids
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, id)| *id)
            .collect();
        assert_eq!(registry.members(&group()).await, expected);
    }

    #[tokio::test]
    async fn duplicate_join_is_a_noop() {
        let registry = GroupRegistry::new();
        let (h, mut rx) = handle();
        registry.join(&group(), h.clone()).await;
        registry.join(&group(), h).await;

        assert_eq!(registry.member_count(&group()).await, 1);

        registry.broadcast(&group(), &serde_json::json!({})).await;
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn leave_is_idempotent() {
        let registry = GroupRegistry::new();
        let (h, _rx) = handle();
        let id = h.id();
        registry.join(&group(), h).await;

        registry.leave(&group(), id).await;
        registry.leave(&group(), id).await;
        registry.leave(&group(), ConnectionId::new()).await;

        assert_eq!(registry.member_count(&group()).await, 0);
    }

    #[tokio::test]
    async fn empty_group_is_dropped_after_last_leave() {
        let registry = GroupRegistry::new();
        let (h, _rx) = handle();
        let id = h.id();
        registry.join(&group(), h).await;

        registry.leave(&group(), id).await;

        assert!(registry.active_groups().await.is_empty());
    }

    #[tokio::test]
    async fn broadcast_to_unknown_group_is_a_noop() {
        let registry = GroupRegistry::new();
        registry.broadcast(&group(), &serde_json::json!({})).await;
    }

    #[tokio::test]
    async fn full_member_queue_does_not_block_others() {
        let registry = GroupRegistry::new();
        let (tx, _rx) = mpsc::channel(1);
        let stuck = ConnectionHandle::new(ConnectionId::new(), tx);
        let (healthy, mut healthy_rx) = handle();

        registry.join(&group(), stuck).await;
        registry.join(&group(), healthy).await;

        // Two broadcasts: the second overflows the stuck member's queue.
        registry.broadcast(&group(), &serde_json::json!({"n": 1})).await;
        registry.broadcast(&group(), &serde_json::json!({"n": 2})).await;

        assert!(healthy_rx.try_recv().is_ok());
        assert!(healthy_rx.try_recv().is_ok());
        // The stuck member stays registered; reaping is the session's job.
        assert_eq!(registry.member_count(&group()).await, 2);
    }

    #[tokio::test]
    async fn connection_can_belong_to_multiple_groups() {
        let registry = GroupRegistry::new();
        let other = GroupName::parse("notification_room").unwrap();
        let (h, mut rx) = handle();
        registry.join(&group(), h.clone()).await;
        registry.join(&other, h).await;

        registry.broadcast(&group(), &serde_json::json!({"n": 1})).await;
        registry.broadcast(&other, &serde_json::json!({"n": 2})).await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
    }
}
