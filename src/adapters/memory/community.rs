//! In-memory community directory and follow-request store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::community::{Community, FollowRequest};
use crate::domain::foundation::{CommunityId, DomainError, FollowRequestId, UserId};
use crate::ports::{CommunityDirectory, FollowRequestRepository};

/// Community lookup backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryCommunityDirectory {
    communities: RwLock<HashMap<CommunityId, Community>>,
}

impl InMemoryCommunityDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a community, replacing any existing entry with the same id.
    pub fn add_community(&self, community: Community) {
        self.communities
            .write()
            .expect("InMemoryCommunityDirectory: lock poisoned")
            .insert(community.id, community);
    }
}

#[async_trait]
impl CommunityDirectory for InMemoryCommunityDirectory {
    async fn find_community(&self, id: CommunityId) -> Result<Option<Community>, DomainError> {
        Ok(self
            .communities
            .read()
            .expect("InMemoryCommunityDirectory: lock poisoned")
            .get(&id)
            .cloned())
    }
}

/// Follow-request persistence backed by a `Vec`, with get-or-create
/// uniqueness per (community, user) pair.
pub struct InMemoryFollowRequestRepository {
    rows: RwLock<Vec<FollowRequest>>,
    next_id: AtomicI64,
}

impl InMemoryFollowRequestRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryFollowRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FollowRequestRepository for InMemoryFollowRequestRepository {
    async fn get_or_create(
        &self,
        community_id: CommunityId,
        user_id: UserId,
    ) -> Result<(FollowRequest, bool), DomainError> {
        let mut rows = self
            .rows
            .write()
            .expect("InMemoryFollowRequestRepository: lock poisoned");
        if let Some(existing) = rows
            .iter()
            .find(|r| r.community_id == community_id && r.user_id == user_id)
        {
            return Ok((existing.clone(), false));
        }
        let row = FollowRequest::new(
            FollowRequestId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            community_id,
            user_id,
        );
        rows.push(row.clone());
        Ok((row, true))
    }

    async fn find_outstanding(
        &self,
        community_id: CommunityId,
        user_id: UserId,
    ) -> Result<Option<FollowRequest>, DomainError> {
        Ok(self
            .rows
            .read()
            .expect("InMemoryFollowRequestRepository: lock poisoned")
            .iter()
            .find(|r| r.community_id == community_id && r.user_id == user_id && r.is_outstanding())
            .cloned())
    }

    async fn mark_sent(&self, id: FollowRequestId) -> Result<(), DomainError> {
        let mut rows = self
            .rows
            .write()
            .expect("InMemoryFollowRequestRepository: lock poisoned");
        if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
            row.send_status = true;
        }
        Ok(())
    }

    async fn delete(&self, id: FollowRequestId) -> Result<(), DomainError> {
        self.rows
            .write()
            .expect("InMemoryFollowRequestRepository: lock poisoned")
            .retain(|r| r.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_is_unique_per_user_and_community() {
        let repo = InMemoryFollowRequestRepository::new();
        let (a, created_a) = repo
            .get_or_create(CommunityId::new(5), UserId::new(3))
            .await
            .unwrap();
        let (b, created_b) = repo
            .get_or_create(CommunityId::new(5), UserId::new(3))
            .await
            .unwrap();

        assert!(created_a);
        assert!(!created_b);
        assert_eq!(a.id, b.id);
    }

    #[tokio::test]
    async fn outstanding_requires_sent_and_unaccepted() {
        let repo = InMemoryFollowRequestRepository::new();
        let (row, _) = repo
            .get_or_create(CommunityId::new(5), UserId::new(3))
            .await
            .unwrap();

        // Fresh request is unsent, so not outstanding yet.
        assert!(repo
            .find_outstanding(CommunityId::new(5), UserId::new(3))
            .await
            .unwrap()
            .is_none());

        repo.mark_sent(row.id).await.unwrap();
        assert!(repo
            .find_outstanding(CommunityId::new(5), UserId::new(3))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = InMemoryFollowRequestRepository::new();
        let (row, _) = repo
            .get_or_create(CommunityId::new(5), UserId::new(3))
            .await
            .unwrap();
        repo.mark_sent(row.id).await.unwrap();

        repo.delete(row.id).await.unwrap();
        assert!(repo
            .find_outstanding(CommunityId::new(5), UserId::new(3))
            .await
            .unwrap()
            .is_none());
    }
}
