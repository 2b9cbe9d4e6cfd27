//! Community ports - community lookup and follow-request persistence.

use async_trait::async_trait;

use crate::domain::community::{Community, FollowRequest};
use crate::domain::foundation::{CommunityId, DomainError, FollowRequestId, UserId};

/// Port for resolving communities referenced by follow actions.
#[async_trait]
pub trait CommunityDirectory: Send + Sync {
    /// Finds a community by id. Returns `Ok(None)` for an unknown id.
    async fn find_community(&self, id: CommunityId) -> Result<Option<Community>, DomainError>;
}

/// Port for follow-request persistence.
///
/// `get_or_create` is the uniqueness guard: there is never more than one
/// row per (user, community) pair, so an outstanding request can never be
/// duplicated by concurrent submissions.
#[async_trait]
pub trait FollowRequestRepository: Send + Sync {
    /// Returns the existing request for (user, community), or creates a
    /// fresh unsent one. The boolean is true when a row was created.
    async fn get_or_create(
        &self,
        community_id: CommunityId,
        user_id: UserId,
    ) -> Result<(FollowRequest, bool), DomainError>;

    /// The outstanding (sent, unaccepted) request for (user, community),
    /// if one exists.
    async fn find_outstanding(
        &self,
        community_id: CommunityId,
        user_id: UserId,
    ) -> Result<Option<FollowRequest>, DomainError>;

    /// Flips `send_status` to true on an existing request.
    async fn mark_sent(&self, id: FollowRequestId) -> Result<(), DomainError>;

    /// Deletes a request by id; deleting an absent id is a no-op.
    async fn delete(&self, id: FollowRequestId) -> Result<(), DomainError>;
}
