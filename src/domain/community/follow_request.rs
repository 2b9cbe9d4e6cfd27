//! Follow requests for private communities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommunityId, FollowRequestId, UserId};

/// A pending subscription request to a private community.
///
/// At most one outstanding (unaccepted, sent) request exists per
/// (user, community) pair; the repository enforces this with get-or-create
/// semantics. `send_status` records whether the owner has already been
/// notified, which makes the notification side effect idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowRequest {
    /// Unique id of this request.
    pub id: FollowRequestId,
    /// The community being followed.
    pub community_id: CommunityId,
    /// The requesting user.
    pub user_id: UserId,
    /// Whether the owner has accepted the request.
    pub accepted: bool,
    /// Whether a notification has been dispatched for this request.
    pub send_status: bool,
}

impl FollowRequest {
    /// Creates a fresh, unsent request.
    pub fn new(id: FollowRequestId, community_id: CommunityId, user_id: UserId) -> Self {
        Self {
            id,
            community_id,
            user_id,
            accepted: false,
            send_status: false,
        }
    }

    /// An outstanding request awaits review: sent but not yet accepted.
    pub fn is_outstanding(&self) -> bool {
        self.send_status && !self.accepted
    }
}
