//! Follow-request workflow for private communities.
//!
//! Submitting a request to a community you already have an outstanding
//! request for withdraws it; otherwise a request is created (or revived)
//! and the community owner is notified exactly once, guarded by the
//! request's `send_status` flag.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::foundation::{AuthenticatedIdentity, CommunityId, DomainError};
use crate::domain::messaging::{html_escape, GroupName};
use crate::ports::{Broadcaster, CommunityDirectory, FollowRequestRepository, NotificationRepository};

use super::ingress::frames::{to_payload, NotificationFrame};

/// Errors raised by the follow-request workflow.
#[derive(Debug, Clone, Error)]
pub enum FollowRequestError {
    /// The referenced community does not exist.
    #[error("community {0} not found")]
    CommunityNotFound(CommunityId),

    /// The underlying store raised.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<DomainError> for FollowRequestError {
    fn from(err: DomainError) -> Self {
        FollowRequestError::Persistence(err.to_string())
    }
}

/// Outcome of a follow-request toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// A request is now pending for the caller.
    Sent,
    /// The caller's outstanding request was withdrawn.
    Removed,
}

/// Orchestrates follow-request submission, withdrawal, and the owner
/// notification side effect.
pub struct FollowRequestService {
    communities: Arc<dyn CommunityDirectory>,
    requests: Arc<dyn FollowRequestRepository>,
    notifications: Arc<dyn NotificationRepository>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl FollowRequestService {
    /// Creates a new follow-request service.
    pub fn new(
        communities: Arc<dyn CommunityDirectory>,
        requests: Arc<dyn FollowRequestRepository>,
        notifications: Arc<dyn NotificationRepository>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            communities,
            requests,
            notifications,
            broadcaster,
        }
    }

    /// Submits a follow request for `identity` to the community.
    ///
    /// Get-or-create: resubmitting while a request already exists changes
    /// nothing. The owner notification is sent at most once per request
    /// lifetime, keyed on `send_status`.
    pub async fn send(
        &self,
        identity: &AuthenticatedIdentity,
        community_id: CommunityId,
    ) -> Result<FollowOutcome, FollowRequestError> {
        let community = self
            .communities
            .find_community(community_id)
            .await?
            .ok_or(FollowRequestError::CommunityNotFound(community_id))?;

        let (request, _created) = self
            .requests
            .get_or_create(community_id, identity.user_id)
            .await?;

        if !request.send_status {
            let text = format!(
                "There is your new follow request: {}\nCheck your follow request list: <a href=\"{}\">Request List</a>.",
                html_escape(&identity.username),
                community.follow_request_review_path()
            );
            let (notification, _) = self
                .notifications
                .get_or_create(community.owner, &text)
                .await?;
            self.broadcaster
                .broadcast(
                    &GroupName::notifications(),
                    &to_payload(&NotificationFrame::from_notification(&notification)),
                )
                .await;
            self.requests.mark_sent(request.id).await?;
        }

        info!(
            community = %community_id,
            user = %identity.user_id,
            request = %request.id,
            "follow request pending"
        );
        Ok(FollowOutcome::Sent)
    }

    /// Withdraws the caller's outstanding follow request. Withdrawing when
    /// none is outstanding changes nothing.
    pub async fn remove(
        &self,
        identity: &AuthenticatedIdentity,
        community_id: CommunityId,
    ) -> Result<FollowOutcome, FollowRequestError> {
        self.communities
            .find_community(community_id)
            .await?
            .ok_or(FollowRequestError::CommunityNotFound(community_id))?;

        if let Some(outstanding) = self
            .requests
            .find_outstanding(community_id, identity.user_id)
            .await?
        {
            self.requests.delete(outstanding.id).await?;
            info!(
                community = %community_id,
                user = %identity.user_id,
                "follow request withdrawn"
            );
        }
        Ok(FollowOutcome::Removed)
    }

    /// Submits a follow request, or withdraws the outstanding one.
    pub async fn toggle(
        &self,
        identity: &AuthenticatedIdentity,
        community_id: CommunityId,
    ) -> Result<FollowOutcome, FollowRequestError> {
        if self
            .requests
            .find_outstanding(community_id, identity.user_id)
            .await?
            .is_some()
        {
            self.remove(identity, community_id).await
        } else {
            self.send(identity, community_id).await
        }
    }
}
