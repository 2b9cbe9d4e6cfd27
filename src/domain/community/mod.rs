//! Community domain - communities and the follow-request workflow.

mod follow_request;

pub use follow_request::FollowRequest;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommunityId, UserId};

/// A community (public or private) users can follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Unique id of this community.
    pub id: CommunityId,
    /// Unique community name, used in review-page links.
    pub name: String,
    /// The owner, who reviews follow requests and receives the
    /// corresponding notifications.
    pub owner: UserId,
    /// Private communities require an accepted follow request to join.
    pub is_private: bool,
}

impl Community {
    /// Creates a new community record.
    pub fn new(id: CommunityId, name: impl Into<String>, owner: UserId, is_private: bool) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            is_private,
        }
    }

    /// Relative URL of the follow-request review page for this community.
    pub fn follow_request_review_path(&self) -> String {
        format!("/community/name-{}/follow-requests/", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_path_embeds_community_name() {
        let community = Community::new(CommunityId::new(5), "rustaceans", UserId::new(1), true);
        assert_eq!(
            community.follow_request_review_path(),
            "/community/name-rustaceans/follow-requests/"
        );
    }
}
