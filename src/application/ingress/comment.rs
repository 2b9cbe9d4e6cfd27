//! Comment ingress - create comments on polymorphic content.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::AuthenticatedIdentity;
use crate::domain::messaging::{CommentTarget, GroupName, TargetKind};
use crate::ports::{Broadcaster, CommentRepository, NewComment, UserDirectory};

use super::frames::{to_payload, CommentFrame, CommentServerFrame, OutboundComment};
use super::IngressError;

/// Ingress handler for comment streams.
///
/// Every connection on a comments endpoint shares one group; a created
/// comment is broadcast to the group the connection joined, so all viewers
/// of the content see it immediately.
pub struct CommentIngress {
    users: Arc<dyn UserDirectory>,
    comments: Arc<dyn CommentRepository>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl CommentIngress {
    /// Creates a new comment ingress handler.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        comments: Arc<dyn CommentRepository>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            users,
            comments,
            broadcaster,
        }
    }

    /// Handles one inbound comment frame from `identity`'s connection and
    /// broadcasts the created comment to `group`.
    pub async fn handle_frame(
        &self,
        identity: &AuthenticatedIdentity,
        group: &GroupName,
        raw: &str,
    ) -> Result<(), IngressError> {
        let frame: CommentFrame = serde_json::from_str(raw)
            .map_err(|e| IngressError::MalformedPayload(e.to_string()))?;

        let title = match frame.title {
            Some(ref t) if !t.trim().is_empty() => t.clone(),
            _ => return Err(IngressError::MissingRequiredField("title")),
        };
        let content = match frame.content {
            Some(ref c) if !c.trim().is_empty() => c.clone(),
            _ => return Err(IngressError::MissingRequiredField("content")),
        };
        let user_id = frame
            .user_id
            .ok_or(IngressError::MissingRequiredField("user_id"))?;
        let content_type_id = frame
            .content_type_id
            .ok_or(IngressError::MissingRequiredField("content_type_id"))?;
        let object_id = frame
            .object_id
            .ok_or(IngressError::MissingRequiredField("object_id"))?;

        if user_id != identity.user_id {
            return Err(IngressError::Unauthorized(format!(
                "frame user_id {} does not match connection identity {}",
                user_id, identity.user_id
            )));
        }

        let kind = TargetKind::from_content_type_id(content_type_id).ok_or(
            IngressError::UnknownReferent {
                kind: "content_type",
                id: content_type_id,
            },
        )?;
        let target = CommentTarget::new(kind, object_id);

        let author = self
            .users
            .find_user(user_id)
            .await?
            .ok_or(IngressError::UnknownReferent {
                kind: "user",
                id: user_id.value(),
            })?;

        let comment = self
            .comments
            .create(NewComment {
                author: author.id,
                title,
                body: content,
                target,
                file_url: frame.file,
                image_url: frame.image,
            })
            .await?;

        info!(
            comment_id = %comment.id,
            author = %author.id,
            object_ct_id = %comment.target.object_ct_id(),
            "comment created"
        );

        let broadcast = CommentServerFrame::SendComment {
            comment: OutboundComment {
                username: author.username.clone(),
                content: comment.body.clone(),
                user_id: author.id,
                object_id: comment.target.object_id,
                object_ct_id: comment.target.object_ct_id(),
            },
            file_url: comment.file_url.clone(),
            image_url: comment.image_url.clone(),
        };
        self.broadcaster.broadcast(group, &to_payload(&broadcast)).await;

        Ok(())
    }
}
