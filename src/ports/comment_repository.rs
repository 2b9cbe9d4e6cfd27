//! CommentRepository port - comments on polymorphic targets.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::messaging::{Comment, CommentTarget};

/// Fields for a comment about to be created; the store assigns the id and
/// the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// The author of the comment.
    pub author: UserId,
    /// Short title line.
    pub title: String,
    /// Free-text body.
    pub body: String,
    /// What this comment responds to.
    pub target: CommentTarget,
    /// URL of an attached file, if any.
    pub file_url: Option<String>,
    /// URL of an attached image, if any.
    pub image_url: Option<String>,
}

/// Port for comment persistence.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Creates a comment and returns the stored row.
    async fn create(&self, comment: NewComment) -> Result<Comment, DomainError>;

    /// All comments attached to one polymorphic target, oldest first.
    async fn find_by_target(&self, target: &CommentTarget) -> Result<Vec<Comment>, DomainError>;
}
