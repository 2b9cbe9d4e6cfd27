//! In-memory comment store.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{CommentId, DomainError, Timestamp};
use crate::domain::messaging::{Comment, CommentTarget};
use crate::ports::{CommentRepository, NewComment};

/// Comment persistence backed by a `Vec` in insertion order.
pub struct InMemoryCommentRepository {
    comments: RwLock<Vec<Comment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, DomainError> {
        let row = Comment {
            id: CommentId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            author: comment.author,
            title: comment.title,
            body: comment.body,
            target: comment.target,
            file_url: comment.file_url,
            image_url: comment.image_url,
            created_at: Timestamp::now(),
        };
        self.comments
            .write()
            .expect("InMemoryCommentRepository: lock poisoned")
            .push(row.clone());
        Ok(row)
    }

    async fn find_by_target(&self, target: &CommentTarget) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .comments
            .read()
            .expect("InMemoryCommentRepository: lock poisoned")
            .iter()
            .filter(|c| c.target == *target)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::messaging::TargetKind;

    fn new_comment(object_id: i64) -> NewComment {
        NewComment {
            author: UserId::new(7),
            title: "Nice".to_string(),
            body: "Great post".to_string(),
            target: CommentTarget::new(TargetKind::Publication, object_id),
            file_url: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn find_by_target_filters_other_targets() {
        let repo = InMemoryCommentRepository::new();
        repo.create(new_comment(17)).await.unwrap();
        repo.create(new_comment(17)).await.unwrap();
        repo.create(new_comment(99)).await.unwrap();

        let target = CommentTarget::new(TargetKind::Publication, 17);
        assert_eq!(repo.find_by_target(&target).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn comments_keep_insertion_order() {
        let repo = InMemoryCommentRepository::new();
        let a = repo.create(new_comment(17)).await.unwrap();
        let b = repo.create(new_comment(17)).await.unwrap();

        let target = CommentTarget::new(TargetKind::Publication, 17);
        let found = repo.find_by_target(&target).await.unwrap();
        assert_eq!(found[0].id, a.id);
        assert_eq!(found[1].id, b.id);
    }
}
