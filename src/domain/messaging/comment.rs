//! Comments on polymorphic content.
//!
//! A comment attaches to one of several target kinds (a thread, a
//! publication, a community post). The target is a tagged pair of kind and
//! object id, resolved through an explicit lookup table rather than a
//! reflective type reference.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, Timestamp, UserId};

/// The kind of entity a comment attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A discussion thread.
    Thread,
    /// A user publication.
    Publication,
    /// A post inside a community.
    CommunityPost,
}

impl TargetKind {
    /// Resolves a wire-level content type id into a kind.
    ///
    /// The table is fixed; unknown ids are an unresolvable referent, not a
    /// parse error.
    pub fn from_content_type_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(TargetKind::Thread),
            2 => Some(TargetKind::Publication),
            3 => Some(TargetKind::CommunityPost),
            _ => None,
        }
    }

    /// Returns the wire-level content type id for this kind.
    pub fn content_type_id(&self) -> i64 {
        match self {
            TargetKind::Thread => 1,
            TargetKind::Publication => 2,
            TargetKind::CommunityPost => 3,
        }
    }
}

/// Polymorphic comment target: which entity, of which kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentTarget {
    /// The kind of target entity.
    pub kind: TargetKind,
    /// The id of the target entity within its kind.
    pub object_id: i64,
}

impl CommentTarget {
    /// Creates a new comment target.
    pub fn new(kind: TargetKind, object_id: i64) -> Self {
        Self { kind, object_id }
    }

    /// Composite identifier carried on outbound frames, the object id
    /// concatenated with the content type id.
    pub fn object_ct_id(&self) -> String {
        format!("{}{}", self.object_id, self.kind.content_type_id())
    }
}

/// A comment on a thread, publication, or community post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique id of this comment.
    pub id: CommentId,
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
    /// When the comment was created.
    pub created_at: Timestamp,
}
