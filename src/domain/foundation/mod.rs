//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Agora realtime domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedIdentity};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ChatId, CommentId, CommunityId, ConnectionId, FollowRequestId, MessageId, NotificationId,
    UserId,
};
pub use timestamp::Timestamp;
