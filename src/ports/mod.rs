//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Broadcaster` - fan-out of one payload to a broadcast group
//! - `SessionAuthenticator` - session token to identity resolution
//! - `UserDirectory` - user id to profile lookup
//! - `ChatRepository` - chats and chat messages
//! - `CommentRepository` - comments on polymorphic targets
//! - `NotificationRepository` - unread notifications
//! - `CommunityDirectory` / `FollowRequestRepository` - communities and
//!   their follow requests

mod broadcaster;
mod chat_repository;
mod comment_repository;
mod community;
mod notification_repository;
mod session_authenticator;
mod user_directory;

pub use broadcaster::Broadcaster;
pub use chat_repository::ChatRepository;
pub use comment_repository::{CommentRepository, NewComment};
pub use community::{CommunityDirectory, FollowRequestRepository};
pub use notification_repository::NotificationRepository;
pub use session_authenticator::SessionAuthenticator;
pub use user_directory::{UserDirectory, UserProfile};
