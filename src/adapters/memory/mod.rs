//! In-memory implementations of the persistence ports.
//!
//! Deterministic stores backed by `std::sync` locks. They serve the test
//! suites and the default wiring; swapping in database-backed adapters
//! only touches `main`.
//!
//! # Panics
//!
//! Methods panic if an internal lock is poisoned, which only happens after
//! another thread panicked while holding it.

mod auth;
mod chat_repository;
mod comment_repository;
mod community;
mod notification_repository;
mod user_directory;

pub use auth::StaticTokenAuthenticator;
pub use chat_repository::InMemoryChatRepository;
pub use comment_repository::InMemoryCommentRepository;
pub use community::{InMemoryCommunityDirectory, InMemoryFollowRequestRepository};
pub use notification_repository::InMemoryNotificationRepository;
pub use user_directory::InMemoryUserDirectory;
