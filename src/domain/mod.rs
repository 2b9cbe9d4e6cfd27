//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `messaging` - Broadcast groups, chats, comments, and notifications
//! - `community` - Communities and the follow-request workflow

pub mod community;
pub mod foundation;
pub mod messaging;
