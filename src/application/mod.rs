//! Application layer - ingress handlers and side-effect services.
//!
//! This layer orchestrates the mutate-then-broadcast flow: validate an
//! inbound payload, perform the domain mutation through the ports, and fan
//! the resulting frame out through the `Broadcaster` port. Nothing here is
//! fatal to the process; every failure is scoped to a single frame.

pub mod follow_requests;
pub mod ingress;
pub mod notifications;

pub use follow_requests::{FollowOutcome, FollowRequestError, FollowRequestService};
pub use ingress::{ChatIngress, CommentIngress, IngressError};
pub use notifications::NotificationService;
