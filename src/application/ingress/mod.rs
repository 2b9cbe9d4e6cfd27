//! Message ingress - validation and dispatch of inbound client frames.
//!
//! One ingress handler per endpoint family: [`ChatIngress`] for the chat
//! endpoints (create and delete), [`CommentIngress`] for comment streams.
//! Each accepts one opaque text frame plus the connection's authenticated
//! identity, performs the domain mutation, and broadcasts the outcome.
//!
//! All failures are connection-local: the caller logs them and drops the
//! frame; the connection and its group memberships stay intact. Whether the
//! sender receives an error frame is a configuration decision
//! (`realtime.nack_on_error`), made outside this module.

mod chat;
mod comment;
pub mod frames;

pub use chat::ChatIngress;
pub use comment::CommentIngress;

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors raised while handling one inbound frame.
#[derive(Debug, Clone, Error)]
pub enum IngressError {
    /// The frame is not valid structured data for this endpoint.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A field required for the inferred operation is absent or empty.
    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),

    /// A referenced entity does not resolve.
    #[error("unknown {kind} id {id}")]
    UnknownReferent { kind: &'static str, id: i64 },

    /// The requester is not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The underlying store raised; the operation was aborted with no
    /// partial broadcast.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl IngressError {
    /// Stable class label used in log fields.
    pub fn class(&self) -> &'static str {
        match self {
            IngressError::MalformedPayload(_) => "malformed_payload",
            IngressError::MissingRequiredField(_) => "missing_required_field",
            IngressError::UnknownReferent { .. } => "unknown_referent",
            IngressError::Unauthorized(_) => "unauthorized",
            IngressError::Persistence(_) => "persistence_failure",
        }
    }
}

impl From<DomainError> for IngressError {
    fn from(err: DomainError) -> Self {
        IngressError::Persistence(err.to_string())
    }
}
