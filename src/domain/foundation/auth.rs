//! Authentication types for the domain layer.
//!
//! Every ingress operation receives an explicit [`AuthenticatedIdentity`]
//! value resolved before the WebSocket upgrade; handler code never infers
//! the caller from ambient state. The types have no provider dependencies -
//! any session backend can populate them via the `SessionAuthenticator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated caller resolved from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// The unique user identifier.
    pub user_id: UserId,

    /// Display name used in outbound broadcast frames.
    pub username: String,
}

impl AuthenticatedIdentity {
    /// Creates a new authenticated identity.
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

/// Authentication errors that can occur during session validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired session token")]
    InvalidToken,

    /// Token is valid but the user no longer exists in the system.
    #[error("User not found")]
    UserNotFound,

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the client should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_identity_new_creates_identity() {
        let identity = AuthenticatedIdentity::new(UserId::new(7), "alice");
        assert_eq!(identity.user_id, UserId::new(7));
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn auth_error_invalid_token_displays_correctly() {
        let err = AuthError::InvalidToken;
        assert_eq!(format!("{}", err), "Invalid or expired session token");
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(
            format!("{}", err),
            "Auth service unavailable: Connection refused"
        );
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }
}
