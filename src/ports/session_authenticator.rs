//! SessionAuthenticator port - session token to identity resolution.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedIdentity};

/// Port for validating a session token before the WebSocket upgrade.
///
/// Chat and comment endpoints reject anonymous connections: the upgrade
/// handler resolves the token into an [`AuthenticatedIdentity`] first and
/// refuses the handshake on failure. The resolved identity is then passed
/// explicitly into every ingress call for that connection.
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Resolves a session token into the authenticated caller.
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError>;
}
