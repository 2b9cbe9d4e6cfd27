//! Static token authenticator.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedIdentity};
use crate::ports::SessionAuthenticator;

/// Token-to-identity map with no expiry.
///
/// Stands in for a real session backend in tests and local runs; tokens
/// are registered up front and resolved by exact match.
#[derive(Default)]
pub struct StaticTokenAuthenticator {
    tokens: RwLock<HashMap<String, AuthenticatedIdentity>>,
}

impl StaticTokenAuthenticator {
    /// Creates an authenticator with no registered tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for an identity, replacing any previous binding.
    pub fn register(&self, token: impl Into<String>, identity: AuthenticatedIdentity) {
        self.tokens
            .write()
            .expect("StaticTokenAuthenticator: lock poisoned")
            .insert(token.into(), identity);
    }
}

#[async_trait]
impl SessionAuthenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        self.tokens
            .read()
            .expect("StaticTokenAuthenticator: lock poisoned")
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
