//! Plain HTTP endpoints: follow requests and notification acknowledgment.
//!
//! These live next to the WebSocket endpoints and share the same
//! authenticator and services. Authentication is a bearer token in the
//! `Authorization` header, resolved through the `SessionAuthenticator`
//! port exactly like the WebSocket handshake.

mod follow;
mod notifications;

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::application::{FollowRequestService, NotificationService};
use crate::domain::foundation::AuthenticatedIdentity;
use crate::ports::SessionAuthenticator;

/// Shared state for the HTTP endpoints.
#[derive(Clone)]
pub struct ApiState {
    /// Follow-request workflow.
    pub follow_requests: Arc<FollowRequestService>,
    /// Notification listing and acknowledgment.
    pub notifications: Arc<NotificationService>,
    /// Token-to-identity resolution.
    pub authenticator: Arc<dyn SessionAuthenticator>,
}

/// Routes for the HTTP API.
pub fn api_router() -> Router<ApiState> {
    Router::new()
        .route("/api/communities/:community_id/follow", post(follow::toggle_follow))
        .route("/api/notifications", get(notifications::list))
        .route("/api/notifications/read", post(notifications::mark_read))
        .route("/api/notifications/read-all", post(notifications::mark_all_read))
}

/// Resolves the bearer token from the `Authorization` header, mapping
/// every failure to 401.
pub(crate) async fn require_identity(
    state: &ApiState,
    headers: &HeaderMap,
) -> Result<AuthenticatedIdentity, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    state
        .authenticator
        .authenticate(token)
        .await
        .map_err(|_| unauthorized())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "authentication required"})),
    )
        .into_response()
}
