//! WebSocket endpoints: notifications, chat, and comment streams.
//!
//! Authentication happens before the upgrade. Chat and comment endpoints
//! refuse the handshake outright for a missing or invalid token, so an
//! unauthenticated client never holds a socket. The notification endpoint
//! is receive-only and accepts anonymous connections.

pub mod registry;
pub mod session;

pub use registry::{ConnectionHandle, GroupRegistry};

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::application::{ChatIngress, CommentIngress};
use crate::config::RealtimeConfig;
use crate::domain::foundation::{AuthenticatedIdentity, ChatId};
use crate::domain::messaging::GroupName;
use crate::ports::SessionAuthenticator;

/// Shared state for the WebSocket endpoints.
#[derive(Clone)]
pub struct RealtimeState {
    /// Group registry, shared with every broadcaster in the process.
    pub registry: Arc<GroupRegistry>,
    /// Ingress handler for chat frames.
    pub chat_ingress: Arc<ChatIngress>,
    /// Ingress handler for comment frames.
    pub comment_ingress: Arc<CommentIngress>,
    /// Token-to-identity resolution, consulted before the upgrade.
    pub authenticator: Arc<dyn SessionAuthenticator>,
    /// Realtime tuning knobs.
    pub realtime: RealtimeConfig,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Routes for the realtime endpoints.
pub fn realtime_router() -> Router<RealtimeState> {
    Router::new()
        .route("/ws/notify", get(notify_handler))
        .route("/ws/comments/:group", get(comments_handler))
        .route("/ws/message/:chat_id", get(chat_handler))
}

/// `GET /ws/notify` - receive-only notification stream.
///
/// A token is optional: anonymous listeners are allowed, but a token that
/// is present must be valid.
async fn notify_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<TokenQuery>,
    State(state): State<RealtimeState>,
) -> Response {
    if let Some(token) = query.token {
        if let Err(e) = state.authenticator.authenticate(&token).await {
            debug!("rejecting notification connection: {}", e);
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    ws.on_upgrade(move |socket| {
        session::run_notification_session(socket, state.registry, state.realtime)
    })
}

/// `GET /ws/comments/:group` - bidirectional comment stream on one group.
async fn comments_handler(
    ws: WebSocketUpgrade,
    Path(group): Path<String>,
    Query(query): Query<TokenQuery>,
    State(state): State<RealtimeState>,
) -> Response {
    let identity = match authenticate(&state, query.token).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let group = match GroupName::parse(&group) {
        Ok(group) => group,
        Err(e) => {
            debug!("rejecting comment connection, bad group name: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    ws.on_upgrade(move |socket| {
        session::run_comment_session(
            socket,
            state.registry,
            state.comment_ingress,
            identity,
            group,
            state.realtime,
        )
    })
}

/// `GET /ws/message/:chat_id` - bidirectional chat stream on one chat.
async fn chat_handler(
    ws: WebSocketUpgrade,
    Path(chat_id): Path<String>,
    Query(query): Query<TokenQuery>,
    State(state): State<RealtimeState>,
) -> Response {
    let identity = match authenticate(&state, query.token).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let chat_id: ChatId = match chat_id.parse() {
        Ok(id) => id,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    let group = GroupName::chat(chat_id);
    ws.on_upgrade(move |socket| {
        session::run_chat_session(
            socket,
            state.registry,
            state.chat_ingress,
            identity,
            group,
            state.realtime,
        )
    })
}

/// Resolves a required token, mapping every failure to 401 before the
/// upgrade happens.
async fn authenticate(
    state: &RealtimeState,
    token: Option<String>,
) -> Result<AuthenticatedIdentity, Response> {
    let Some(token) = token else {
        return Err(StatusCode::UNAUTHORIZED.into_response());
    };
    state.authenticator.authenticate(&token).await.map_err(|e| {
        debug!("rejecting connection: {}", e);
        StatusCode::UNAUTHORIZED.into_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_builds_without_panic() {
        let _router = realtime_router();
    }
}
