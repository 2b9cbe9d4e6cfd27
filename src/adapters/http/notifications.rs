//! Notification listing and acknowledgment endpoints.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::domain::foundation::NotificationId;

use super::{require_identity, ApiState};

#[derive(Debug, Deserialize)]
pub(crate) struct MarkReadBody {
    id: NotificationId,
}

/// `GET /api/notifications` - the caller's unread notifications.
pub(crate) async fn list(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    match state.notifications.list(&identity).await {
        Ok(rows) => {
            let body: Vec<_> = rows
                .iter()
                .map(|n| json!({"id": n.id, "message": n.message}))
                .collect();
            Json(body).into_response()
        }
        Err(e) => internal_error("listing notifications", &e.to_string()),
    }
}

/// `POST /api/notifications/read` - acknowledges one notification.
pub(crate) async fn mark_read(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<MarkReadBody>,
) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    match state.notifications.mark_read(&identity, body.id).await {
        Ok(true) => Json(json!({"status": "ok"})).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "notification not found"})),
        )
            .into_response(),
        Err(e) => internal_error("acknowledging notification", &e.to_string()),
    }
}

/// `POST /api/notifications/read-all` - acknowledges every notification.
pub(crate) async fn mark_all_read(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    match state.notifications.mark_all_read(&identity).await {
        Ok(removed) => Json(json!({"status": "ok", "removed": removed})).into_response(),
        Err(e) => internal_error("acknowledging notifications", &e.to_string()),
    }
}

fn internal_error(action: &str, reason: &str) -> Response {
    error!("{} failed: {}", action, reason);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "internal error"})),
    )
        .into_response()
}
