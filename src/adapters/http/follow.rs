//! Follow-request toggle endpoint.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::application::{FollowOutcome, FollowRequestError};
use crate::domain::foundation::CommunityId;

use super::{require_identity, ApiState};

#[derive(Debug, Deserialize)]
pub(crate) struct FollowBody {
    action: FollowAction,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FollowAction {
    SendRequest,
    RemoveRequest,
}

/// `POST /api/communities/:community_id/follow`
///
/// Body `{"action":"send_request"}` submits the caller's follow request,
/// `{"action":"remove_request"}` withdraws it; no body toggles. The
/// response's `request_status` is true when a request is now pending.
pub(crate) async fn toggle_follow(
    State(state): State<ApiState>,
    Path(community_id): Path<i64>,
    headers: HeaderMap,
    body: Option<Json<FollowBody>>,
) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let community_id = CommunityId::new(community_id);
    let result = match body.map(|Json(b)| b.action) {
        Some(FollowAction::SendRequest) => {
            state.follow_requests.send(&identity, community_id).await
        }
        Some(FollowAction::RemoveRequest) => {
            state.follow_requests.remove(&identity, community_id).await
        }
        None => state.follow_requests.toggle(&identity, community_id).await,
    };

    match result {
        Ok(FollowOutcome::Sent) => Json(json!({"request_status": true})).into_response(),
        Ok(FollowOutcome::Removed) => Json(json!({"request_status": false})).into_response(),
        Err(FollowRequestError::CommunityNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("community {} not found", id)})),
        )
            .into_response(),
        Err(FollowRequestError::Persistence(reason)) => {
            error!("follow toggle failed: {}", reason);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal error"})),
            )
                .into_response()
        }
    }
}
