/**
 * Status Handlers
 *
 * GET and PATCH /auth/status read and change the status line of the
 * authenticated identity. Both act only on the identity named in the token.
 */
use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::backend::auth::handlers::types::{MessageResponse, StatusResponse, StatusUpdateRequest};
use crate::backend::error::BackendResult;
use crate::backend::feed::FeedService;
use crate::backend::middleware::AuthUser;

/// Get status handler (GET /auth/status)
pub async fn get_status(
    State(feed): State<Arc<FeedService>>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<StatusResponse>> {
    let status = feed.get_status(user.identity_id).await?;
    Ok(Json(StatusResponse { status }))
}

/// Update status handler (PATCH /auth/status)
pub async fn update_status(
    State(feed): State<Arc<FeedService>>,
    AuthUser(user): AuthUser,
    Json(request): Json<StatusUpdateRequest>,
) -> BackendResult<Json<MessageResponse>> {
    feed.update_status(user.identity_id, &request.status).await?;
    tracing::info!("[Auth] Status updated for {}", user.identity_id);

    Ok(Json(MessageResponse {
        message: "User updated.".to_string(),
    }))
}
