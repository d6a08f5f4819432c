/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /auth/login.
 *
 * # Login Process
 *
 * 1. Look up the identity by (normalized) email
 * 2. Verify the password against the stored bcrypt hash
 * 3. Issue a one-hour token
 */
use axum::{extract::State, response::Json};
use bcrypt::verify;
use std::sync::Arc;

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::FeedStore;
use crate::shared::validation::normalize_email;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Store, hashing or signing failure
///
/// # Example Response
///
/// ```json
/// {"token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "userId": "123e4567-..."}
/// ```
pub async fn login(
    State(store): State<Arc<dyn FeedStore>>,
    State(tokens): State<Arc<TokenService>>,
    Json(request): Json<LoginRequest>,
) -> BackendResult<Json<LoginResponse>> {
    let email = normalize_email(&request.email);
    tracing::info!("[Auth] Login request for email: {}", email);

    let identity = store.find_identity_by_email(&email).await?.ok_or_else(|| {
        tracing::warn!("[Auth] Unknown email: {}", email);
        BackendError::unauthenticated("A user with this email could not be found.")
    })?;

    if !verify(request.password.trim(), &identity.password_hash)? {
        tracing::warn!("[Auth] Wrong password for: {}", email);
        return Err(BackendError::unauthenticated("Wrong password!"));
    }

    let token = tokens.issue(identity.id, &identity.email)?;
    tracing::info!("[Auth] User logged in: {}", identity.email);

    Ok(Json(LoginResponse {
        token,
        user_id: identity.id,
    }))
}
