/**
 * Signup Handler
 *
 * This module implements the registration handler for PUT /auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate email shape, name and password length
 * 2. Reject an email that is already registered
 * 3. Hash the password using bcrypt at the configured cost
 * 4. Create the identity
 * 5. Return the new identity id
 *
 * No token is issued here; clients log in afterwards.
 */
use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;
use std::sync::Arc;

use crate::backend::auth::handlers::types::{SignupRequest, SignupResponse};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::config::ServerConfig;
use crate::backend::store::{FeedStore, NewIdentity, StoreError};
use crate::shared::validation::{normalize_email, validate_signup};

/// Sign up handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - Invalid fields, or the email is taken
/// * `500 Internal Server Error` - Password hashing or store failure
///
/// # Example Request
///
/// ```http
/// PUT /auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {"email": "max@example.com", "name": "Max", "password": "secret"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"message": "User created!", "userId": "123e4567-e89b-12d3-a456-426614174000"}
/// ```
pub async fn signup(
    State(store): State<Arc<dyn FeedStore>>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<SignupRequest>,
) -> BackendResult<(StatusCode, Json<SignupResponse>)> {
    tracing::info!("[Auth] Signup request for email: {}", request.email);

    validate_signup(&request.email, &request.name, &request.password).map_err(|errors| {
        tracing::warn!("[Auth] Signup rejected, {} invalid field(s)", errors.len());
        BackendError::validation(errors)
    })?;

    let email = normalize_email(&request.email);
    if store.find_identity_by_email(&email).await?.is_some() {
        tracing::warn!("[Auth] Email already exists: {}", email);
        return Err(StoreError::DuplicateEmail(email).into());
    }

    let password_hash = hash(request.password.trim(), config.bcrypt_cost)?;

    let identity = store
        .create_identity(NewIdentity {
            email,
            password_hash,
            name: request.name.trim().to_string(),
        })
        .await?;

    tracing::info!("[Auth] User created: {} ({})", identity.name, identity.email);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created!".to_string(),
            user_id: identity.id,
        }),
    ))
}
