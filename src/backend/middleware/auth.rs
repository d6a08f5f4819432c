/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * an authenticated identity. It extracts and verifies the bearer token
 * from the Authorization header and provides the identity to handlers.
 *
 * The token is the sole proof of identity; the store is not consulted.
 */
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const NOT_AUTHENTICATED: &str = "Not authenticated.";

/// Authenticated identity extracted from the token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub identity_id: Uuid,
    pub email: String,
}

/// Verify the bearer token in `headers`
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthenticatedUser, BackendError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("[Auth] Missing Authorization header");
            BackendError::unauthenticated(NOT_AUTHENTICATED)
        })?;

    // Format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("[Auth] Invalid Authorization header format");
        BackendError::unauthenticated(NOT_AUTHENTICATED)
    })?;

    let verified = tokens.verify(token.trim()).map_err(|e| {
        tracing::warn!("[Auth] Rejected token: {}", e);
        BackendError::unauthenticated(NOT_AUTHENTICATED)
    })?;

    Ok(AuthenticatedUser {
        identity_id: verified.identity_id,
        email: verified.email,
    })
}

/// Authentication middleware
///
/// Attaches `AuthenticatedUser` to the request extensions, or answers 401.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(request.headers(), &app_state.tokens)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated identity
///
/// Only valid on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                BackendError::unauthenticated(NOT_AUTHENTICATED)
            })?;

        Ok(AuthUser(user))
    }
}
