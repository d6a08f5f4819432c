/**
 * Backend Error Types
 *
 * This module defines the error type returned by every handler and by the
 * feed service.
 *
 * # Error Categories
 *
 * ## Domain failures
 *
 * Raised at the point a check fails and propagated untouched to the
 * response:
 * - `Unauthenticated` (401) - missing, malformed, badly signed or expired token
 * - `InvalidInput` (422) - failed field validation or missing upload
 * - `Forbidden` (403) - authenticated, but not the owner
 * - `NotFound` (404) - referenced resource absent
 * - `Internal` (500) - explicit server-side failure
 *
 * ## Wrapped collaborator errors
 *
 * Store, hashing, signing, serialization and attachment errors carry no
 * status of their own and surface as 500, except a duplicate email which is
 * reported as invalid input.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::attachments::AttachmentError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Message used for every validation failure on post and auth payloads
pub const VALIDATION_FAILED: &str = "Validation failed, entered data is incorrect.";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Not authenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        /// Per-field failures, reported in the `data` array of the response
        errors: Vec<SharedError>,
    },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error("Token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Field validation failure carrying every offending field
    pub fn validation(errors: Vec<SharedError>) -> Self {
        Self::InvalidInput {
            message: VALIDATION_FAILED.to_string(),
            errors,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store(StoreError::DuplicateEmail(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. }
            | Self::Store(_)
            | Self::Attachment(_)
            | Self::Token(_)
            | Self::PasswordHash(_)
            | Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Wrapped collaborator errors are not echoed to clients.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthenticated { message }
            | Self::InvalidInput { message, .. }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Internal { message } => message.clone(),
            Self::Store(StoreError::DuplicateEmail(_)) => "E-Mail address already exists!".to_string(),
            _ => "An unexpected error occurred.".to_string(),
        }
    }

    /// Per-field validation failures, if any
    pub fn field_errors(&self) -> &[SharedError] {
        match self {
            Self::InvalidInput { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { .. } => Self::validation(vec![err]),
            SharedError::SerializationError { message } => Self::internal(message),
        }
    }
}
