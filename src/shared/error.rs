//! Shared Error Types
//!
//! This module defines error types for the wire-level types in `shared`:
//! field validation of incoming post/auth payloads and (de)serialization of
//! realtime events.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A single field failed validation
//!
//! # Usage
//!
//! ```rust
//! use postfeed::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title must not be empty.");
//! assert_eq!(error.field(), Some("title"));
//! ```
use serde::Serialize;
use thiserror::Error;

/// Errors raised by shared wire types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

/// Serializable view of a validation failure, returned in the `data` array
/// of a 422 response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }

    /// Convert into the serializable per-field form
    pub fn to_field_error(&self) -> Option<FieldError> {
        match self {
            Self::ValidationError { field, message } => Some(FieldError {
                field: field.clone(),
                message: message.clone(),
            }),
            Self::SerializationError { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
