//! Backend Error Module
//!
//! This module defines the error type used by handlers and the feed service,
//! and its conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions and status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Every domain check returns a `BackendError` with its kind fixed at the
//! point of failure. Anything reaching the boundary without a kind is a 500.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, VALIDATION_FAILED};

/// Result alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
