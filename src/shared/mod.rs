//! Shared Module
//!
//! This module contains the wire types of the feed service: post views,
//! realtime events, validation rules and the errors they raise. They carry no
//! server state and are what a client would deserialize.

/// Post wire types
pub mod post;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Field validation rules
pub mod validation;

/// Re-export commonly used types for convenience
pub use error::{FieldError, SharedError};
pub use event::{PostEvent, RealtimeEvent, POSTS_TOPIC};
pub use post::{CreatorSummary, PostView, PostsPage};
