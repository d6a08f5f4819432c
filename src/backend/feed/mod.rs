//! Feed Module
//!
//! Posts: the service that owns every feed mutation and the HTTP handlers
//! in front of it.
//!
//! # Module Structure
//!
//! ```text
//! feed/
//! ├── mod.rs       - Module exports and documentation
//! ├── service.rs   - FeedService (validation, ownership, files, events)
//! ├── handlers.rs  - /feed HTTP handlers
//! └── types.rs     - Multipart form and response bodies
//! ```
//!
//! # Mutation Pipeline
//!
//! ```text
//! request → auth_middleware → handler → FeedService
//!         → FeedStore → AttachmentStore → EventPublisher → response
//! ```

/// Feed mutation orchestration
pub mod service;

/// HTTP handlers
pub mod handlers;

/// Request and response types
pub mod types;

pub use service::{FeedService, POSTS_PER_PAGE};
pub use types::PostForm;
