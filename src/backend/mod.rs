//! Backend Module
//!
//! All server-side code: an Axum HTTP server for a content feed with
//! token authentication, image attachments and realtime notifications.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Signup, login, status and the token service
//! - **`middleware`** - Bearer-token gate
//! - **`feed`** - Post mutations and queries
//! - **`store`** - Persistence for identities and posts
//! - **`attachments`** - Image file lifecycle
//! - **`realtime`** - Event broadcasting and SSE subscriptions
//! - **`error`** - Backend error type and HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── feed/           - Feed service and handlers
//! ├── store/          - FeedStore trait, memory and PostgreSQL stores
//! ├── attachments/    - AttachmentStore trait and disk store
//! ├── realtime/       - Event broadcasting
//! └── error/          - Error types
//! ```
//!
//! # Thread Safety
//!
//! - Stores and services are shared as `Arc<dyn Trait + Send + Sync>`
//! - `broadcast::Sender` is cloned into every SSE subscriber
//! - File deletion runs on spawned tokio tasks

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and tokens
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Feed service and handlers
pub mod feed;

/// Persistence
pub mod store;

/// Image attachments
pub mod attachments;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use feed::FeedService;
pub use realtime::{broadcast_event, handle_realtime_subscription, RealtimeEventBroadcast};
pub use server::{build_state, create_app, AppState, ServerConfig};
