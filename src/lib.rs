//! Postfeed - Main Library
//!
//! A content-feed backend: identities publish posts with an image, read a
//! paginated newest-first feed, and receive create/update/delete
//! notifications over Server-Sent Events.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types used by the server and its clients
//!   - Post views, realtime events, validation, shared errors
//!
//! - **`backend`** - Axum server
//!   - Token authentication and the auth gate
//!   - Feed service, stores and the attachment lifecycle
//!   - Realtime broadcasting
//!
//! # Usage
//!
//! ```rust,no_run
//! use postfeed::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and serialization
//! - `backend::BackendError` for everything that reaches an HTTP response

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
