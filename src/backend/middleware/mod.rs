//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token gate for routes that act on behalf of an identity
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware;
//! use postfeed::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/feed/post", post(create_post))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, authenticate, AuthUser, AuthenticatedUser};
