//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! ├── api_routes.rs   - /auth endpoints
//! └── feed_routes.rs  - /feed and /realtime endpoints
//! ```
//!
//! Gated routes are grouped in a sub-router with `auth_middleware` as a
//! `route_layer`, so unmatched paths still fall through to the 404 fallback
//! instead of answering 401.

pub mod router;
pub mod api_routes;
pub mod feed_routes;

pub use router::create_router;
