//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Environment configuration and database loading
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig and load_database
//! └── init.rs         - create_app / build_state
//! ```

/// Application state
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, create_app, StartupError};
pub use state::AppState;
