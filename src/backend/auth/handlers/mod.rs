//! Authentication Handlers Module
//!
//! HTTP handlers for the `/auth` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - Registration handler
//! ├── login.rs    - Token issuing handler
//! └── status.rs   - Status read/update handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - PUT /auth/signup - Create an identity
//! - **`login`** - POST /auth/login - Exchange credentials for a token
//! - **`get_status`** - GET /auth/status - Current status line
//! - **`update_status`** - PATCH /auth/status - Replace the status line

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Status handlers
pub mod status;

pub use types::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

pub use login::login;
pub use signup::signup;
pub use status::{get_status, update_status};
