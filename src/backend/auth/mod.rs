//! Authentication Module
//!
//! Identity registration, login and the stateless tokens that prove an
//! identity on later requests.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── sessions.rs     - TokenService (issue / verify)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email, name and password → identity created → id returned
//! 2. **Login**: email and password verified → one-hour token returned
//! 3. **Gated requests**: `Authorization: Bearer <token>` checked by `auth_middleware`
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 with a shared secret and expire after 1 hour
//! - No session state is kept server-side

/// Token issuing and verification
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_status, login, signup, update_status};
pub use sessions::{TokenError, TokenService, VerifiedToken, TOKEN_TTL_SECS};
