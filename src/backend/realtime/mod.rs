//! Real-time Update Module
//!
//! Best-effort fan-out of feed mutations to connected clients.
//!
//! # Architecture
//!
//! - **`broadcast`** - `EventPublisher` seam and the tokio broadcast channel behind it
//! - **`subscription`** - Server-Sent Events endpoint that drains the channel
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Event broadcasting utilities
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! The feed service only sees `EventPublisher`, so tests can substitute a
//! capturing fake for the channel.

/// Event broadcasting utilities
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{broadcast_event, EventPublisher, PublishError, RealtimeEventBroadcast};
pub use subscription::handle_realtime_subscription;
