/**
 * Real-time Event System
 *
 * This module defines the envelope broadcast to realtime subscribers and the
 * feed-specific payload published on the `posts` topic.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::post::PostView;

/// Topic carrying feed mutations
pub const POSTS_TOPIC: &str = "posts";

/// Real-time event that can be broadcast to all subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Topic the event was published on
    pub topic: String,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when event occurred
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(topic: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Decode the payload of a `posts` event
    pub fn post_event(&self) -> Result<PostEvent, SharedError> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

/// Feed mutation published on the `posts` topic
///
/// Serializes as `{"action": "create" | "update" | "delete", "post": ...}`
/// where `post` is the full post for create/update and the post id for delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PostEvent {
    Create { post: PostView },
    Update { post: PostView },
    Delete { post: Uuid },
}

impl PostEvent {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }

    /// Serialize into a realtime payload
    pub fn to_payload(&self) -> Result<serde_json::Value, SharedError> {
        Ok(serde_json::to_value(self)?)
    }
}
