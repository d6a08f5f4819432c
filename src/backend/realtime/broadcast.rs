/**
 * Real-time Event Broadcasting
 *
 * This module provides the publish side of the realtime system: the
 * `EventPublisher` seam the feed service talks to, and its implementation on
 * top of `tokio::sync::broadcast`.
 *
 * # Delivery
 *
 * Events go to every subscriber connected at the time of the send. There is
 * no persistence, replay or acknowledgment; a send with no subscribers is a
 * successful delivery to zero clients.
 */
use thiserror::Error;
use tokio::sync::broadcast;

use crate::shared::RealtimeEvent;

/// Real-time update event broadcast
///
/// This type represents a broadcast channel for real-time events.
/// It can be cloned and shared across multiple handlers.
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

/// Failure to hand an event to the transport
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("realtime transport unavailable: {0}")]
    Unavailable(String),
}

/// Narrow publish interface injected into the feed service
pub trait EventPublisher: Send + Sync {
    /// Publish `payload` on `topic`; returns the number of subscribers reached
    fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<usize, PublishError>;
}

impl EventPublisher for RealtimeEventBroadcast {
    fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<usize, PublishError> {
        Ok(broadcast_event(self, RealtimeEvent::new(topic, payload)))
    }
}

/// Create the realtime channel with room for `capacity` undelivered events
pub fn channel(capacity: usize) -> RealtimeEventBroadcast {
    let (tx, _) = broadcast::channel(capacity.max(1));
    tx
}

/// Broadcast a real-time event to all subscribers
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if no subscribers)
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    let topic = event.topic.clone();
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::info!("[Realtime] '{}' event broadcast to {} subscribers", topic, subscriber_count);
            subscriber_count
        }
        Err(e) => {
            // No subscribers, that's okay
            tracing::debug!("[Realtime] No subscribers to receive '{}' event: {:?}", topic, e);
            0
        }
    }
}
