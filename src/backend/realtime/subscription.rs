/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) subscription handler
 * for the `/realtime` endpoint. Each connected client gets its own receiver
 * on the broadcast channel and sees events published after it connected.
 *
 * # Topic Filtering
 *
 * Clients can filter events by topic using the `topics` query parameter:
 * - `?topics=posts` - Feed mutations only
 * - No parameter - Every topic
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - Lagged receivers log the number of skipped events and keep streaming
 */
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream;
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::backend::realtime::broadcast::RealtimeEventBroadcast;

/// Query parameters of `GET /realtime`
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    /// Comma-separated topic names
    pub topics: Option<String>,
}

impl SubscriptionQuery {
    /// Parsed topic filter; `None` subscribes to everything
    pub fn topic_filter(&self) -> Option<Vec<String>> {
        self.topics
            .as_deref()
            .map(|topics| {
                topics
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
    }
}

/// Handle real-time subscription (GET /realtime)
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: posts
/// data: {"topic":"posts","payload":{"action":"create","post":{...}},"timestamp":"..."}
/// ```
pub async fn handle_realtime_subscription(
    State(broadcast_tx): State<RealtimeEventBroadcast>,
    Query(query): Query<SubscriptionQuery>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    let filter = query.topic_filter();
    match &filter {
        Some(topics) => tracing::info!("[Realtime] New subscriber for topics: {:?}", topics),
        None => tracing::info!("[Realtime] New subscriber for all topics"),
    }

    let broadcast_rx = broadcast_tx.subscribe();

    // Only yield when there is an event to send; keep-alive comments hold the
    // connection open in between.
    let stream = stream::unfold((broadcast_rx, filter), move |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(ref topics) = filter {
                        if !topics.contains(&event.topic) {
                            continue;
                        }
                    }

                    let event_data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };

                    let sse_event = Event::default().event(event.topic.as_str()).data(event_data);
                    return Some((Ok(sse_event), (rx, filter)));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Receiver lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    tracing::warn!("[Realtime] Broadcast channel closed, ending stream");
                    return None;
                }
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
