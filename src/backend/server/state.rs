/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The loaded configuration
 * - The feed store (PostgreSQL or in-memory) behind `dyn FeedStore`
 * - The token service used by `auth_middleware` and login
 * - The feed service that owns every post mutation
 * - The realtime broadcast channel drained by `/realtime`
 *
 * Everything is behind `Arc` or is a cloneable channel handle, so cloning
 * the state per request is cheap.
 */
use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::TokenService;
use crate::backend::feed::FeedService;
use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::backend::server::config::ServerConfig;
use crate::backend::store::FeedStore;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,

    /// Persistence for identities and posts
    pub store: Arc<dyn FeedStore>,

    pub tokens: Arc<TokenService>,

    pub feed: Arc<FeedService>,

    /// Realtime event channel
    ///
    /// The feed service publishes into it; each `/realtime` subscriber
    /// holds its own receiver.
    pub realtime_broadcast: RealtimeEventBroadcast,
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn FeedStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<FeedService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.feed.clone()
    }
}

/// Implement FromRef for RealtimeEventBroadcast
///
/// This allows the SSE handler to extract the real-time event broadcast
/// sender directly from `AppState`.
impl FromRef<AppState> for RealtimeEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.realtime_broadcast.clone()
    }
}
