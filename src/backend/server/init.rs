/**
 * Server Initialization
 *
 * This module wires configuration, store, attachments, tokens and the
 * realtime channel into an `AppState` and builds the router.
 *
 * # Initialization Process
 *
 * 1. Open the PostgreSQL store if `DATABASE_URL` is set, else use memory
 * 2. Create the realtime broadcast channel
 * 3. Create the disk attachment store under the upload root
 * 4. Create the token service and feed service
 * 5. Create and configure the router
 */
use axum::Router;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::attachments::DiskAttachmentStore;
use crate::backend::auth::sessions::TokenService;
use crate::backend::feed::FeedService;
use crate::backend::realtime::broadcast::channel;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{FeedStore, MemoryFeedStore, PgFeedStore};

/// Failures that prevent the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("upload root unusable: {0}")]
    UploadRoot(#[from] std::io::Error),
}

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing feed server");

    let store: Arc<dyn FeedStore> = match &config.database_url {
        Some(url) => Arc::new(PgFeedStore::new(load_database(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not survive a restart.");
            Arc::new(MemoryFeedStore::new())
        }
    };

    let attachments = DiskAttachmentStore::new(config.upload_root.clone());
    tokio::fs::create_dir_all(attachments.images_dir()).await?;

    let app_state = build_state(config, store);
    tracing::info!("Router configured");
    Ok(create_router(app_state))
}

/// Assemble the application state around an existing store
pub fn build_state(config: ServerConfig, store: Arc<dyn FeedStore>) -> AppState {
    let realtime_broadcast = channel(config.broadcast_capacity);
    let attachments = Arc::new(DiskAttachmentStore::new(config.upload_root.clone()));
    let tokens = Arc::new(TokenService::new(&config.jwt_secret));
    let feed = Arc::new(FeedService::new(
        store.clone(),
        attachments,
        Arc::new(realtime_broadcast.clone()),
    ));

    AppState {
        config: Arc::new(config),
        store,
        tokens,
        feed,
        realtime_broadcast,
    }
}
