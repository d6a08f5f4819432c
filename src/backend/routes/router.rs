/**
 * Router Configuration
 *
 * This module combines all route configurations into a single Axum router
 * and applies the cross-cutting layers.
 *
 * # Layers (outermost first)
 *
 * 1. CORS (permissive)
 * 2. Request tracing
 * 3. Body size limit for multipart uploads
 */
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::feed_routes::configure_feed_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// ## Auth Routes
/// - `PUT /auth/signup`, `POST /auth/login`, `GET|PATCH /auth/status`
///
/// ## Feed Routes
/// - `GET /feed/posts`, `POST /feed/post`, `GET|PUT|DELETE /feed/post/{postId}`
/// - `GET /realtime`
///
/// ## Static Files
/// Post images are served from `<upload root>/images` under `/images`.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_api_routes(router, &app_state);
    let router = configure_feed_routes(router, &app_state);

    let images_dir = app_state.config.upload_root.join(crate::backend::attachments::IMAGES_DIR);
    let router = router.nest_service("/images", ServeDir::new(images_dir));

    let body_limit = app_state.config.max_upload_bytes;

    router
        .fallback(|| async { crate::backend::error::BackendError::not_found("Not found.") })
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
