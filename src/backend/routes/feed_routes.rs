/**
 * Feed Routes
 *
 * # Routes
 *
 * - `GET /feed/posts?page=N` - Page of posts (public)
 * - `POST /feed/post` - Create (requires authentication)
 * - `GET /feed/post/{postId}` - Fetch (requires authentication)
 * - `PUT /feed/post/{postId}` - Update (requires authentication)
 * - `DELETE /feed/post/{postId}` - Delete (requires authentication)
 * - `GET /realtime?topics=posts` - Server-Sent Events (public)
 */
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::feed::handlers::{create_post, delete_post, get_post, get_posts, update_post};
use crate::backend::middleware::auth_middleware;
use crate::backend::realtime::handle_realtime_subscription;
use crate::backend::server::state::AppState;

/// Configure the `/feed` and `/realtime` routes
pub fn configure_feed_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/feed/post", post(create_post))
        .route(
            "/feed/post/{postId}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/feed/posts", get(get_posts))
        .route("/realtime", get(handle_realtime_subscription))
        .merge(protected)
}
