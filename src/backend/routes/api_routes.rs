/**
 * Auth Routes
 *
 * # Routes
 *
 * - `PUT /auth/signup` - Registration (public)
 * - `POST /auth/login` - Token issue (public)
 * - `GET /auth/status` - Read status (requires authentication)
 * - `PATCH /auth/status` - Update status (requires authentication)
 */
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_status, login, signup, update_status};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure the `/auth` routes
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/status", get(get_status).patch(update_status))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/auth/signup", put(signup))
        .route("/auth/login", post(login))
        .merge(protected)
}
