/**
 * Router Assembly
 *
 * Combines the public login route with the authenticated API routes and
 * adds request tracing.
 */

use axum::{http::StatusCode, middleware, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::auth::login;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = configure_api_routes(Router::new())
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    Router::new()
        .route("/register/login/{username}", post(login))
        .merge(protected)
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
