//! Route definitions and router construction.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// CRUD routes without the `/api` prefix.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams",
            get(handlers::teams::list).post(handlers::teams::add),
        )
        .route(
            "/teams/{id}",
            get(handlers::teams::get)
                .put(handlers::teams::rename)
                .delete(handlers::teams::remove),
        )
        .route(
            "/members",
            get(handlers::members::list).post(handlers::members::add),
        )
        .route("/members/search", get(handlers::members::search))
        .route("/members/page", get(handlers::members::page))
        .route(
            "/members/{id}",
            get(handlers::members::get)
                .put(handlers::members::update)
                .delete(handlers::members::remove),
        )
        .route(
            "/members/by-username/{username}",
            get(handlers::members::by_username),
        )
        .route("/stats", get(handlers::members::stats))
}

/// Create the main router.
///
/// Every request is traced and bounded by `request_timeout`; a request that
/// runs over gets `408 Request Timeout`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig, request_timeout: Duration) -> Router {
    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/health", get(health_check))
        .route("/all-members", get(handlers::all_members::lazy))
        .route("/all-members2", get(handlers::all_members::fetch_join))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
