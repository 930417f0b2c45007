pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::optimize::handlers;
use crate::state::AppState;

/// The router as served in production: routes plus request tracing.
///
/// No CORS layer: the shell is served from the relay's own origin, and a
/// CORS layer would answer `OPTIONS /api/optimize` preflights itself
/// instead of the 405 fallback.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/optimize",
            post(handlers::handle_optimize).fallback(handlers::handle_method_not_allowed),
        )
        .with_state(state)
}
