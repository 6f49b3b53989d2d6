//! HTTP route handlers

mod variations;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::AppState;

async fn healthcheck() -> &'static str {
    "OK"
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/variations", get(variations::dump))
        .route(
            "/variations/:repo/:branch/:trigger/:testsuite",
            get(variations::record),
        )
        .route(
            "/variations/:repo/:branch/:trigger/:testsuite/:field",
            get(variations::field),
        )
        .route("/reload", post(variations::reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
