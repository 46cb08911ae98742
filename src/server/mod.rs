//! HTTP surface.

pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::ReviewPipeline;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReviewPipeline>,
    pub started_at: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(pipeline: Arc<ReviewPipeline>) -> Self {
        Self {
            pipeline,
            started_at: Instant::now(),
        }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/portfolio-review", post(routes::portfolio_review))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
