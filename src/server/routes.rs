//! Request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use url::Url;

use super::AppState;
use crate::pipeline::ReviewError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub url: Option<String>,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
    #[serde(default)]
    pub include_references: bool,
}

fn default_use_cache() -> bool {
    true
}

/// Service banner.
pub async fn root() -> Response {
    Json(json!({
        "status": "ok",
        "message": "foliolens API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "portfolioReview": "/portfolio-review"
        }
    }))
    .into_response()
}

/// Liveness probe.
pub async fn health(State(state): State<AppState>) -> Response {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptimeSecs": state.started_at.elapsed().as_secs(),
    }))
    .into_response()
}

/// Run a portfolio review for the submitted URL.
pub async fn portfolio_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Response {
    let Some(url) = request.url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "URL is required" })),
        )
            .into_response();
    };

    if Url::parse(&url).is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid URL format" })),
        )
            .into_response();
    }

    match state
        .pipeline
        .review(&url, request.use_cache, request.include_references)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": outcome.report,
                "fromCache": outcome.from_cache,
            })),
        )
            .into_response(),
        Err(ReviewError::InvalidUrl) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid URL format" })),
        )
            .into_response(),
        Err(ReviewError::NoContent) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No content found on the provided URL" })),
        )
            .into_response(),
        Err(e) => {
            error!(url = %url, "Error processing portfolio: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
