//! HTTP boundary: status-code mapping and response shapes.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use common::{analysis_json, decomposition_json, FailingScraper, ScriptedModel, StaticScraper};
use foliolens::cache::AnalysisCache;
use foliolens::config::CrawlConfig;
use foliolens::llm::LanguageModel;
use foliolens::pipeline::{ReviewPipeline, SiteScraper};
use foliolens::server::{router, AppState};

fn app(scraper: Arc<dyn SiteScraper>, responses: Vec<String>, base_dir: &TempDir) -> axum::Router {
    let model: Arc<dyn LanguageModel> = Arc::new(ScriptedModel::new(responses));
    let config = CrawlConfig::default().with_screenshot_base_dir(base_dir.path().to_path_buf());
    let pipeline = Arc::new(ReviewPipeline::new(
        scraper,
        model,
        Arc::new(AnalysisCache::new()),
        config,
    ));
    router(AppState::new(pipeline))
}

fn review_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/portfolio-review")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_uptime() {
    let base = TempDir::new().unwrap();
    let app = app(Arc::new(StaticScraper::with_content()), vec![], &base);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["uptimeSecs"].is_number());
}

#[tokio::test]
async fn missing_url_is_bad_request() {
    let base = TempDir::new().unwrap();
    let app = app(Arc::new(StaticScraper::with_content()), vec![], &base);

    let response = app
        .oneshot(review_request(serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn malformed_url_is_bad_request() {
    let base = TempDir::new().unwrap();
    let app = app(Arc::new(StaticScraper::with_content()), vec![], &base);

    let response = app
        .oneshot(review_request(serde_json::json!({"url": "not a url"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid URL format");
}

#[tokio::test]
async fn empty_page_is_not_found() {
    let base = TempDir::new().unwrap();
    let app = app(Arc::new(StaticScraper::empty()), vec![], &base);

    let response = app
        .oneshot(review_request(
            serde_json::json!({"url": "https://example.com/portfolio"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No content found on the provided URL");
}

#[tokio::test]
async fn scrape_failure_is_internal_error_with_message() {
    let base = TempDir::new().unwrap();
    let app = app(Arc::new(FailingScraper), vec![], &base);

    let response = app
        .oneshot(review_request(
            serde_json::json!({"url": "https://example.com/portfolio"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Failed to scrape"));
}

#[tokio::test]
async fn successful_review_then_cache_hit() {
    let base = TempDir::new().unwrap();
    let app = app(
        Arc::new(StaticScraper::with_content()),
        vec![decomposition_json(), analysis_json()],
        &base,
    );

    let first = app
        .clone()
        .oneshot(review_request(
            serde_json::json!({"url": "https://example.com/portfolio"}),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = body_json(first).await;
    assert_eq!(first_body["success"], true);
    assert_eq!(first_body["fromCache"], false);
    assert!(first_body["data"]["summary"].is_string());
    assert!(first_body["data"]["areas"]["clarity"]["score"].is_number());

    let second = app
        .oneshot(review_request(
            serde_json::json!({"url": "https://example.com/portfolio"}),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second_body = body_json(second).await;
    assert_eq!(second_body["fromCache"], true);
    assert_eq!(second_body["data"], first_body["data"]);
}

#[tokio::test]
async fn use_cache_false_is_honored() {
    let base = TempDir::new().unwrap();
    let app = app(
        Arc::new(StaticScraper::with_content()),
        vec![
            decomposition_json(),
            analysis_json(),
            decomposition_json(),
            analysis_json(),
        ],
        &base,
    );

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(review_request(serde_json::json!({
                "url": "https://example.com/portfolio",
                "useCache": false
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["fromCache"], false);
    }
}
