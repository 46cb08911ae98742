// foliolens server: crawl a portfolio site, extract its content, and
// return an LLM-backed scored review over HTTP.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use foliolens::cache::AnalysisCache;
use foliolens::config::AppConfig;
use foliolens::llm::OpenAiClient;
use foliolens::pipeline::{BrowserScraper, ReviewPipeline};
use foliolens::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("foliolens=info,tower_http=info")),
        )
        .init();

    let model = Arc::new(
        OpenAiClient::new(&config.openai_api_key, &config.model)
            .with_base_url(&config.openai_base_url),
    );
    let scraper = Arc::new(BrowserScraper::new(config.crawl.clone()));
    let cache = Arc::new(AnalysisCache::new());
    let pipeline = Arc::new(ReviewPipeline::new(
        scraper,
        model,
        cache,
        config.crawl.clone(),
    ));

    let app = server::router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    info!(port = config.port, model = %config.model, "Server started");

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;

    Ok(())
}
