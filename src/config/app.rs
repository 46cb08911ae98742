//! Environment-derived service configuration.

use anyhow::{Context, Result};

use super::CrawlConfig;

/// Service-level configuration loaded from the environment.
///
/// `OPENAI_API_KEY` is required; everything else has a default. A
/// `.env` file in the working directory is honored when present.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub port: u16,
    pub crawl: CrawlConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine; real deployments set variables directly.
        let _ = dotenvy::dotenv();

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .context("Missing required environment variable: OPENAI_API_KEY")?;

        let openai_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {raw}"))?,
            Err(_) => 3000,
        };

        let mut crawl = CrawlConfig::default();
        if let Ok(raw) = std::env::var("CRAWL_MAX_DEPTH") {
            let depth = raw
                .parse::<u8>()
                .with_context(|| format!("Invalid CRAWL_MAX_DEPTH value: {raw}"))?;
            crawl = crawl.with_max_depth(depth);
        }

        Ok(Self {
            openai_api_key,
            openai_base_url,
            model,
            port,
            crawl,
        })
    }
}
