//! Review pipeline.
//!
//! Sequences cache check → crawl → semantic extraction → analysis →
//! optional reference enrichment → cache write, timing each stage and
//! guaranteeing the run's screenshot directory is removed on success
//! and on every error path.

use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::browser::BrowserSession;
use crate::cache::AnalysisCache;
use crate::config::CrawlConfig;
use crate::crawl_engine::{CrawlOrchestrator, ExtractionAggregate};
use crate::llm::{
    AnalysisReport, LanguageModel, LlmError, PortfolioAnalyzer, ReferenceEnricher,
    SemanticExtractor,
};
use crate::page_extractor::ScreenshotStore;
use crate::utils::is_valid_url;

/// Failures surfaced at the pipeline boundary, mapped onto HTTP
/// statuses by the server layer.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("No content found on the provided URL")]
    NoContent,
    #[error("Failed to scrape portfolio: {0}")]
    Scrape(String),
    #[error("Screenshot storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Analysis(#[from] LlmError),
}

/// The crawl stage behind a seam so tests can run the pipeline
/// without a browser.
#[async_trait]
pub trait SiteScraper: Send + Sync {
    async fn scrape(
        &self,
        seed: &Url,
        store: &mut ScreenshotStore,
    ) -> anyhow::Result<ExtractionAggregate>;
}

/// Production scraper: launches a browser session per run and closes
/// it exactly once, whatever the crawl returned.
pub struct BrowserScraper {
    config: CrawlConfig,
}

impl BrowserScraper {
    #[must_use]
    pub fn new(config: CrawlConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SiteScraper for BrowserScraper {
    async fn scrape(
        &self,
        seed: &Url,
        store: &mut ScreenshotStore,
    ) -> anyhow::Result<ExtractionAggregate> {
        let session = BrowserSession::launch(&self.config)
            .await
            .context("Failed to launch browser")?;

        let result = {
            let orchestrator = CrawlOrchestrator::new(&session, &self.config);
            orchestrator.crawl(seed, store).await
        };

        if let Err(e) = session.close().await {
            warn!("Browser close reported an error: {e:#}");
        }

        result
    }
}

/// Outcome of one review request.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub report: AnalysisReport,
    pub from_cache: bool,
}

pub struct ReviewPipeline {
    scraper: Arc<dyn SiteScraper>,
    model: Arc<dyn LanguageModel>,
    cache: Arc<AnalysisCache>,
    crawl_config: CrawlConfig,
}

impl ReviewPipeline {
    #[must_use]
    pub fn new(
        scraper: Arc<dyn SiteScraper>,
        model: Arc<dyn LanguageModel>,
        cache: Arc<AnalysisCache>,
        crawl_config: CrawlConfig,
    ) -> Self {
        Self {
            scraper,
            model,
            cache,
            crawl_config,
        }
    }

    /// Run one end-to-end review.
    ///
    /// At most one run per seed URL executes at a time; a concurrent
    /// request for the same URL waits and, when `use_cache` holds,
    /// is served the entry the first run wrote.
    pub async fn review(
        &self,
        url: &str,
        use_cache: bool,
        include_references: bool,
    ) -> Result<ReviewOutcome, ReviewError> {
        if !is_valid_url(url) {
            return Err(ReviewError::InvalidUrl);
        }
        let seed = Url::parse(url).map_err(|_| ReviewError::InvalidUrl)?;
        let key = seed.to_string();

        let _guard = self.cache.begin(&key).await;

        if use_cache {
            if let Some(entry) = self.cache.get(&key).await {
                info!(
                    url = %key,
                    cache_age_ms = entry.age().num_milliseconds(),
                    "Serving cached portfolio analysis"
                );
                return Ok(ReviewOutcome {
                    report: entry.data,
                    from_cache: true,
                });
            }
        }

        let mut store = ScreenshotStore::create(self.crawl_config.screenshot_base_dir())
            .await
            .map_err(|e| ReviewError::Storage(format!("{e:#}")))?;

        let outcome = self.run_stages(&seed, &mut store, include_references).await;

        // Cleanup runs on the success path and on every error path.
        if let Err(e) = store.cleanup().await {
            warn!(url = %key, "Screenshot cleanup failed: {e:#}");
        }

        let report = outcome?;
        self.cache.put(key, report.clone()).await;

        Ok(ReviewOutcome {
            report,
            from_cache: false,
        })
    }

    async fn run_stages(
        &self,
        seed: &Url,
        store: &mut ScreenshotStore,
        include_references: bool,
    ) -> Result<AnalysisReport, ReviewError> {
        let run_start = Instant::now();

        info!(url = %seed, "Starting portfolio scrape");
        let mut aggregate = self
            .scraper
            .scrape(seed, store)
            .await
            .map_err(|e| ReviewError::Scrape(format!("{e:#}")))?;
        info!(
            url = %seed,
            scrape_ms = run_start.elapsed().as_millis() as u64,
            content_len = aggregate.text_content.len(),
            images = aggregate.images.len(),
            pages = aggregate.visited_urls.len(),
            "Portfolio scrape completed"
        );

        if !aggregate.has_content() {
            return Err(ReviewError::NoContent);
        }

        let extract_start = Instant::now();
        let screenshot_refs = store.file_names();
        let decomposition = SemanticExtractor::new(Arc::clone(&self.model))
            .extract_projects_and_skills(
                &aggregate.text_content,
                &aggregate.images,
                &screenshot_refs,
            )
            .await?;
        aggregate.projects = decomposition.projects;
        aggregate.skills = decomposition.skills;
        info!(
            url = %seed,
            extract_ms = extract_start.elapsed().as_millis() as u64,
            projects = aggregate.projects.len(),
            skills = aggregate.skills.len(),
            "Semantic extraction completed"
        );

        let analysis_start = Instant::now();
        let mut report = PortfolioAnalyzer::new(Arc::clone(&self.model))
            .analyze(&aggregate)
            .await?;
        info!(
            url = %seed,
            analysis_ms = analysis_start.elapsed().as_millis() as u64,
            "Portfolio analysis completed"
        );

        if include_references {
            let enrich_start = Instant::now();
            report = ReferenceEnricher::new(Arc::clone(&self.model))
                .enrich(&report)
                .await?;
            info!(
                url = %seed,
                enrich_ms = enrich_start.elapsed().as_millis() as u64,
                "Reference enrichment completed"
            );
        }

        info!(
            url = %seed,
            total_ms = run_start.elapsed().as_millis() as u64,
            "Pipeline run completed"
        );
        Ok(report)
    }
}
