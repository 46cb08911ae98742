pub mod browser;
pub mod cache;
pub mod config;
pub mod crawl_engine;
pub mod llm;
pub mod page_extractor;
pub mod pipeline;
pub mod server;
pub mod utils;

pub use browser::BrowserSession;
pub use cache::{AnalysisCache, CacheEntry};
pub use config::{AppConfig, CrawlConfig};
pub use crawl_engine::{CrawlOrchestrator, ExtractionAggregate, Navigate, RetryPolicy};
pub use llm::{AnalysisReport, LanguageModel, LlmError, OpenAiClient};
pub use page_extractor::{PageSnapshot, ScreenshotRecord, ScreenshotStore};
pub use pipeline::{BrowserScraper, ReviewError, ReviewOutcome, ReviewPipeline, SiteScraper};
pub use server::{router, AppState};
