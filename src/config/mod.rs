//! Service and crawl configuration.

pub mod app;
pub mod types;

pub use app::AppConfig;
pub use types::CrawlConfig;
