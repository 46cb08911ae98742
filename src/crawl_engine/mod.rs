//! Crawl engine.
//!
//! Bounded-depth, same-origin traversal of a site: seeds from one
//! URL, visits discovered links through a FIFO work queue, captures a
//! screenshot per node, and aggregates the seed page's extraction as
//! the canonical content for the run.

pub mod orchestrator;
pub mod page_timeout;
pub mod retry;
pub mod types;

pub use orchestrator::{collect_same_origin_links, CrawlOrchestrator};
pub use retry::{Navigate, RetryPolicy};
pub use types::{CrawlItem, ExtractionAggregate};
