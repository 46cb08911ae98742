//! Crawl traversal.
//!
//! Iterative work-queue traversal with an owned visited set. Nodes
//! visit in discovery order; a failure at one node is logged with its
//! URL and depth and never aborts the rest of the traversal. Every
//! opened page is closed when its node completes, errors included.

use anyhow::Result;
use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};
use url::Url;

use super::retry::{PageNavigator, RetryPolicy};
use super::types::{CrawlItem, ExtractionAggregate};
use crate::browser::BrowserSession;
use crate::config::CrawlConfig;
use crate::page_extractor::{extract_links, extract_snapshot, ScreenshotStore};
use crate::utils::{is_valid_url, normalize_url, same_origin};

/// Drives one bounded-depth, same-origin crawl run. Owns the visited
/// set and the aggregate for the duration of the run.
pub struct CrawlOrchestrator<'a> {
    session: &'a BrowserSession,
    config: &'a CrawlConfig,
    retry: RetryPolicy,
}

impl<'a> CrawlOrchestrator<'a> {
    #[must_use]
    pub fn new(session: &'a BrowserSession, config: &'a CrawlConfig) -> Self {
        Self {
            session,
            config,
            retry: RetryPolicy::from_config(config),
        }
    }

    /// Crawl from the seed URL, filling `store` with one screenshot
    /// per visited node. The returned aggregate carries the seed
    /// page's extraction as the run's canonical content.
    pub async fn crawl(
        &self,
        seed: &Url,
        store: &mut ScreenshotStore,
    ) -> Result<ExtractionAggregate> {
        let seed_url = normalize_url(seed.as_str())?;
        let mut aggregate = ExtractionAggregate::new(&seed_url);

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<CrawlItem> = VecDeque::new();
        queue.push_back(CrawlItem {
            url: seed_url,
            depth: 0,
        });

        while let Some(item) = queue.pop_front() {
            if !visited.insert(item.url.clone()) {
                continue;
            }

            info!(url = %item.url, depth = item.depth, "Crawling page");
            aggregate.visited_urls.push(item.url.clone());

            if let Err(e) = self
                .visit_node(seed, &item, store, &mut aggregate, &mut queue)
                .await
            {
                warn!(
                    url = %item.url,
                    depth = item.depth,
                    "Page crawl failed, continuing with remaining URLs: {e:#}"
                );
            }
        }

        aggregate.screenshots = store.records().to_vec();
        info!(
            pages = aggregate.visited_urls.len(),
            screenshots = aggregate.screenshots.len(),
            "Crawl completed"
        );
        Ok(aggregate)
    }

    /// Visit one node: open a page, navigate with retry, capture a
    /// screenshot, extract content (seed only) and links (while depth
    /// remains), then close the page whatever happened.
    async fn visit_node(
        &self,
        seed: &Url,
        item: &CrawlItem,
        store: &mut ScreenshotStore,
        aggregate: &mut ExtractionAggregate,
        queue: &mut VecDeque<CrawlItem>,
    ) -> Result<()> {
        let mut navigator = PageNavigator::open(self.session).await?;

        let outcome = self
            .process_node(&mut navigator, seed, item, store, aggregate, queue)
            .await;

        navigator.close().await;
        outcome
    }

    async fn process_node(
        &self,
        navigator: &mut PageNavigator<'_>,
        seed: &Url,
        item: &CrawlItem,
        store: &mut ScreenshotStore,
        aggregate: &mut ExtractionAggregate,
        queue: &mut VecDeque<CrawlItem>,
    ) -> Result<()> {
        self.retry.navigate(navigator, &item.url).await?;
        let page = navigator.page().clone();

        // A failed capture costs this node its screenshot, nothing more.
        if let Err(e) = store.capture(&page, &item.url).await {
            warn!(url = %item.url, "Screenshot capture failed: {e:#}");
        }

        // Only the seed page's extraction becomes the run's canonical
        // text/images; descendants contribute screenshots and links.
        if item.depth == 0 {
            let snapshot = extract_snapshot(&page, &item.url).await;
            aggregate.apply_seed_snapshot(snapshot);
        }

        if item.depth < self.config.max_depth() {
            match extract_links(&page).await {
                Ok(links) => {
                    for url in collect_same_origin_links(seed, &links) {
                        queue.push_back(CrawlItem {
                            url,
                            depth: item.depth + 1,
                        });
                    }
                }
                Err(e) => {
                    warn!(
                        url = %item.url,
                        depth = item.depth,
                        "Link extraction failed, subtree not explored: {e:#}"
                    );
                }
            }
        }

        Ok(())
    }
}

/// Crawlable link targets of a page: same-origin, normalized,
/// deduplicated, in DOM order. Malformed hrefs are dropped silently.
#[must_use]
pub fn collect_same_origin_links(seed: &Url, links: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for link in links {
        if !is_valid_url(link) || !same_origin(seed, link) {
            continue;
        }
        let Ok(normalized) = normalize_url(link) else {
            continue;
        };
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }
    out
}
