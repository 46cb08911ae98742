//! Navigation retry with page-recreation recovery.
//!
//! A failed navigation can leave the page handle in a torn state that
//! a naive retry on the same handle would simply re-fail, so before
//! each retry the handle is probed and, if dead, replaced with a
//! fresh configured page from the session.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, warn};

use super::page_timeout::with_page_timeout;
use crate::browser::BrowserSession;
use crate::config::CrawlConfig;

/// The navigation surface the retry loop drives. Production code uses
/// [`PageNavigator`]; tests substitute fakes.
#[async_trait]
pub trait Navigate: Send {
    /// Navigate to the URL and wait for the load to settle.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Whether the current handle can still serve requests.
    async fn is_usable(&self) -> bool;

    /// Replace a dead handle with a fresh, fully configured one.
    async fn recreate(&mut self) -> Result<()>;
}

/// Retry loop state. A recovery pass always separates two attempts.
#[derive(Debug)]
enum AttemptState {
    Attempting { remaining: u32 },
    Recovering { remaining: u32 },
    Exhausted,
}

/// Bounded navigation retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    #[must_use]
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(config.max_nav_attempts(), config.nav_retry_delay())
    }

    /// Drive the navigator at `url` until it succeeds or the attempt
    /// budget is exhausted, in which case the last navigation error
    /// propagates.
    pub async fn navigate(&self, nav: &mut dyn Navigate, url: &str) -> Result<()> {
        let mut state = AttemptState::Attempting {
            remaining: self.max_attempts,
        };
        let mut last_err: Option<anyhow::Error> = None;

        loop {
            state = match state {
                AttemptState::Attempting { remaining } => match nav.goto(url).await {
                    Ok(()) => return Ok(()),
                    Err(e) => {
                        warn!(
                            url,
                            attempts_left = remaining - 1,
                            "Navigation attempt failed: {e:#}"
                        );
                        last_err = Some(e);
                        if remaining <= 1 {
                            AttemptState::Exhausted
                        } else {
                            AttemptState::Recovering {
                                remaining: remaining - 1,
                            }
                        }
                    }
                },
                AttemptState::Recovering { remaining } => {
                    tokio::time::sleep(self.retry_delay).await;
                    if !nav.is_usable().await {
                        debug!(url, "Page handle invalidated, recreating before retry");
                        nav.recreate()
                            .await
                            .context("Failed to recreate page for retry")?;
                    }
                    AttemptState::Attempting { remaining }
                }
                AttemptState::Exhausted => {
                    let cause = last_err
                        .take()
                        .unwrap_or_else(|| anyhow::anyhow!("navigation failed"));
                    return Err(cause.context(format!(
                        "Navigation failed after {} attempts: {url}",
                        self.max_attempts
                    )));
                }
            };
        }
    }
}

/// Real navigator over a chromiumoxide page.
pub struct PageNavigator<'a> {
    session: &'a BrowserSession,
    page: Page,
}

impl<'a> PageNavigator<'a> {
    /// Open a configured page from the session.
    pub async fn open(session: &'a BrowserSession) -> Result<Self> {
        let page = session.open_page().await?;
        Ok(Self { session, page })
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the underlying page; errors are not actionable once the
    /// node is finished.
    pub async fn close(self) {
        if let Err(e) = self.page.close().await {
            debug!("Failed to close page: {e}");
        }
    }
}

#[async_trait]
impl Navigate for PageNavigator<'_> {
    async fn goto(&mut self, url: &str) -> Result<()> {
        let config = self.session.config();

        with_page_timeout(
            async {
                self.page
                    .goto(url)
                    .await
                    .map(|_| ())
                    .map_err(|e| anyhow::anyhow!("{e}"))
            },
            config.navigation_timeout_secs(),
            "Page navigation",
        )
        .await?;

        with_page_timeout(
            async {
                self.page
                    .wait_for_navigation()
                    .await
                    .map(|_| ())
                    .map_err(|e| anyhow::anyhow!("{e}"))
            },
            config.page_load_timeout_secs(),
            "Page load",
        )
        .await?;

        Ok(())
    }

    async fn is_usable(&self) -> bool {
        self.page.url().await.is_ok()
    }

    async fn recreate(&mut self) -> Result<()> {
        self.page = self.session.open_page().await?;
        Ok(())
    }
}
