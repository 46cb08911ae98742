//! Core configuration types for crawl runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one crawl-and-extract run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of link hops from the seed URL.
    pub(crate) max_depth: u8,

    /// Timeout for `page.goto()` operations.
    ///
    /// Prevents hangs on slow DNS, unresponsive servers, or streaming
    /// content. Applies per navigation attempt, not per run.
    pub(crate) navigation_timeout_secs: u64,

    /// Timeout for `page.wait_for_navigation()` (load-event settle).
    pub(crate) page_load_timeout_secs: u64,

    /// Maximum navigation attempts per URL before the node is given up.
    pub(crate) max_nav_attempts: u32,

    /// Delay between navigation attempts.
    pub(crate) nav_retry_delay_secs: u64,

    /// Run the browser headless.
    pub(crate) headless: bool,

    /// Base directory under which per-run screenshot directories are
    /// created. Defaults to the process temp dir.
    pub(crate) screenshot_base_dir: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            navigation_timeout_secs: 120,
            page_load_timeout_secs: 120,
            max_nav_attempts: 5,
            nav_retry_delay_secs: 10,
            headless: true,
            screenshot_base_dir: std::env::temp_dir().join("foliolens"),
        }
    }
}

impl CrawlConfig {
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn max_nav_attempts(&self) -> u32 {
        self.max_nav_attempts
    }

    #[must_use]
    pub fn nav_retry_delay(&self) -> Duration {
        Duration::from_secs(self.nav_retry_delay_secs)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn screenshot_base_dir(&self) -> &PathBuf {
        &self.screenshot_base_dir
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_max_nav_attempts(mut self, attempts: u32) -> Self {
        self.max_nav_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_nav_retry_delay_secs(mut self, secs: u64) -> Self {
        self.nav_retry_delay_secs = secs;
        self
    }

    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_screenshot_base_dir(mut self, dir: PathBuf) -> Self {
        self.screenshot_base_dir = dir;
        self
    }
}
