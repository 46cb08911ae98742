//! Per-run screenshot storage.
//!
//! Each crawl run owns a freshly created directory under the
//! configured base path; captures are named by generated UUIDs rather
//! than by URL, so path-unsafe characters and collisions cannot occur.
//! All files for a run are removed together at cleanup.

use anyhow::{Context, Result};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::Page;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use super::extractors::wait_for_page_ready;

/// A persisted screenshot belonging to one crawl run.
#[derive(Debug, Clone)]
pub struct ScreenshotRecord {
    pub url: String,
    pub file_path: PathBuf,
}

/// Owns the run-scoped screenshot directory and its contents.
#[derive(Debug)]
pub struct ScreenshotStore {
    root: PathBuf,
    records: Vec<ScreenshotRecord>,
}

impl ScreenshotStore {
    /// Create the run directory `<base>/<uuid>`.
    ///
    /// Failure here is fatal to the run: without a writable directory
    /// there is no screenshot storage at all.
    pub async fn create(base_dir: &Path) -> Result<Self> {
        let root = base_dir.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create screenshot directory {}", root.display()))?;
        debug!(dir = %root.display(), "screenshot directory created");
        Ok(Self {
            root,
            records: Vec::new(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn records(&self) -> &[ScreenshotRecord] {
        &self.records
    }

    /// File names of the captures so far, for use as external
    /// references in analysis prompts.
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.file_path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    /// Capture a full-page PNG of the loaded page.
    pub async fn capture(&mut self, page: &Page, url: &str) -> Result<PathBuf> {
        wait_for_page_ready(page, 10).await?;

        let params = CaptureScreenshotParams {
            format: Some(CaptureScreenshotFormat::Png),
            capture_beyond_viewport: Some(true),
            ..Default::default()
        };

        let data = page
            .screenshot(params)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to capture screenshot: {e}"))?;

        let file_path = self.root.join(format!("{}.png", Uuid::new_v4()));
        tokio::fs::write(&file_path, data)
            .await
            .with_context(|| format!("Failed to write screenshot {}", file_path.display()))?;

        debug!(url, path = %file_path.display(), "screenshot captured");
        self.records.push(ScreenshotRecord {
            url: url.to_string(),
            file_path: file_path.clone(),
        });
        Ok(file_path)
    }

    /// Record a screenshot file written by other means.
    ///
    /// Used by scraper implementations that do not drive a browser.
    pub fn register(&mut self, url: &str, file_path: PathBuf) {
        self.records.push(ScreenshotRecord {
            url: url.to_string(),
            file_path,
        });
    }

    /// Delete every file in the run directory and the directory
    /// itself. Safe to call when captures partially failed.
    pub async fn cleanup(&mut self) -> Result<()> {
        self.records.clear();
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                debug!(dir = %self.root.display(), "screenshot directory removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!(dir = %self.root.display(), "Failed to remove screenshot directory: {e}");
                Err(e.into())
            }
        }
    }
}
