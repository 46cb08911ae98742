//! Headless browser session management.
//!
//! One `BrowserSession` owns one Chromium process and the task that
//! drives its CDP connection. It is the only component that opens or
//! closes browser and page handles.

pub mod resource_filter;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};

use crate::config::CrawlConfig;
use resource_filter::install_resource_filter;

/// Find a Chrome/Chromium executable on the system.
///
/// The `CHROMIUM_PATH` environment variable overrides all other
/// methods; otherwise common install locations are probed, then
/// `which` on Unix. A missing browser is a hard error: the pipeline
/// cannot run without one.
pub fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
    }

    let paths: Vec<&str> = if cfg!(target_os = "windows") {
        vec![
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        vec![
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        vec![
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    for path_str in paths {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in &["chromium", "chromium-browser", "google-chrome", "chrome"] {
            let output = Command::new("which").arg(cmd).output();

            if let Ok(output) = output {
                if output.status.success() {
                    let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if !path_str.is_empty() {
                        let path = PathBuf::from(path_str);
                        info!("Found browser using 'which': {}", path.display());
                        return Ok(path);
                    }
                }
            }
        }
    }

    Err(anyhow::anyhow!(
        "Chrome/Chromium executable not found; set CHROMIUM_PATH to override"
    ))
}

/// One launched browser process plus its CDP handler task.
#[derive(Debug)]
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    config: CrawlConfig,
}

impl BrowserSession {
    /// Launch a browser configured for crawling.
    ///
    /// Launch failure is fatal to the whole pipeline run; there is no
    /// retry at this level.
    pub async fn launch(config: &CrawlConfig) -> Result<Self> {
        let chrome_path = find_browser_executable()?;

        let mut config_builder = BrowserConfigBuilder::default()
            .request_timeout(Duration::from_secs(config.navigation_timeout_secs()))
            .window_size(1920, 1080)
            .chrome_executable(chrome_path);

        if config.headless() {
            config_builder = config_builder.headless_mode(HeadlessMode::default());
        } else {
            config_builder = config_builder.with_head();
        }

        config_builder = config_builder
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-accelerated-2d-canvas")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--mute-audio")
            .arg("--hide-scrollbars");

        let browser_config = config_builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

        info!("Launching browser");
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")?;

        let handler_task = task::spawn(async move {
            while let Some(h) = handler.next().await {
                if let Err(e) = h {
                    let error_msg = e.to_string();

                    // Chrome emits CDP events chromiumoxide doesn't model;
                    // those deserialization failures are not actionable.
                    let is_benign_serialization_error = error_msg
                        .contains("data did not match any variant of untagged enum Message")
                        || error_msg.contains("Failed to deserialize WS response");

                    if is_benign_serialization_error {
                        trace!("Suppressed benign CDP serialization error: {error_msg}");
                    } else {
                        error!("Browser handler error: {e:?}");
                    }
                }
            }
            debug!("Browser handler task completed");
        });

        Ok(Self {
            browser,
            handler_task,
            config: config.clone(),
        })
    }

    /// Open a new page preconfigured for crawling: the resource filter
    /// is installed so image/stylesheet/font requests never load.
    pub async fn open_page(&self) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Failed to open page")?;

        install_resource_filter(&page)
            .await
            .context("Failed to install request filter")?;

        Ok(page)
    }

    #[must_use]
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Close the browser. Must be called exactly once per launched
    /// session; the handler task is aborted only after the process has
    /// exited so the close handshake can complete.
    pub async fn close(mut self) -> Result<()> {
        debug!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
        }

        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }

        self.handler_task.abort();
        if let Err(e) = self.handler_task.await {
            if !e.is_cancelled() {
                warn!("Handler task failed during abort: {e}");
            }
        }

        debug!("Browser closed");
        Ok(())
    }
}
