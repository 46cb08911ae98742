//! DOM extraction functions.

use anyhow::{Context, Result};
use chromiumoxide::Page;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::js_scripts::{IMAGES_SCRIPT, LINKS_SCRIPT, OUTLINE_SCRIPT, TEXT_SCRIPT};
use super::schema::{PageOutline, PageSnapshot};

/// Wait until the document reports itself complete.
///
/// `wait_for_navigation` only waits for the HTTP response; JS-rendered
/// pages need the ready-state poll or screenshots and text extraction
/// run against a half-built DOM.
pub async fn wait_for_page_ready(page: &Page, max_wait_secs: u64) -> Result<()> {
    let start = Instant::now();
    let max_wait = Duration::from_secs(max_wait_secs);
    let poll_interval = Duration::from_millis(100);

    loop {
        if start.elapsed() >= max_wait {
            warn!("Timeout waiting for page load after {max_wait_secs}s, proceeding anyway");
            break;
        }

        match page.evaluate("document.readyState").await {
            Ok(result) => {
                let state = result
                    .into_value::<String>()
                    .unwrap_or_default();
                if state == "complete" {
                    debug!(
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "page ready"
                    );
                    break;
                }
            }
            Err(e) => {
                debug!("Failed to check readyState: {e}, retrying");
            }
        }

        tokio::time::sleep(poll_interval).await;
    }

    // Settle buffer for late-running layout work.
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(())
}

/// Extract the full snapshot of a loaded page.
///
/// The three extractions (text, images, outline) are isolated: a
/// failure in one degrades that part to its empty value and the
/// others still run.
pub async fn extract_snapshot(page: &Page, url: &str) -> PageSnapshot {
    let text_content = match extract_text(page).await {
        Ok(text) => text,
        Err(e) => {
            warn!(url, "Text extraction failed: {e}");
            String::new()
        }
    };

    let images = match extract_images(page).await {
        Ok(images) => images,
        Err(e) => {
            warn!(url, "Image extraction failed: {e}");
            Vec::new()
        }
    };

    let outline = match extract_outline(page).await {
        Ok(outline) => outline,
        Err(e) => {
            warn!(url, "Outline extraction failed: {e}");
            PageOutline::default()
        }
    };

    PageSnapshot {
        url: url.to_string(),
        text_content,
        images,
        outline,
    }
}

async fn extract_text(page: &Page) -> Result<String> {
    let js_result = page
        .evaluate(TEXT_SCRIPT)
        .await
        .context("Failed to execute text extraction script")?;

    js_result
        .into_value()
        .context("Failed to parse text from JS result")
}

async fn extract_images(page: &Page) -> Result<Vec<String>> {
    let js_result = page
        .evaluate(IMAGES_SCRIPT)
        .await
        .context("Failed to execute image extraction script")?;

    js_result
        .into_value()
        .context("Failed to parse image URLs from JS result")
}

async fn extract_outline(page: &Page) -> Result<PageOutline> {
    let js_result = page
        .evaluate(OUTLINE_SCRIPT)
        .await
        .context("Failed to execute outline extraction script")?;

    let outline: PageOutline = match js_result.into_value::<serde_json::Value>() {
        Ok(value) => {
            serde_json::from_value(value).context("Failed to parse outline from JS result")?
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to get outline value: {e}")),
    };

    Ok(outline)
}

/// Extract hyperlink targets from the page.
pub async fn extract_links(page: &Page) -> Result<Vec<String>> {
    let js_result = page
        .evaluate(LINKS_SCRIPT)
        .await
        .context("Failed to execute links extraction script")?;

    js_result
        .into_value()
        .context("Failed to parse links from JS result")
}
