//! CDP request interception.
//!
//! Crawled pages are read for text and structure, not for rendering
//! fidelity, so image/stylesheet/font fetches are aborted at the
//! Fetch domain to bound page load time.

use anyhow::{Context, Result};
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams, RequestPattern,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::debug;

fn should_block(resource_type: &ResourceType) -> bool {
    matches!(
        resource_type,
        ResourceType::Image | ResourceType::Stylesheet | ResourceType::Font
    )
}

/// Enable Fetch-domain interception on the page and spawn the task
/// that resolves every paused request: blocked resource types fail
/// with `BlockedByClient`, everything else continues untouched.
pub(crate) async fn install_resource_filter(page: &Page) -> Result<()> {
    let patterns = vec![RequestPattern {
        url_pattern: Some("*".to_string()),
        resource_type: None,
        request_stage: None,
    }];

    page.execute(EnableParams {
        patterns: Some(patterns),
        handle_auth_requests: None,
    })
    .await
    .context("Failed to enable request interception")?;

    let mut paused = page
        .event_listener::<EventRequestPaused>()
        .await
        .context("Failed to subscribe to paused requests")?;

    let page = page.clone();
    tokio::spawn(async move {
        while let Some(event) = paused.next().await {
            let request_id = event.request_id.clone();
            let outcome = if should_block(&event.resource_type) {
                page.execute(FailRequestParams::new(
                    request_id,
                    ErrorReason::BlockedByClient,
                ))
                .await
                .map(|_| ())
            } else {
                page.execute(ContinueRequestParams::new(request_id))
                    .await
                    .map(|_| ())
            };

            if let Err(e) = outcome {
                // The page closed underneath us; nothing left to drive.
                debug!("Request interception ended: {e}");
                break;
            }
        }
    });

    Ok(())
}
