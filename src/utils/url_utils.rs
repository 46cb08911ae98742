//! URL validation and comparison utilities.
//!
//! These helpers decide which discovered hyperlinks are eligible for
//! crawling and put URLs into a canonical form for deduplication.

use anyhow::Result;
use url::Url;

/// Check if a URL is crawlable.
///
/// Rejects empty strings, data/javascript/mailto schemes, and anything
/// that does not parse as an absolute http(s) URL.
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
        }
        Err(_) => false,
    }
}

/// Normalize a URL string by stripping fragment anchors.
///
/// Fragment identifiers (#foo) are client-side navigation markers that
/// don't represent different HTTP resources; removing them lets the
/// visited set deduplicate properly.
pub fn normalize_url(url: &str) -> Result<String> {
    let mut parsed = Url::parse(url)
        .map_err(|e| anyhow::anyhow!("Failed to parse URL for normalization: {e}"))?;
    parsed.set_fragment(None);
    Ok(parsed.to_string())
}

/// Check whether `candidate` shares the seed's origin.
///
/// The hostname must match exactly: subdomains of the seed host count
/// as a different origin. The scheme is not compared, so an http link
/// on an https site stays crawlable.
#[must_use]
pub fn same_origin(seed: &Url, candidate: &str) -> bool {
    let parsed = match Url::parse(candidate) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    match (seed.host_str(), parsed.host_str()) {
        (Some(seed_host), Some(candidate_host)) => seed_host == candidate_host,
        _ => false,
    }
}
