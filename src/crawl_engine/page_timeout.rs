//! Timeout wrapper for page operations.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Apply an explicit timeout to an async page operation.
///
/// Prevents indefinite hangs on navigation and load waits; the error
/// message distinguishes a timeout from an operation failure.
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout_secs: u64,
    operation_name: &str,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {timeout_secs} seconds"
        )),
    }
}
