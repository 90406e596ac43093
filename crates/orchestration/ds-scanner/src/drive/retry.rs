//! Retry and pagination for folder listings.
//!
//! Provides bounded exponential backoff for transient listing errors
//! and assembles complete child lists across continuation tokens.

use ds_error::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::list::{ChildEntry, ListFolder, ListPage};

/// Configuration for retry behavior.
///
/// Attempt *k* (1-based) that fails transiently sleeps
/// `base_delay_ms * 2^(k-1)` before the next try; with the defaults
/// that is 500ms, 1s, 2s, 4s across the five allowed attempts. No
/// jitter is added, keeping delays deterministic.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts per page request before giving up.
    pub max_attempts: u32,
    /// Initial backoff duration in milliseconds, doubled per attempt.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 500,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total attempt ceiling.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the initial backoff in milliseconds.
    pub fn with_base_delay_ms(mut self, base_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }

    /// Backoff duration after the given failed attempt (1-based).
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(63);
        let ms = self.base_delay_ms.saturating_mul(1u64 << exponent);
        Duration::from_millis(ms)
    }
}

/// Listing wrapper that retries transient failures and walks pages.
///
/// Generic over [`ListFolder`] so the traversal engine can be exercised
/// against in-memory fakes with the same retry semantics.
pub struct RetryingLister<L: ListFolder> {
    inner: L,
    retry: RetryConfig,
}

impl<L: ListFolder> RetryingLister<L> {
    /// Wrap a listing client with the given retry policy.
    pub fn new(inner: L, retry: RetryConfig) -> Self {
        Self { inner, retry }
    }

    /// Return the complete set of direct children of `folder_id`.
    ///
    /// Follows continuation tokens until none remain, concatenating
    /// pages in order. Each page request is retried independently; a
    /// non-transient error or retry exhaustion aborts immediately with
    /// the underlying error. There is no partial-result salvage.
    pub async fn list_children(&self, folder_id: &str) -> Result<Vec<ChildEntry>> {
        let mut children = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let page = self.fetch_page(folder_id, page_token.as_deref()).await?;
            pages += 1;
            children.extend(page.files);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(
            folder_id = %folder_id,
            children = children.len(),
            pages,
            "Listed folder"
        );

        Ok(children)
    }

    /// Fetch one page, retrying transient failures with backoff.
    async fn fetch_page(&self, folder_id: &str, page_token: Option<&str>) -> Result<ListPage> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.inner.fetch_page(folder_id, page_token).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < self.retry.max_attempts => {
                    let backoff = self.retry.backoff_duration(attempt);
                    warn!(
                        folder_id = %folder_id,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Transient listing error, backing off"
                    );
                    sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
