//! High-level client: `CoinboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and accessor methods.

use crate::domain::market::client::Markets;
use crate::error::SdkError;
use crate::http::{CoinboardHttp, RetryPolicy};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::market::client::Markets as MarketsClient;

/// The primary entry point for talking to the markets API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CoinboardClient {
    pub(crate) http: CoinboardHttp,
    /// Retry policy for `/coins/markets`. `None` unless set on the builder.
    pub(crate) markets_retry: RetryPolicy,
}

impl CoinboardClient {
    pub fn builder() -> CoinboardClientBuilder {
        CoinboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn http(&self) -> &CoinboardHttp {
        &self.http
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinboardClientBuilder {
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
    api_key: Option<String>,
}

impl Default for CoinboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry_policy: RetryPolicy::None,
            api_key: None,
        }
    }
}

impl CoinboardClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry policy for market fetches. The dashboard never retries on its
    /// own; setting one here makes a single fetch try harder before failing.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Demo API key, sent on every request.
    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn build(self) -> Result<CoinboardClient, SdkError> {
        Ok(CoinboardClient {
            http: CoinboardHttp::with_options(
                &self.base_url,
                self.timeout,
                self.api_key.as_deref(),
            )?,
            markets_retry: self.retry_policy,
        })
    }
}
