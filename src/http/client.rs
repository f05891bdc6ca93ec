//! Low-level HTTP client: `CoinboardHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the domain sub-clients).

use crate::domain::market::wire::{CoinMarketResponse, MarketsQuery};
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::network::API_KEY_HEADER;

use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the CoinGecko-compatible REST API.
#[derive(Clone)]
pub struct CoinboardHttp {
    base_url: String,
    client: Client,
}

impl CoinboardHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_options(base_url, Duration::from_secs(30), None)
    }

    /// Build with a request timeout (ignored on WASM) and an optional demo API key.
    pub fn with_options(
        base_url: &str,
        timeout: Duration,
        api_key: Option<&str>,
    ) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| HttpError::InvalidRequest(format!("API key header: {}", e)))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// `GET /coins/markets`: one page of market records.
    pub async fn get_coin_markets(
        &self,
        query: &MarketsQuery,
        retry: &RetryPolicy,
    ) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let qs = serde_urlencoded::to_string(query)
            .map_err(|e| HttpError::InvalidRequest(e.to_string()))?;
        let url = format!("{}/coins/markets?{}", self.base_url, qs);
        self.get(&url, retry).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str, retry: &RetryPolicy) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_get(url).await;
        };

        let mut attempt = 0;
        loop {
            let err = match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            if !config.should_retry(&err) {
                return Err(err);
            }
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: Box::new(err),
                });
            }

            let mut delay = config.delay_for_attempt(attempt);
            if let HttpError::RateLimited {
                retry_after_ms: Some(ms),
            } = &err
            {
                delay = delay
                    .max(Duration::from_millis(*ms))
                    .min(config.max_delay);
            }
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Retrying request to {}",
                url
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!(url, "GET");
        let resp = self.client.get(url).send().await.map_err(transport_error)?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await.map_err(transport_error)?;
            return serde_json::from_str::<T>(&body).map_err(|e| HttpError::Decode(e.to_string()));
        }

        let retry_after_ms = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest {
                status: status_code,
                body: body_text,
            }),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

fn transport_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(err)
    }
}

impl std::fmt::Debug for CoinboardHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinboardHttp")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
