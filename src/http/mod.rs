//! HTTP client layer: `CoinboardHttp` with per-request retry policies.

pub mod client;
pub mod retry;

pub use client::CoinboardHttp;
pub use retry::{RetryConfig, RetryPolicy};
