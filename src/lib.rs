//! # coinboard
//!
//! Core of a coin-markets dashboard: fetches a page of market records, turns
//! them into display entities, derives sparkline/detail chart windows and
//! keeps the dashboard state consistent while the user keeps changing
//! currency, sort order and pagination.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Shared enums, option tables, formatting, domain models (always available)
//! 2. **HTTP API**: `CoinboardHttp` with per-request retry policies
//! 3. **High-Level Client**: `CoinboardClient` with nested sub-clients
//!
//! Rendering is left to the app. It owns a [`DashboardController`](domain::dashboard::DashboardController),
//! pushes user intents into it, runs the fetch tickets it hands out and feeds
//! the completions back.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinboard::prelude::*;
//!
//! let client = CoinboardClient::builder().build()?;
//! let mut dashboard = DashboardController::default();
//!
//! let ticket = dashboard.start().expect("idle dashboard issues a fetch");
//! let done = ticket.execute(&client.markets()).await;
//! dashboard.complete(done);
//!
//! for (row, entity) in dashboard.entities().iter().enumerate() {
//!     println!("{} {}", entity.name, format_currency(entity.current_price, entity.currency));
//!     let _sparkline = dashboard.sparkline(row);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared enums, option tables and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CoinboardClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared enums + option tables
    pub use crate::shared::options::{
        CurrencyOption, SortOption, CURRENCY_OPTIONS, PAGE_SIZE_OPTIONS, SORT_OPTIONS,
        TOTAL_RESULTS,
    };
    pub use crate::shared::{AssetId, CurrencyCode, Page, PageSize, Resolution, SortOrder};

    // Formatting
    pub use crate::shared::fmt::currency::format as format_currency;
    pub use crate::shared::fmt::num::display as format_number;

    // Domain types: market
    pub use crate::domain::market::{MarketEntity, RawMarketRecord};

    // Domain types: price history
    pub use crate::domain::price_history::{window, window_now, TimeSeriesPoint, Window};

    // Domain types: dashboard
    pub use crate::domain::dashboard::{
        CompletionOutcome, DashboardController, FetchCompletion, FetchFailure, FetchState,
        FetchTicket, SelectionState, SessionParameters, FAILURE_MESSAGE,
    };

    // Errors
    pub use crate::error::{FetchError, FetchErrorKind, HttpError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{CoinboardClient, CoinboardClientBuilder, MarketsClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
