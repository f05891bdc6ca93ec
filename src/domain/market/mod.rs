//! Market domain: raw records, display entities, validation, fetching.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::domain::price_history::{self, Window};
use crate::shared::fmt;
use crate::shared::{AssetId, CurrencyCode, Resolution};
use chrono::{DateTime, Utc};
use std::sync::Arc;

// ─── RawMarketRecord ─────────────────────────────────────────────────────────

/// A validated upstream record, before it is tied to a display currency.
///
/// `sparkline` is the 7-day hourly price series exactly as received, oldest
/// sample first.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMarketRecord {
    pub id: AssetId,
    pub name: String,
    pub image: String,
    pub current_price: f64,
    pub circulating_supply: f64,
    pub sparkline: Arc<[f64]>,
}

// ─── MarketEntity ────────────────────────────────────────────────────────────

/// One table row: an asset priced in the currency its page was fetched with.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketEntity {
    pub id: AssetId,
    pub name: String,
    pub image: String,
    /// Currency of the request that produced this entity.
    pub currency: CurrencyCode,
    pub current_price: f64,
    pub circulating_supply: f64,
    /// Raw series, shared with the record it came from. Windowed on demand.
    pub time_series: Arc<[f64]>,
}

impl MarketEntity {
    /// `current_price` in this entity's own currency.
    pub fn formatted_price(&self) -> String {
        fmt::currency::format(self.current_price, self.currency)
    }

    pub fn formatted_supply(&self) -> String {
        fmt::num::display(self.circulating_supply)
    }

    /// Compact table chart: one point per day.
    pub fn sparkline(&self, now: DateTime<Utc>) -> Window<'_> {
        price_history::window(&self.time_series, Resolution::Daily, now)
    }

    /// Enlarged chart: every hourly sample.
    pub fn detail(&self, now: DateTime<Utc>) -> Window<'_> {
        price_history::window(&self.time_series, Resolution::Hourly, now)
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingId,
    MissingName,
    MissingImage,
    MissingCurrentPrice,
    MissingCirculatingSupply,
    MissingSparkline,
    NonFinite(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                writeln!(f, "Market record validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingName => write!(f, "Missing name"),
            ValidationError::MissingImage => write!(f, "Missing image"),
            ValidationError::MissingCurrentPrice => write!(f, "Missing current price"),
            ValidationError::MissingCirculatingSupply => write!(f, "Missing circulating supply"),
            ValidationError::MissingSparkline => write!(f, "Missing 7d sparkline"),
            ValidationError::NonFinite(field) => write!(f, "Non-finite {}", field),
        }
    }
}

impl std::error::Error for ValidationError {}
