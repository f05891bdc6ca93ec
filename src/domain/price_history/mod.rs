//! Price history domain: chart points derived from a raw hourly series.

pub mod window;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use window::{window, window_now, Window};

/// A single data point on a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub time: DateTime<Utc>,
    pub price: f64,
}

impl TimeSeriesPoint {
    /// Unix timestamp in milliseconds, the unit chart widgets expect.
    pub fn time_ms(&self) -> i64 {
        self.time.timestamp_millis()
    }
}
