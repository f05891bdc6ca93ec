//! Fixed-resolution windows over a raw price series.
//!
//! The raw series is the upstream 7-day sparkline: hourly samples, oldest
//! first. A window walks it from the newest sample backwards, keeping every
//! `step`-th sample, and labels the n-th kept sample `anchor - n hours`,
//! where `anchor` is the top of the current UTC hour. Labels are relative to
//! the moment the window is built, not to anything carried in the series.

use super::TimeSeriesPoint;
use crate::shared::Resolution;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use std::iter::FusedIterator;

/// Lazy window over a borrowed raw series. Yields newest point first.
///
/// A clone continues from the same position. Call [`window`] again with the
/// same `now` to start over.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    raw: &'a [f64],
    step: usize,
    anchor: DateTime<Utc>,
    next: Option<usize>,
    emitted: i64,
}

/// Window `raw` at `resolution`, anchored at `now` truncated to the hour.
///
/// Deterministic for a given `(raw, resolution, now)`. An empty series gives
/// an empty window.
pub fn window(raw: &[f64], resolution: Resolution, now: DateTime<Utc>) -> Window<'_> {
    let anchor = now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now);
    Window {
        raw,
        step: resolution.step(),
        anchor,
        next: raw.len().checked_sub(1),
        emitted: 0,
    }
}

/// [`window`] anchored at the current wall clock.
pub fn window_now(raw: &[f64], resolution: Resolution) -> Window<'_> {
    window(raw, resolution, Utc::now())
}

impl<'a> Window<'a> {
    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Remaining points, oldest first. This is the order charts plot in.
    pub fn chronological(self) -> Vec<TimeSeriesPoint> {
        let mut points: Vec<TimeSeriesPoint> = self.collect();
        points.reverse();
        points
    }
}

impl<'a> Iterator for Window<'a> {
    type Item = TimeSeriesPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let point = TimeSeriesPoint {
            time: self.anchor - TimeDelta::hours(self.emitted),
            price: self.raw[index],
        };
        self.emitted += 1;
        self.next = index.checked_sub(self.step);
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Window<'_> {
    fn len(&self) -> usize {
        self.next.map_or(0, |i| i / self.step + 1)
    }
}

impl FusedIterator for Window<'_> {}
