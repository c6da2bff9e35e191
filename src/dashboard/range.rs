//! Rolling high/low over the live feed

use crate::feed::PriceSnapshot;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::VecDeque;

/// High and low of the prices seen within a trailing window
#[derive(Debug, Clone)]
pub struct PriceRange {
    window: Duration,
    samples: VecDeque<(DateTime<Utc>, Decimal)>,
}

/// Current bounds of a [`PriceRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeBounds {
    pub high: Decimal,
    pub low: Decimal,
}

impl PriceRange {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            samples: VecDeque::new(),
        }
    }

    /// Trailing 24 hours
    pub fn daily() -> Self {
        Self::new(Duration::hours(24))
    }

    /// Record a snapshot and drop samples that fell out of the window
    ///
    /// Snapshots older than the newest one seen are ignored.
    pub fn observe(&mut self, snapshot: &PriceSnapshot) -> RangeBounds {
        let newest = self.samples.back().map(|(at, _)| *at);
        if newest.map_or(true, |at| snapshot.timestamp >= at) {
            self.samples.push_back((snapshot.timestamp, snapshot.price));
        }

        if let Some(&(newest, _)) = self.samples.back() {
            let cutoff = newest - self.window;
            while self.samples.front().is_some_and(|(at, _)| *at < cutoff) {
                self.samples.pop_front();
            }
        }

        // Never empty here: the newest sample is always inside the window
        self.bounds().unwrap_or(RangeBounds {
            high: snapshot.price,
            low: snapshot.price,
        })
    }

    pub fn bounds(&self) -> Option<RangeBounds> {
        let prices = self.samples.iter().map(|(_, price)| *price);
        Some(RangeBounds {
            high: prices.clone().max()?,
            low: prices.min()?,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
