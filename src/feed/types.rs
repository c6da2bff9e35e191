//! Price feed types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// One immutable gold price observation (EUR per gram)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Spot price
    pub price: Decimal,
    /// Absolute change against the previous observation
    pub change: Decimal,
    /// Change in percent
    pub change_percent: Decimal,
    /// When the snapshot was produced
    pub timestamp: DateTime<Utc>,
}

impl PriceSnapshot {
    /// Snapshot with no movement, used to seed the feed
    pub fn seed(price: Decimal) -> Self {
        Self {
            price,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            timestamp: Utc::now(),
        }
    }

    /// Snapshot at `price`, with change measured against `previous`
    pub fn following(previous: Decimal, price: Decimal) -> Self {
        let change = price - previous;
        Self {
            price,
            change,
            change_percent: percent_of(change, previous),
            timestamp: Utc::now(),
        }
    }
}

/// `part / whole * 100`, zero when `whole` is zero
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Recoverable failure to obtain an upstream observation
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),
    /// Body did not match `{ price, change? }`
    #[error("Malformed payload: {0}")]
    Malformed(String),
    /// Fetch did not complete in time
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),
    /// Upstream price would violate the configured floor
    #[error("Upstream price {price} is below the floor {floor}")]
    BelowFloor { price: Decimal, floor: Decimal },
    /// Source is switched off
    #[error("Price source unavailable")]
    Unavailable,
}

impl FetchError {
    /// Short label used as a metrics dimension
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Malformed(_) => "malformed",
            FetchError::Timeout(_) => "timeout",
            FetchError::BelowFloor { .. } => "below_floor",
            FetchError::Unavailable => "unavailable",
        }
    }
}

/// Rejected feed state update
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Price {price} is below the floor {floor}")]
    BelowFloor { price: Decimal, floor: Decimal },
}

/// Unexpected failure inside a tick; the tick is skipped
#[derive(Debug, Error)]
pub enum TickError {
    #[error(transparent)]
    State(#[from] StateError),
}

/// Failure to construct the feed
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("No tokio runtime available to drive the tick loop")]
    NoRuntime,
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Where a tick's snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOrigin {
    Upstream,
    Simulated,
}

impl TickOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickOrigin::Upstream => "upstream",
            TickOrigin::Simulated => "simulated",
        }
    }
}
