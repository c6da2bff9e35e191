//! Dashboard companion data
//!
//! Everything the dashboard shows next to the gold feed: the seven-day and
//! 24h views built from live snapshots, weekly running distances, recent
//! match results, and the statistics derived from them.

pub mod daily;
mod distance;
pub mod history;
mod matches;
mod range;
pub mod stats;

pub use daily::{week_from_snapshot, DailyGoldPrice, WeeklySummary};

pub use distance::{DistanceProvider, StaticDistanceProvider};
pub use history::{HistoricalPoint, TimePeriod};
pub use matches::{recent_matches, MatchOutcome, MatchResult};
pub use range::{PriceRange, RangeBounds};
pub use stats::{average, MatchSummary, PriceStats};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Distance covered in one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDistance {
    /// Human label, e.g. "Last week"
    pub label: String,
    pub distance_km: Decimal,
    /// Change against the week before, in percent
    pub change_percent: Decimal,
    pub date: DateTime<Utc>,
}
