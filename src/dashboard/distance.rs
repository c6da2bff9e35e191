//! Weekly distance data

use super::WeeklyDistance;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

/// Source of the weekly distance series, newest week first
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    async fn fetch_weekly_distances(&self) -> anyhow::Result<Vec<WeeklyDistance>>;
}

/// Fixed four-week series
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticDistanceProvider;

impl StaticDistanceProvider {
    pub fn new() -> Self {
        Self
    }
}

/// (label, km, change %) for the current week and the three before it
const WEEKS: [(&str, i64, i64); 4] = [
    ("This week", 473, 152),
    ("Last week", 411, -85),
    ("2 weeks ago", 449, 123),
    ("3 weeks ago", 400, -51),
];

#[async_trait]
impl DistanceProvider for StaticDistanceProvider {
    async fn fetch_weekly_distances(&self) -> anyhow::Result<Vec<WeeklyDistance>> {
        let now = Utc::now();

        let weeks = WEEKS
            .iter()
            .zip(0i64..)
            .map(|(&(label, km, change), weeks_back)| WeeklyDistance {
                label: label.to_string(),
                distance_km: Decimal::new(km, 1),
                change_percent: Decimal::new(change, 1),
                date: now - Duration::weeks(weeks_back),
            })
            .collect();

        Ok(weeks)
    }
}
