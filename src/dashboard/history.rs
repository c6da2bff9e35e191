//! Synthetic gold price history for the dashboard charts

use crate::feed::percent_of;
use chrono::{DateTime, Duration, DurationRound, Utc};
use clap::ValueEnum;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Window of history to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimePeriod {
    /// 24 hourly points
    Today,
    /// 7 daily points
    Week,
    /// 90 daily points
    #[value(name = "3months")]
    ThreeMonths,
}

impl TimePeriod {
    pub fn points(&self) -> usize {
        match self {
            TimePeriod::Today => 24,
            TimePeriod::Week => 7,
            TimePeriod::ThreeMonths => 90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Today => "Today",
            TimePeriod::Week => "Last week",
            TimePeriod::ThreeMonths => "Last 3 months",
        }
    }
}

/// One point of generated history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalPoint {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: u64,
}

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(4))
        .unwrap_or(Decimal::ZERO)
}

/// Generate `period` worth of history oscillating around `base_price`
///
/// Hourly points vary by up to ±1% of the base. Daily points follow a slow
/// sine trend (±0.5%) plus up to ±1.5% noise. Price, high and low never go
/// below `floor`; each change is measured against the previous point.
pub fn generate<R: Rng + ?Sized>(
    period: TimePeriod,
    base_price: Decimal,
    floor: Decimal,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    let now = Utc::now();
    let count = period.points();
    let mut points = Vec::with_capacity(count);
    let mut previous = base_price;

    for i in 0..count {
        let (timestamp, variation_pct, spread, volume) = match period {
            TimePeriod::Today => {
                let midnight = now.duration_trunc(Duration::days(1)).unwrap_or(now);
                (
                    midnight + Duration::hours(i as i64),
                    rng.gen_range(-1.0..=1.0),
                    (decimal(0.5), decimal(0.5)),
                    rng.gen_range(5_000..15_000),
                )
            }
            TimePeriod::Week | TimePeriod::ThreeMonths => {
                let days_back = (count - 1 - i) as i64;
                let trend = (days_back as f64 / 10.0).sin() * 0.5;
                (
                    now - Duration::days(days_back),
                    trend + rng.gen_range(-1.5..=1.5),
                    (decimal(rng.gen_range(0.0..2.0)), decimal(rng.gen_range(0.0..2.0))),
                    rng.gen_range(20_000..70_000),
                )
            }
        };

        let raw = base_price + base_price * decimal(variation_pct) / Decimal::ONE_HUNDRED;
        let price = raw.max(floor);
        let change = price - previous;

        points.push(HistoricalPoint {
            timestamp,
            price,
            change,
            change_percent: percent_of(change, previous),
            high: (price + spread.0).max(floor),
            low: (price - spread.1).max(floor),
            volume,
        });
        previous = price;
    }

    points
}
