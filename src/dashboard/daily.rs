//! Seven-day gold price view anchored on the live snapshot

use super::stats::average;
use crate::feed::PriceSnapshot;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

/// Largest past-day variation, in ten-thousandths of a percent (±1.5%)
const DAILY_SPREAD_BP: i64 = 15_000;

/// One day of the weekly gold view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyGoldPrice {
    pub date: NaiveDate,
    pub day: &'static str,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub is_today: bool,
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Build the last seven days ending on `today`, oldest first
///
/// Today carries the live price and its change percent. Earlier days sit
/// within ±1.5% of the live price, never below `floor`. Each day's `change`
/// is its price times its change percent.
pub fn week_from_snapshot<R: Rng + ?Sized>(
    snapshot: &PriceSnapshot,
    today: NaiveDate,
    floor: Decimal,
    rng: &mut R,
) -> Vec<DailyGoldPrice> {
    (0..7i64)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let is_today = days_back == 0;

            let (price, change_percent) = if is_today {
                (snapshot.price, snapshot.change_percent)
            } else {
                let variation = Decimal::new(rng.gen_range(-DAILY_SPREAD_BP..=DAILY_SPREAD_BP), 4);
                let price = snapshot.price + snapshot.price * variation / Decimal::ONE_HUNDRED;
                (price.max(floor), variation)
            };

            DailyGoldPrice {
                date,
                day: day_name(date.weekday()),
                price,
                change: price * change_percent / Decimal::ONE_HUNDRED,
                change_percent,
                is_today,
            }
        })
        .collect()
}

/// Average price and first-to-last movement over a weekly view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub average: Decimal,
    pub net_change: Decimal,
}

impl WeeklySummary {
    pub fn from_days(days: &[DailyGoldPrice]) -> Option<Self> {
        let prices: Vec<Decimal> = days.iter().map(|d| d.price).collect();
        let (first, last) = (prices.first()?, prices.last()?);
        Some(Self {
            average: average(&prices)?,
            net_change: *last - *first,
        })
    }
}
