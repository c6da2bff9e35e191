//! Integration tests for dashboard data

use goldboard::dashboard::{
    average, history, recent_matches, DistanceProvider, MatchSummary, PriceStats,
    StaticDistanceProvider, TimePeriod,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_weekly_distance_average() {
    let weeks = tokio_test::block_on(StaticDistanceProvider::new().fetch_weekly_distances()).unwrap();
    let distances: Vec<Decimal> = weeks.iter().map(|w| w.distance_km).collect();
    assert_eq!(average(&distances), Some(dec!(43.325)));
}

#[test]
fn test_recent_matches_win_rate() {
    let summary = MatchSummary::from_results(&recent_matches());
    assert_eq!(summary.wins, 2);
    assert_eq!(summary.win_rate, Some(dec!(50)));
}

#[test]
fn test_history_stats_bracket_prices() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = history::generate(TimePeriod::ThreeMonths, dec!(85.42), dec!(78), &mut rng);
    let prices: Vec<Decimal> = points.iter().map(|p| p.price).collect();

    let stats = PriceStats::from_prices(&prices).unwrap();
    assert!(stats.min <= stats.avg && stats.avg <= stats.max);
    assert!(stats.volatility > Decimal::ZERO);
    assert!(stats.min >= dec!(78));
}
