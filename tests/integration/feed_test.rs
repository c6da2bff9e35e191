//! Integration tests for the gold price feed

use goldboard::config::{Config, SchedulerConfig, SimulatorConfig, StartMode};
use goldboard::dashboard::{week_from_snapshot, PriceRange, RangeBounds};
use goldboard::feed::{
    build_feed, PriceSnapshot, SchedulerState, TickScheduler, UnavailableSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn offline_feed() -> TickScheduler {
    TickScheduler::new(
        &SchedulerConfig {
            interval_secs: 30,
            fetch_timeout_secs: 5,
            start: StartMode::Lazy,
        },
        &SimulatorConfig {
            seed_price: dec!(84.59),
            band: dec!(0.75),
            floor: dec!(82.0),
        },
        Arc::new(UnavailableSource),
    )
    .unwrap()
}

#[tokio::test]
async fn test_build_offline_feed_from_default_config() {
    let feed = build_feed(&Config::default(), true).unwrap();
    assert_eq!(feed.latest().price, dec!(85.25));
    assert_eq!(feed.state(), SchedulerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_every_tick_in_order() {
    let feed = offline_feed();
    let seen: Arc<Mutex<Vec<PriceSnapshot>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let _sub = feed.subscribe(move |s| sink.lock().unwrap().push(s.clone()));

    tokio::time::sleep(Duration::from_secs(125)).await;
    feed.shutdown().await;

    let seen = seen.lock().unwrap();
    // seed + ticks at 0s, 30s, 60s, 90s, 120s
    assert_eq!(seen.len() as u64, feed.tick_count() + 1);
    for pair in seen.windows(2) {
        assert_eq!(pair[1].change, pair[1].price - pair[0].price);
        assert!(pair[1].price >= dec!(82.0));
    }
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_mid_run() {
    let feed = offline_feed();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let sub = feed.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let _keepalive = feed.subscribe(|_| {});

    tokio::time::sleep(Duration::from_secs(45)).await;
    sub.unsubscribe();
    let before = calls.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_secs(90)).await;
    assert_eq!(calls.load(Ordering::SeqCst), before);
    assert_eq!(feed.state(), SchedulerState::Running);

    feed.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_new_subscriber_joins_running_feed() {
    let feed = offline_feed();
    let _first = feed.subscribe(|_| {});

    tokio::time::sleep(Duration::from_secs(61)).await;
    let current = feed.latest();

    let received: Arc<Mutex<Option<PriceSnapshot>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&received);
    let _late = feed.subscribe(move |s| {
        slot.lock().unwrap().get_or_insert_with(|| s.clone());
    });

    assert_eq!(received.lock().unwrap().as_ref(), Some(&current));
    feed.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_range_tracks_live_feed() {
    let feed = offline_feed();
    let prices = Arc::new(Mutex::new(Vec::new()));
    let latest: Arc<Mutex<Option<RangeBounds>>> = Arc::new(Mutex::new(None));

    let range = Mutex::new(PriceRange::daily());
    let (price_sink, bounds_sink) = (Arc::clone(&prices), Arc::clone(&latest));
    let _sub = feed.subscribe(move |s| {
        let bounds = range.lock().unwrap().observe(s);
        price_sink.lock().unwrap().push(s.price);
        *bounds_sink.lock().unwrap() = Some(bounds);
    });

    tokio::time::sleep(Duration::from_secs(300)).await;
    feed.shutdown().await;

    let prices = prices.lock().unwrap();
    let bounds = latest.lock().unwrap().unwrap();
    assert_eq!(bounds.high, *prices.iter().max().unwrap());
    assert_eq!(bounds.low, *prices.iter().min().unwrap());
    assert!(bounds.low >= dec!(82.0));
}

#[tokio::test]
async fn test_week_view_from_live_snapshot() {
    let feed = offline_feed();
    let snapshot = feed.tick_now().await.unwrap();

    let today = chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let mut rng = StdRng::seed_from_u64(21);
    let week = week_from_snapshot(&snapshot, today, dec!(82.0), &mut rng);

    let last = week.last().unwrap();
    assert!(last.is_today);
    assert_eq!(last.price, snapshot.price);
    assert!(week.iter().all(|d| d.price >= dec!(82.0)));
}
