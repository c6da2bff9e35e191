//! Prometheus metrics

use crate::feed::TickOrigin;
use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::time::Duration;

const TICKS_TOTAL: &str = "goldboard_ticks_total";
const FETCH_FAILURES_TOTAL: &str = "goldboard_fetch_failures_total";
const FETCH_LATENCY_MS: &str = "goldboard_fetch_latency_ms";
const PRICE: &str = "goldboard_price_eur_per_gram";
const SUBSCRIBERS: &str = "goldboard_subscribers";

/// Install the Prometheus exporter with an HTTP listener on `port`
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Count a published tick
pub fn record_tick(origin: TickOrigin) {
    ::metrics::counter!(TICKS_TOTAL, "origin" => origin.as_str()).increment(1);
}

/// Count a failed upstream fetch
pub fn record_fetch_failure(reason: &'static str) {
    ::metrics::counter!(FETCH_FAILURES_TOTAL, "reason" => reason).increment(1);
}

/// Record how long an upstream fetch took, timeouts included
pub fn record_fetch_latency(duration: Duration) {
    ::metrics::histogram!(FETCH_LATENCY_MS).record(duration.as_secs_f64() * 1000.0);
}

pub fn set_price(price: Decimal) {
    ::metrics::gauge!(PRICE).set(price.to_f64().unwrap_or_default());
}

pub fn set_subscribers(count: usize) {
    ::metrics::gauge!(SUBSCRIBERS).set(count as f64);
}
