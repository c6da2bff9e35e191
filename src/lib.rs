//! goldboard: personal dashboard backend
//!
//! This library provides the core components for:
//! - A gold spot price feed polled on a fixed interval
//! - Simulated fallback prices when the upstream is unavailable
//! - Publish/subscribe delivery of price snapshots
//! - Dashboard companion data (weekly distances, match results, statistics)
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod feed;
pub mod telemetry;
