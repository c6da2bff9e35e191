//! Integration test harness

mod dashboard_test;
mod e2e_test;
mod feed_test;
