//! Run command implementation

use super::format_snapshot;
use crate::config::Config;
use crate::dashboard::{PriceRange, RangeBounds};
use crate::feed::{build_feed, PriceSnapshot};
use clap::Args;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Never contact the upstream source; simulate every tick
    #[arg(long)]
    pub offline: bool,

    /// Print snapshots as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let feed = build_feed(config, self.offline)?;

        let json = self.json;
        let range = Mutex::new(PriceRange::daily());
        let subscription = feed.subscribe(move |snapshot| {
            let bounds = range
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .observe(snapshot);
            print_with_range(snapshot, bounds, json);
        });

        tracing::info!(
            subscription = %subscription.id(),
            offline = self.offline,
            "Streaming gold price, press Ctrl-C to stop"
        );

        tokio::signal::ctrl_c().await?;

        subscription.unsubscribe();
        feed.shutdown().await;
        Ok(())
    }
}

#[derive(Serialize)]
struct RangedSnapshot<'a> {
    #[serde(flatten)]
    snapshot: &'a PriceSnapshot,
    high_24h: rust_decimal::Decimal,
    low_24h: rust_decimal::Decimal,
}

fn print_with_range(snapshot: &PriceSnapshot, bounds: RangeBounds, json: bool) {
    if !json {
        println!(
            "{}  24h H {:.2} L {:.2}",
            format_snapshot(snapshot),
            bounds.high,
            bounds.low
        );
        return;
    }

    let line = RangedSnapshot {
        snapshot,
        high_24h: bounds.high,
        low_24h: bounds.low,
    };
    match serde_json::to_string(&line) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::error!(error = %e, "Failed to serialize snapshot"),
    }
}

pub(crate) fn print_snapshot(snapshot: &PriceSnapshot, json: bool) {
    if !json {
        println!("{}", format_snapshot(snapshot));
        return;
    }

    match serde_json::to_string(snapshot) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::error!(error = %e, "Failed to serialize snapshot"),
    }
}
