//! Tick command implementation

use super::run::print_snapshot;
use crate::config::{Config, StartMode};
use crate::feed::build_feed;
use clap::Args;

#[derive(Args, Debug)]
pub struct TickArgs {
    /// Skip the upstream source and simulate the price
    #[arg(long)]
    pub offline: bool,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

impl TickArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut config = config.clone();
        config.scheduler.start = StartMode::Lazy;

        let feed = build_feed(&config, self.offline)?;
        let snapshot = feed.tick_now().await?;
        print_snapshot(&snapshot, self.json);
        Ok(())
    }
}
