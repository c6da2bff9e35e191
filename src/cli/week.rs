//! Week command implementation

use crate::config::{Config, StartMode};
use crate::dashboard::{week_from_snapshot, WeeklySummary};
use crate::feed::build_feed;
use clap::Args;

#[derive(Args, Debug)]
pub struct WeekArgs {
    /// Skip the upstream source and simulate today's price
    #[arg(long)]
    pub offline: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl WeekArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut config = config.clone();
        config.scheduler.start = StartMode::Lazy;

        let feed = build_feed(&config, self.offline)?;
        let snapshot = feed.tick_now().await?;
        let days = week_from_snapshot(
            &snapshot,
            chrono::Local::now().date_naive(),
            config.simulator.floor,
            &mut rand::thread_rng(),
        );
        let summary = WeeklySummary::from_days(&days);

        if self.json {
            let body = serde_json::json!({ "days": days, "summary": summary });
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(());
        }

        for day in &days {
            println!(
                "{:<10} {}  {:>8.2} EUR/g  {:>+6.2}%{}",
                day.day,
                day.date.format("%d/%m"),
                day.price,
                day.change_percent,
                if day.is_today { "  (today)" } else { "" }
            );
        }
        if let Some(summary) = summary {
            println!(
                "Weekly average {:.2} EUR/g, net {:+.2}",
                summary.average, summary.net_change
            );
        }
        Ok(())
    }
}
