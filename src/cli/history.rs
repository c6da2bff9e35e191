//! History command implementation

use crate::config::Config;
use crate::dashboard::{history, PriceStats, TimePeriod};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Window to generate
    #[arg(long, value_enum, default_value = "week")]
    pub period: TimePeriod,

    /// Price the history oscillates around (defaults to the seed price)
    #[arg(long)]
    pub base: Option<Decimal>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl HistoryArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let base = self.base.unwrap_or(config.simulator.seed_price);
        let points = history::generate(
            self.period,
            base,
            config.simulator.floor,
            &mut rand::thread_rng(),
        );
        let prices: Vec<Decimal> = points.iter().map(|p| p.price).collect();
        let stats = PriceStats::from_prices(&prices);

        if self.json {
            let body = serde_json::json!({ "period": self.period.label(), "points": points, "stats": stats });
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(());
        }

        let time_format = match self.period {
            TimePeriod::Today => "%H:%M",
            TimePeriod::Week | TimePeriod::ThreeMonths => "%a %d/%m",
        };

        println!("{} ({} points)", self.period.label(), points.len());
        for point in &points {
            println!(
                "  {:<10} {:>8.2} {:>+7.2}%  high {:>8.2}  low {:>8.2}  vol {:>6}",
                point.timestamp.format(time_format).to_string(),
                point.price,
                point.change_percent,
                point.high,
                point.low,
                point.volume
            );
        }

        if let Some(stats) = stats {
            println!(
                "avg {:.2}  max {:.2}  min {:.2}  volatility {:.2}",
                stats.avg, stats.max, stats.min, stats.volatility
            );
        }
        Ok(())
    }
}
