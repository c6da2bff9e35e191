//! Distance and match commands

use crate::dashboard::{
    average, recent_matches, DistanceProvider, MatchSummary, StaticDistanceProvider,
};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct DistancesArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl DistancesArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let weeks = StaticDistanceProvider::new().fetch_weekly_distances().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&weeks)?);
            return Ok(());
        }

        for week in &weeks {
            println!(
                "{:<12} {:>6.1} km  {:>+6.1}%  {}",
                week.label,
                week.distance_km,
                week.change_percent,
                week.date.format("%Y-%m-%d")
            );
        }

        let distances: Vec<Decimal> = weeks.iter().map(|w| w.distance_km).collect();
        if let Some(avg) = average(&distances) {
            println!("Weekly average: {:.1} km", avg);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct MatchesArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl MatchesArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let matches = recent_matches();
        let summary = MatchSummary::from_results(&matches);

        if self.json {
            let body = serde_json::json!({ "matches": matches, "summary": summary });
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(());
        }

        for m in &matches {
            println!("{}  {:<18} {:<5} {}", m.date, m.opponent, m.outcome.to_string(), m.score);
        }

        match summary.win_rate {
            Some(rate) => println!(
                "{} wins out of {} matches ({:.0}% win rate)",
                summary.wins, summary.total, rate
            ),
            None => println!("No matches played"),
        }
        Ok(())
    }
}
