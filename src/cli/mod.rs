//! CLI interface for goldboard
//!
//! Provides subcommands for:
//! - `run`: Start the gold price feed and print every snapshot
//! - `tick`: Fetch one price (with simulated fallback) and exit
//! - `week`: Print the seven-day gold view around the current price
//! - `history`: Print a synthetic price history with statistics
//! - `distances`: Print the weekly distance series
//! - `matches`: Print recent results and win rate
//! - `config`: Show configuration

mod dashboard;
mod history;
mod run;
mod tick;
mod week;

pub use dashboard::{DistancesArgs, MatchesArgs};
pub use history::HistoryArgs;
pub use run::RunArgs;
pub use tick::TickArgs;
pub use week::WeekArgs;

use crate::config::Config;
use crate::feed::PriceSnapshot;
use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "goldboard")]
#[command(about = "Personal dashboard backend: gold spot price feed with simulated fallback")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the price feed and print snapshots until interrupted
    Run(RunArgs),
    /// Fetch a single price and exit
    Tick(TickArgs),
    /// Print the last seven days of gold prices
    Week(WeekArgs),
    /// Print synthetic price history
    History(HistoryArgs),
    /// Print weekly distances
    Distances(DistancesArgs),
    /// Print recent match results
    Matches(MatchesArgs),
    /// Show configuration
    Config,
}

/// Load the configuration file; only a missing file falls back to defaults
pub fn load_config(path: &str) -> anyhow::Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(e) if e.is_not_found() => {
            eprintln!("Warning: config file {} not found, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => Err(e).with_context(|| format!("Invalid configuration in {}", path)),
    }
}

/// One-line rendering of a snapshot
pub(crate) fn format_snapshot(snapshot: &PriceSnapshot) -> String {
    format!(
        "{}  {:>9.2} EUR/g  {:>+8.2} ({:>+6.2}%)",
        snapshot.timestamp.format("%Y-%m-%d %H:%M:%S"),
        snapshot.price,
        snapshot.change,
        snapshot.change_percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_parse_run_offline() {
        let cli = Cli::try_parse_from(["goldboard", "run", "--offline"]).unwrap();
        match cli.command {
            Commands::Run(args) => assert!(args.offline),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::try_parse_from(["goldboard", "matches", "--config", "/etc/goldboard.toml"]).unwrap();
        assert_eq!(cli.config, "/etc/goldboard.toml");
    }

    #[test]
    fn test_parse_week_offline() {
        let cli = Cli::try_parse_from(["goldboard", "week", "--offline", "--json"]).unwrap();
        match cli.command {
            Commands::Week(args) => assert!(args.offline && args.json),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_history_period() {
        let cli = Cli::try_parse_from(["goldboard", "history", "--period", "3months"]).unwrap();
        match cli.command {
            Commands::History(args) => {
                assert_eq!(args.period, crate::dashboard::TimePeriod::ThreeMonths)
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_period() {
        assert!(Cli::try_parse_from(["goldboard", "history", "--period", "year"]).is_err());
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let config = load_config("/nonexistent/goldboard.toml").unwrap();
        assert_eq!(config.simulator.floor, dec!(80));
    }

    #[test]
    fn test_load_config_invalid_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulator]\nfloor = 0").unwrap();

        let err = load_config(file.path().to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("floor must be positive"));
    }

    #[test]
    fn test_format_snapshot() {
        let snapshot = PriceSnapshot::following(dec!(85), dec!(85.5));
        let line = format_snapshot(&snapshot);
        assert!(line.contains("85.50 EUR/g"));
        assert!(line.contains("+0.50"));
    }
}
