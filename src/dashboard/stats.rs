//! Derived dashboard statistics

use super::matches::{MatchOutcome, MatchResult};
use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

/// Arithmetic mean; None for an empty slice
pub fn average(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Win/draw/loss tally with win rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Wins over total, in percent; None when no matches were played
    pub win_rate: Option<Decimal>,
}

impl MatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let count = |outcome: MatchOutcome| results.iter().filter(|m| m.outcome == outcome).count();
        let wins = count(MatchOutcome::Win);
        let total = results.len();

        let win_rate = (total > 0)
            .then(|| Decimal::from(wins) / Decimal::from(total) * Decimal::ONE_HUNDRED);

        Self {
            total,
            wins,
            draws: count(MatchOutcome::Draw),
            losses: count(MatchOutcome::Loss),
            win_rate,
        }
    }
}

/// Summary of a price series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceStats {
    pub avg: Decimal,
    pub max: Decimal,
    pub min: Decimal,
    /// Population standard deviation
    pub volatility: Decimal,
}

impl PriceStats {
    pub fn from_prices(prices: &[Decimal]) -> Option<Self> {
        let avg = average(prices)?;
        let max = prices.iter().copied().max()?;
        let min = prices.iter().copied().min()?;

        let squares: Vec<Decimal> = prices
            .iter()
            .map(|p| {
                let d = *p - avg;
                d * d
            })
            .collect();
        let variance = average(&squares)?;

        Some(Self {
            avg,
            max,
            min,
            volatility: variance.sqrt().unwrap_or(Decimal::ZERO),
        })
    }
}
