//! Recent sporting results

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a match from the followed team's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchOutcome::Win => "win",
            MatchOutcome::Draw => "draw",
            MatchOutcome::Loss => "loss",
        };
        f.write_str(label)
    }
}

/// A played match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub date: NaiveDate,
    pub opponent: String,
    pub outcome: MatchOutcome,
    /// Final score, followed team first (e.g. "2-1")
    pub score: String,
}

const RECENT: [(i32, u32, u32, &str, MatchOutcome, &str); 4] = [
    (2025, 1, 12, "FC Barcelona", MatchOutcome::Win, "2-1"),
    (2025, 1, 9, "Real Madrid", MatchOutcome::Draw, "1-1"),
    (2025, 1, 5, "Atlético Madrid", MatchOutcome::Loss, "0-3"),
    (2025, 1, 2, "Valencia CF", MatchOutcome::Win, "3-0"),
];

/// Most recent matches, newest first
pub fn recent_matches() -> Vec<MatchResult> {
    RECENT
        .iter()
        .filter_map(|&(y, m, d, opponent, outcome, score)| {
            Some(MatchResult {
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                opponent: opponent.to_string(),
                outcome,
                score: score.to_string(),
            })
        })
        .collect()
}
