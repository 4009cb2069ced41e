/// Stat record types
///
/// A `StatRecord` is the validated output of the stat line parser: the four
/// trailing scoreboard columns of a single player row.
use serde::{Deserialize, Serialize};

/// Per-player scoreboard statistics in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatRecord {
    pub combat_score: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl StatRecord {
    pub fn new(combat_score: u32, kills: u32, deaths: u32, assists: u32) -> Self {
        Self {
            combat_score,
            kills,
            deaths,
            assists,
        }
    }

    /// Build a record from the last four numeric tokens of a scoreboard row.
    ///
    /// Returns `None` if fewer than four tokens are supplied.
    pub fn from_tail(tokens: &[u32]) -> Option<Self> {
        let start = tokens.len().checked_sub(4)?;
        match &tokens[start..] {
            &[combat_score, kills, deaths, assists] => {
                Some(Self::new(combat_score, kills, deaths, assists))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for StatRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CS {} | {}/{}/{}",
            self.combat_score, self.kills, self.deaths, self.assists
        )
    }
}

/// One line of recognized text after artifact normalization, with the
/// standalone integer tokens found on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLine {
    /// Zero-based line index in the recognized text
    pub line_index: usize,
    pub tokens: Vec<u32>,
}

impl CandidateLine {
    /// Minimum token count for a line to be treated as a stat row.
    pub const MIN_TOKENS: usize = 4;

    pub fn is_admissible(&self) -> bool {
        self.tokens.len() >= Self::MIN_TOKENS
    }

    /// The record formed by this line's last four tokens, if admissible.
    pub fn record(&self) -> Option<StatRecord> {
        StatRecord::from_tail(&self.tokens)
    }
}
