use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of holes on a complete scorecard.
pub const HOLE_COUNT: usize = 18;

/// Highest stroke count accepted on a single hole.
pub const MAX_HOLE_SCORE: u32 = 99;

/// One round as written by the sync tool, one JSON file per round.
///
/// Example:
/// ```json
/// {
///   "name": "Round 59 (Wed, December 23)",
///   "results": {
///     "gg_url": "https://golfgenius.com/...",
///     "teams": [["Perry, Robbie", "Welton, Craig"], ["Alford, Sumner", "Samuel, Matthew"]],
///     "scores": { "Perry, Robbie": { "scores": { "1": { "score": 4 } } } }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoundFile {
    pub name: String,
    pub results: RoundResults,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoundResults {
    #[serde(default)]
    pub teams: Vec<Vec<String>>,

    #[serde(default)]
    pub scores: BTreeMap<String, PlayerScores>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gg_url: Option<String>,

    /// Explicit round date; when absent the date is read from the round name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerScores {
    /// Hole number (as a string key, "1".."18") -> result
    #[serde(default)]
    pub scores: BTreeMap<String, HoleResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HoleResult {
    pub score: u32,
}

/// A player's recorded strokes for one round, keyed by hole number (1-18).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    pub holes: BTreeMap<u8, u32>,
}

impl Scorecard {
    pub fn new(holes: BTreeMap<u8, u32>) -> Self {
        Self { holes }
    }

    /// Strokes on a hole, if recorded
    pub fn score(&self, hole: u8) -> Option<u32> {
        self.holes.get(&hole).copied()
    }

    /// Sum of every recorded hole
    pub fn total(&self) -> u32 {
        self.holes.values().sum()
    }

    pub fn is_complete(&self) -> bool {
        self.holes.len() == HOLE_COUNT
    }
}

/// A validated-shape round ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub name: String,
    pub date: NaiveDate,
    pub source_url: Option<String>,
    /// Teams in roster order; a player's index within the team is their flight
    pub teams: Vec<Vec<String>>,
    pub scorecards: BTreeMap<String, Scorecard>,
}

impl Round {
    /// Total players across all teams
    pub fn player_count(&self) -> usize {
        self.teams.iter().map(Vec::len).sum()
    }

    pub fn scorecard(&self, player: &str) -> Option<&Scorecard> {
        self.scorecards.get(player)
    }

    /// Every player named on a team, in roster order
    pub fn players(&self) -> impl Iterator<Item = &String> {
        self.teams.iter().flatten()
    }
}
