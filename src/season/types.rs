use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Points a player earned in one round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundPoints {
    pub name: String,
    pub date: NaiveDate,
    pub points: f64,
}

/// A player's rounds in one calendar month under the monthly cap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthRounds {
    /// "YYYY-MM"
    pub month: String,
    /// Every round played that month, in date order
    pub rounds: Vec<RoundPoints>,
    /// Points from the rounds that were kept
    pub points: f64,
}

/// A later round that displaced a counted round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Replacement {
    pub replaced: String,
    pub by: String,
}

/// One player's season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSeasonRecord {
    pub name: String,
    pub image: String,
    /// Season total after the monthly cap or replacement rounds
    pub points: f64,
    pub skins: usize,
    pub flight_wins: usize,
    pub front_wins: usize,
    pub back_wins: usize,
    pub overall_wins: usize,
    pub rounds: usize,
    /// Every round played, in date order
    pub round_history: Vec<RoundPoints>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<MonthRounds>,
    /// Rounds dropped by the monthly cap
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub ignored: BTreeSet<String>,
    /// Counted rounds after replacements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub season_rounds: Vec<RoundPoints>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replaced: Vec<Replacement>,
}

impl PlayerSeasonRecord {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            points: 0.0,
            skins: 0,
            flight_wins: 0,
            front_wins: 0,
            back_wins: 0,
            overall_wins: 0,
            rounds: 0,
            round_history: Vec::new(),
            months: Vec::new(),
            ignored: BTreeSet::new(),
            season_rounds: Vec::new(),
            replaced: Vec::new(),
        }
    }

    /// Points earned across every round, before any cap or replacement
    pub fn raw_points(&self) -> f64 {
        self.round_history.iter().map(|r| r.points).sum()
    }
}
