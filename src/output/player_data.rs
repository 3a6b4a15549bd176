use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::results::{Round, Scorecard};
use crate::scoring::{RoundOutcome, Segment};

/// One complete 18-hole card in a player's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardEntry {
    pub name: String,
    pub date: NaiveDate,
    pub date_timestamp: i32,
    pub total: u32,
    pub valid: bool,
    pub reason: Option<String>,
    /// Hole-by-hole strokes, holes 1-9
    pub front: Vec<u32>,
    /// Hole-by-hole strokes, holes 10-18
    pub back: Vec<u32>,
    pub out: u32,
    #[serde(rename = "in")]
    pub inward: u32,
}

/// A player's scorecard history for the site's stats pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerData {
    pub name: String,
    /// Mean 18-hole total over valid rounds, to 3 decimals
    pub scoring_average: f64,
    pub rounds: Vec<CardEntry>,
}

fn nine(card: &Scorecard, segment: Segment) -> Vec<u32> {
    segment.holes().filter_map(|hole| card.score(hole)).collect()
}

fn card_entry(round: &Round, outcome: &RoundOutcome, card: &Scorecard) -> CardEntry {
    let front = nine(card, Segment::Front);
    let back = nine(card, Segment::Back);
    CardEntry {
        name: round.name.clone(),
        date: round.date,
        date_timestamp: round.date.num_days_from_ce(),
        total: card.total(),
        valid: outcome.valid,
        reason: outcome.reason.clone(),
        out: front.iter().sum(),
        inward: back.iter().sum(),
        front,
        back,
    }
}

/// Scorecard history for every player.
///
/// `outcomes` must be the scored form of `rounds`, in the same order. Every
/// complete card is listed, including cards from rounds that were not
/// scored; only valid rounds feed the scoring average.
pub fn build_player_data(
    players: &[String],
    rounds: &[Round],
    outcomes: &[RoundOutcome],
) -> Vec<PlayerData> {
    players
        .iter()
        .map(|player| {
            let entries: Vec<CardEntry> = rounds
                .iter()
                .zip(outcomes)
                .filter_map(|(round, outcome)| {
                    round
                        .scorecard(player)
                        .filter(|card| card.is_complete())
                        .map(|card| card_entry(round, outcome, card))
                })
                .collect();

            let valid: Vec<u32> = entries.iter().filter(|e| e.valid).map(|e| e.total).collect();
            let scoring_average = if valid.is_empty() {
                0.0
            } else {
                let mean = valid.iter().sum::<u32>() as f64 / valid.len() as f64;
                (mean * 1000.0).round() / 1000.0
            };

            PlayerData {
                name: player.clone(),
                scoring_average,
                rounds: entries,
            }
        })
        .collect()
}
