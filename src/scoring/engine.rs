use super::allocator::allocate_points;
use super::config::PointsConfig;
use super::outcome::{derive_results, TeamResult};
use super::validation::check_round;
use crate::error::Result;
use crate::results::Round;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// The scored record of one round.
///
/// Invalid rounds keep their name, date and reason but carry no teams,
/// winners or points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundOutcome {
    pub name: String,
    pub date: NaiveDate,
    /// Days since 0001-01-01 (day 1), for date sorting in the site
    pub date_timestamp: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gg_url: Option<String>,
    pub valid: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub teams: Vec<TeamResult>,
    #[serde(default)]
    pub flight_winners: BTreeMap<usize, Vec<String>>,
    #[serde(default)]
    pub flight_splits: BTreeMap<usize, usize>,
    #[serde(default)]
    pub skins: BTreeMap<String, Vec<u8>>,
    #[serde(rename = "add_points", default)]
    pub points: BTreeMap<String, f64>,
    #[serde(default)]
    pub total_points: f64,
}

impl RoundOutcome {
    fn invalid(round: &Round, reason: String) -> Self {
        Self {
            name: round.name.clone(),
            date: round.date,
            date_timestamp: round.date.num_days_from_ce(),
            gg_url: round.source_url.clone(),
            valid: false,
            reason: Some(reason),
            teams: Vec::new(),
            flight_winners: BTreeMap::new(),
            flight_splits: BTreeMap::new(),
            skins: BTreeMap::new(),
            points: BTreeMap::new(),
            total_points: 0.0,
        }
    }

    /// The team `player` played on, if they played
    pub fn team_of(&self, player: &str) -> Option<&TeamResult> {
        self.teams.iter().find(|team| team.has_player(player))
    }

    /// Points `player` earned in this round (0 if they did not play)
    pub fn points_for(&self, player: &str) -> f64 {
        self.points.get(player).copied().unwrap_or(0.0)
    }

    /// Flights won by `player`, counting each tied win once
    pub fn flight_wins_for(&self, player: &str) -> usize {
        self.flight_winners
            .values()
            .filter(|winners| winners.iter().any(|w| w == player))
            .count()
    }

    pub fn skins_for(&self, player: &str) -> usize {
        self.skins.get(player).map_or(0, Vec::len)
    }
}

/// Validate, derive and allocate one round.
///
/// A round that fails validation is returned with `valid == false` and its
/// reason. Structural problems that make a round unscorable (a team player
/// with no scorecard) are errors.
pub fn score_round(
    round: &Round,
    config: &PointsConfig,
    unofficial: &BTreeSet<String>,
) -> Result<RoundOutcome> {
    if let Some(reason) = check_round(round, config, unofficial) {
        warn!("Skipping round {}, {}", round.name, reason);
        return Ok(RoundOutcome::invalid(round, reason.to_string()));
    }

    let results = derive_results(round, config.best_ball)?;
    let award = allocate_points(&results, config);
    debug!(
        "{}: {} skins, {} flights, {} points awarded",
        round.name,
        results.skins.values().map(Vec::len).sum::<usize>(),
        results.flight_winners.len(),
        award.total
    );

    Ok(RoundOutcome {
        name: round.name.clone(),
        date: round.date,
        date_timestamp: round.date.num_days_from_ce(),
        gg_url: round.source_url.clone(),
        valid: true,
        reason: None,
        teams: results.teams,
        flight_winners: results.flight_winners,
        flight_splits: results.flight_splits,
        skins: results.skins,
        points: award.points,
        total_points: award.total,
    })
}

/// Score every round, in order.
///
/// Stops at the first unscorable round; the error names it.
pub fn score_season(
    rounds: &[Round],
    config: &PointsConfig,
    unofficial: &BTreeSet<String>,
) -> Result<Vec<RoundOutcome>> {
    let outcomes = rounds
        .iter()
        .map(|round| score_round(round, config, unofficial))
        .collect::<Result<Vec<_>>>()?;

    let valid = outcomes.iter().filter(|o| o.valid).count();
    info!(
        "Scored {} rounds ({} valid, {} skipped)",
        outcomes.len(),
        valid,
        outcomes.len() - valid
    );
    Ok(outcomes)
}
