use super::types::{Round, RoundFile, Scorecard, HOLE_COUNT, MAX_HOLE_SCORE};
use crate::error::{Result as ScoringResult, ScoringError};
use anyhow::{Context, Result};
use chrono::{Datelike, Local, Month, NaiveDate};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

fn round_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"Round\s+(?P<round_id>\d+)\s+\((Fri|Sat|Sun|Mon|Tue|Wed|Thu),\s+(?P<month>\w+)\s+(?P<day>\d+)\)",
        )
        .expect("round name pattern is a valid regex")
    })
}

/// Read the date out of a round name like "Round 59 (Wed, December 23)".
///
/// Names carry no year, so `year` supplies it. Returns None when the name
/// does not follow the pattern or names an impossible date.
pub fn parse_round_name_date(name: &str, year: i32) -> Option<NaiveDate> {
    let caps = round_name_pattern().captures(name)?;
    let month: Month = caps["month"].parse().ok()?;
    let day: u32 = caps["day"].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
}

/// List the round files in a results directory, sorted by path
pub fn round_file_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.json");
    let pattern = pattern.to_string_lossy();
    let mut paths = glob::glob(&pattern)
        .with_context(|| format!("Invalid results directory pattern: {}", pattern))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to list round files in {}", dir.display()))?;
    paths.sort();
    Ok(paths)
}

/// Parse a single round file.
///
/// Fails with `MalformedRound` if a hole key is not a hole number 1-18.
pub fn load_round_file(path: &Path, season_year: i32) -> ScoringResult<Round> {
    let file = File::open(path)?;
    let raw: RoundFile = serde_json::from_reader(file)?;
    into_round(raw, season_year)
}

/// Convert the sync tool's record into a `Round`, resolving its date.
pub fn into_round(raw: RoundFile, season_year: i32) -> ScoringResult<Round> {
    let RoundFile { name, results } = raw;

    let mut scorecards = BTreeMap::new();
    for (player, player_scores) in results.scores {
        let mut holes = BTreeMap::new();
        for (key, result) in player_scores.scores {
            let hole = key
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|h| (1..=HOLE_COUNT as u8).contains(h))
                .ok_or_else(|| {
                    ScoringError::malformed(
                        &name,
                        format!("invalid hole '{}' on {}'s scorecard", key, player),
                    )
                })?;
            if result.score > MAX_HOLE_SCORE {
                return Err(ScoringError::malformed(
                    &name,
                    format!(
                        "score {} on hole {} for {} exceeds {}",
                        result.score, hole, player, MAX_HOLE_SCORE
                    ),
                ));
            }
            if holes.insert(hole, result.score).is_some() {
                return Err(ScoringError::malformed(
                    &name,
                    format!("hole {} recorded twice on {}'s scorecard", hole, player),
                ));
            }
        }
        scorecards.insert(player, Scorecard::new(holes));
    }

    let date = match results.date.or_else(|| parse_round_name_date(&name, season_year)) {
        Some(date) => date,
        None => {
            let today = Local::now().date_naive();
            warn!("Unable to find date for round {}, assuming {}", name, today);
            today
        }
    };

    Ok(Round {
        name,
        date,
        source_url: results.gg_url,
        teams: results.teams,
        scorecards,
    })
}

/// Load every round in `dir`, sorted chronologically (date, then name).
///
/// A file that cannot be read or parsed aborts the load with the file path
/// in the error context.
pub fn load_rounds(dir: &Path, season_year: i32) -> Result<Vec<Round>> {
    if !dir.is_dir() {
        anyhow::bail!("Results directory not found at {}", dir.display());
    }

    let mut rounds = Vec::new();
    for path in round_file_paths(dir)? {
        let round = load_round_file(&path, season_year)
            .with_context(|| format!("Failed to load round file {}", path.display()))?;
        debug!(
            "Loaded {} ({}, {} teams, {} scorecards)",
            round.name,
            round.date,
            round.teams.len(),
            round.scorecards.len()
        );
        rounds.push(round);
    }

    rounds.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    Ok(rounds)
}

/// Every distinct player named on any team, sorted by name
pub fn all_players(rounds: &[Round]) -> Vec<String> {
    rounds
        .iter()
        .flat_map(|round| round.players().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Year assumed for rounds whose name carries no year
pub fn default_season_year(season_start: Option<NaiveDate>) -> i32 {
    season_start
        .map(|d| d.year())
        .unwrap_or_else(|| Local::now().year())
}
