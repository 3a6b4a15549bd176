use super::types::{MonthRounds, PlayerSeasonRecord, Replacement, RoundPoints};
use crate::scoring::{PointsConfig, RoundOutcome, SeasonPolicy, Segment};
use chrono::Datelike;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Result of applying the monthly cap to a round history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CappedSeason {
    pub months: Vec<MonthRounds>,
    pub ignored: BTreeSet<String>,
    pub points: f64,
}

/// Result of applying replacement rounds to a round history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacedSeason {
    pub season_rounds: Vec<RoundPoints>,
    pub replaced: Vec<Replacement>,
    pub points: f64,
}

fn by_points_desc(a: &RoundPoints, b: &RoundPoints) -> Ordering {
    b.points.total_cmp(&a.points)
}

/// Keep at most `cap` rounds per calendar month.
///
/// Within a month over the cap the highest-scoring rounds are kept (ties go
/// to the earlier round) and the rest are ignored. `history` must be in date
/// order.
pub fn apply_monthly_cap(history: &[RoundPoints], cap: usize) -> CappedSeason {
    let mut by_month: BTreeMap<(i32, u32), Vec<&RoundPoints>> = BTreeMap::new();
    for round in history {
        by_month
            .entry((round.date.year(), round.date.month()))
            .or_default()
            .push(round);
    }

    let mut season = CappedSeason::default();
    for ((year, month), rounds) in by_month {
        let mut ranked = rounds.clone();
        ranked.sort_by(|a, b| by_points_desc(a, b));

        let kept = &ranked[..cap.min(ranked.len())];
        let month_points: f64 = kept.iter().map(|r| r.points).sum();
        for dropped in &ranked[kept.len()..] {
            season.ignored.insert(dropped.name.clone());
        }

        season.points += month_points;
        season.months.push(MonthRounds {
            month: format!("{:04}-{:02}", year, month),
            rounds: rounds.into_iter().cloned().collect(),
            points: month_points,
        });
    }
    season
}

/// Count the first `season_rounds` rounds, letting later rounds replace the
/// worst of them.
///
/// The counted rounds are ranked lowest first. Up to `replacements` of the
/// later rounds, best first, each displace the lowest counted round that
/// scored strictly less and has not already been displaced. A later round
/// that beats nothing is dropped. `history` must be in date order.
pub fn apply_replacements(
    history: &[RoundPoints],
    season_rounds: Option<usize>,
    replacements: usize,
) -> ReplacedSeason {
    let counted = season_rounds.unwrap_or(history.len()).min(history.len());
    let (season, extra) = history.split_at(counted);

    let mut slots: Vec<(RoundPoints, bool)> = season.iter().cloned().map(|r| (r, false)).collect();
    slots.sort_by(|a, b| a.0.points.total_cmp(&b.0.points));

    let mut extra: Vec<&RoundPoints> = extra.iter().collect();
    extra.sort_by(|a, b| by_points_desc(a, b));
    extra.truncate(replacements);

    let mut replaced = Vec::new();
    for candidate in extra {
        let slot = slots
            .iter_mut()
            .find(|(round, displaced)| !*displaced && round.points < candidate.points);
        if let Some((round, displaced)) = slot {
            replaced.push(Replacement {
                replaced: round.name.clone(),
                by: candidate.name.clone(),
            });
            *round = candidate.clone();
            *displaced = true;
        }
    }

    let season_rounds: Vec<RoundPoints> = slots.into_iter().map(|(round, _)| round).collect();
    let points = season_rounds.iter().map(|r| r.points).sum();
    ReplacedSeason {
        season_rounds,
        replaced,
        points,
    }
}

/// Build one player's season record from every round outcome.
///
/// Round points are read from each outcome's allocation; only rounds the
/// player was on a team for count as played.
pub fn aggregate_player(
    name: &str,
    image: String,
    outcomes: &[RoundOutcome],
    config: &PointsConfig,
) -> PlayerSeasonRecord {
    let mut record = PlayerSeasonRecord::new(name, image);

    for outcome in outcomes {
        record.flight_wins += outcome.flight_wins_for(name);
        record.skins += outcome.skins_for(name);

        let Some(team) = outcome.team_of(name) else {
            continue;
        };
        record.rounds += 1;
        for segment in Segment::ALL {
            if team.won(segment) {
                match segment {
                    Segment::Front => record.front_wins += 1,
                    Segment::Back => record.back_wins += 1,
                    Segment::Overall => record.overall_wins += 1,
                }
            }
        }
        record.round_history.push(RoundPoints {
            name: outcome.name.clone(),
            date: outcome.date,
            points: outcome.points_for(name),
        });
    }
    record.round_history.sort_by_key(|r| r.date);

    match config.season_policy() {
        SeasonPolicy::MonthlyCap { max_rounds } => {
            let capped = apply_monthly_cap(&record.round_history, max_rounds);
            record.points = capped.points;
            record.months = capped.months;
            record.ignored = capped.ignored;
        }
        SeasonPolicy::Replacement {
            season_rounds,
            replacements,
        } => {
            let replaced = apply_replacements(&record.round_history, season_rounds, replacements);
            record.points = replaced.points;
            record.season_rounds = replaced.season_rounds;
            record.replaced = replaced.replaced;
        }
    }

    debug!(
        "{}: {} rounds, {} points ({} before adjustments)",
        record.name,
        record.rounds,
        record.points,
        record.raw_points()
    );
    record
}

/// Season records for every player, best first (ties by name).
pub fn build_standings<F>(
    players: &[String],
    outcomes: &[RoundOutcome],
    config: &PointsConfig,
    image_for: F,
) -> Vec<PlayerSeasonRecord>
where
    F: Fn(&str) -> String,
{
    let mut standings: Vec<PlayerSeasonRecord> = players
        .iter()
        .map(|player| aggregate_player(player, image_for(player), outcomes, config))
        .collect();

    standings.sort_by(|a, b| {
        b.points
            .total_cmp(&a.points)
            .then_with(|| a.name.cmp(&b.name))
    });
    standings
}
