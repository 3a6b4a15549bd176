use super::config::PointsConfig;
use crate::results::{Round, HOLE_COUNT};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

/// Validate the points configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_points(config: &PointsConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let awards = [
        ("fw", config.flight_win),
        ("s", config.skin),
        ("fr", config.front),
        ("ba", config.back),
        ("ov", config.overall),
    ];
    for (key, value) in awards {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("points.{}: must be a non-negative number", key));
        }
    }

    if config.best_ball == 0 {
        errors.push("points.best_ball: must be at least 1".to_string());
    }

    if let (Some(start), Some(end)) = (config.season_start, config.season_end) {
        if start >= end {
            errors.push(format!(
                "points.season_start: {} must be before season_end {}",
                start, end
            ));
        }
    }

    if config.max_rounds_per_month > 0 {
        if config.season_round_count.is_some() {
            errors.push(
                "points.season_round_count: only applies when max_rounds_per_month is 0"
                    .to_string(),
            );
        }
        if config.replacement_scores > 0 {
            errors.push(
                "points.replacement_scores: only applies when max_rounds_per_month is 0"
                    .to_string(),
            );
        }
    } else if config.replacement_scores > 0 && config.season_round_count.is_none() {
        errors.push(
            "points.replacement_scores: requires season_round_count to be set".to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Why a round is left out of scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disqualification {
    Unofficial,
    BeforeSeason { date: NaiveDate, start: NaiveDate },
    AfterSeason { date: NaiveDate, end: NaiveDate },
    UnequalTeams,
    IncompleteScorecards,
    TooFewPlayers { actual: usize, required: usize },
}

impl fmt::Display for Disqualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disqualification::Unofficial => write!(f, "deemed unofficial"),
            Disqualification::BeforeSeason { date, start } => {
                write!(f, "round date {} is not after season start {}", date, start)
            }
            Disqualification::AfterSeason { date, end } => {
                write!(f, "round date {} is not before season end {}", date, end)
            }
            Disqualification::UnequalTeams => {
                write!(f, "teams do not contain equal number of players")
            }
            Disqualification::IncompleteScorecards => {
                write!(f, "not all players finished {} holes", HOLE_COUNT)
            }
            Disqualification::TooFewPlayers { actual, required } => write!(
                f,
                "only {} players participated, {} required",
                actual, required
            ),
        }
    }
}

/// Decide whether a round is scored.
///
/// Checks run in a fixed order and stop at the first failure: unofficial
/// list, season window, equal team sizes, complete scorecards, minimum
/// player count. Returns None for a valid round.
pub fn check_round(
    round: &Round,
    config: &PointsConfig,
    unofficial: &BTreeSet<String>,
) -> Option<Disqualification> {
    if unofficial.contains(&round.name) {
        return Some(Disqualification::Unofficial);
    }

    if let Some(start) = config.season_start {
        if round.date <= start {
            return Some(Disqualification::BeforeSeason {
                date: round.date,
                start,
            });
        }
    }
    if let Some(end) = config.season_end {
        if round.date >= end {
            return Some(Disqualification::AfterSeason {
                date: round.date,
                end,
            });
        }
    }

    if let Some(first) = round.teams.first() {
        if round.teams.iter().any(|team| team.len() != first.len()) {
            return Some(Disqualification::UnequalTeams);
        }
    }

    if round.scorecards.values().any(|card| !card.is_complete()) {
        return Some(Disqualification::IncompleteScorecards);
    }

    let actual = round.player_count();
    if actual < config.min_players {
        return Some(Disqualification::TooFewPlayers {
            actual,
            required: config.min_players,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::outcome::tests::{flat, sample_round};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_team_round() -> Round {
        sample_round(
            &[&["A1", "A2"], &["B1", "B2"]],
            &[("A1", flat(4)), ("A2", flat(4)), ("B1", flat(5)), ("B2", flat(5))],
        )
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_points(&PointsConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_award() {
        let config = PointsConfig {
            skin: -1.0,
            ..PointsConfig::default()
        };
        let errors = validate_points(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("points.s"));
    }

    #[test]
    fn test_zero_best_ball() {
        let config = PointsConfig {
            best_ball: 0,
            ..PointsConfig::default()
        };
        let errors = validate_points(&config).unwrap_err();
        assert!(errors[0].contains("points.best_ball"));
    }

    #[test]
    fn test_season_window_reversed() {
        let config = PointsConfig {
            season_start: Some(date(2020, 11, 1)),
            season_end: Some(date(2020, 3, 1)),
            ..PointsConfig::default()
        };
        let errors = validate_points(&config).unwrap_err();
        assert!(errors[0].contains("points.season_start"));
    }

    #[test]
    fn test_replacement_keys_conflict_with_monthly_cap() {
        let config = PointsConfig {
            max_rounds_per_month: 4,
            season_round_count: Some(10),
            replacement_scores: 2,
            ..PointsConfig::default()
        };
        let errors = validate_points(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_replacements_need_season_length() {
        let config = PointsConfig {
            replacement_scores: 2,
            ..PointsConfig::default()
        };
        let errors = validate_points(&config).unwrap_err();
        assert!(errors[0].contains("requires season_round_count"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = PointsConfig {
            flight_win: -1.0, // Error 1
            overall: f64::NAN, // Error 2
            best_ball: 0,     // Error 3
            ..PointsConfig::default()
        };
        assert_eq!(validate_points(&config).unwrap_err().len(), 3);
    }

    #[test]
    fn test_valid_round() {
        let round = two_team_round();
        assert_eq!(check_round(&round, &PointsConfig::default(), &BTreeSet::new()), None);
    }

    #[test]
    fn test_unofficial_round() {
        let round = two_team_round();
        let unofficial = BTreeSet::from([round.name.clone()]);
        let verdict = check_round(&round, &PointsConfig::default(), &unofficial);
        assert_eq!(verdict, Some(Disqualification::Unofficial));
        assert_eq!(verdict.unwrap().to_string(), "deemed unofficial");
    }

    #[test]
    fn test_season_window_is_exclusive() {
        let round = two_team_round(); // 2020-06-03
        let on_start = PointsConfig {
            season_start: Some(round.date),
            ..PointsConfig::default()
        };
        let verdict = check_round(&round, &on_start, &BTreeSet::new()).unwrap();
        assert!(verdict.to_string().contains("season start"));

        let on_end = PointsConfig {
            season_end: Some(round.date),
            ..PointsConfig::default()
        };
        let verdict = check_round(&round, &on_end, &BTreeSet::new()).unwrap();
        assert!(verdict.to_string().contains("season end"));

        let inside = PointsConfig {
            season_start: Some(date(2020, 6, 2)),
            season_end: Some(date(2020, 6, 4)),
            ..PointsConfig::default()
        };
        assert!(check_round(&round, &inside, &BTreeSet::new()).is_none());
    }

    #[test]
    fn test_unequal_teams() {
        let round = sample_round(
            &[&["A1", "A2"], &["B1"]],
            &[("A1", flat(4)), ("A2", flat(4)), ("B1", flat(5))],
        );
        let verdict = check_round(&round, &PointsConfig::default(), &BTreeSet::new());
        assert_eq!(verdict, Some(Disqualification::UnequalTeams));
    }

    #[test]
    fn test_incomplete_scorecard() {
        let mut round = two_team_round();
        round.scorecards.get_mut("B2").unwrap().holes.remove(&18);
        let verdict = check_round(&round, &PointsConfig::default(), &BTreeSet::new()).unwrap();
        assert_eq!(verdict.to_string(), "not all players finished 18 holes");
    }

    #[test]
    fn test_too_few_players() {
        let round = two_team_round();
        let config = PointsConfig {
            min_players: 8,
            ..PointsConfig::default()
        };
        let verdict = check_round(&round, &config, &BTreeSet::new()).unwrap();
        assert_eq!(
            verdict,
            Disqualification::TooFewPlayers {
                actual: 4,
                required: 8
            }
        );
        assert!(verdict.to_string().contains("4"));
        assert!(verdict.to_string().contains("8"));
    }

    #[test]
    fn test_checks_run_in_order() {
        // Fails the window, team size, completion and player count checks
        let mut round = sample_round(
            &[&["A1", "A2"], &["B1"]],
            &[("A1", flat(4)), ("A2", flat(4)), ("B1", flat(5))],
        );
        round.scorecards.get_mut("B1").unwrap().holes.remove(&18);
        let mut config = PointsConfig {
            season_start: Some(round.date),
            min_players: 10,
            ..PointsConfig::default()
        };
        let none = BTreeSet::new();

        assert!(matches!(
            check_round(&round, &config, &none),
            Some(Disqualification::BeforeSeason { .. })
        ));

        config.season_start = None;
        assert_eq!(
            check_round(&round, &config, &none),
            Some(Disqualification::UnequalTeams)
        );

        round.teams[1].push("B2".to_string());
        assert_eq!(
            check_round(&round, &config, &none),
            Some(Disqualification::IncompleteScorecards)
        );

        round.scorecards.get_mut("B1").unwrap().holes.insert(18, 5);
        assert_eq!(
            check_round(&round, &config, &none),
            Some(Disqualification::TooFewPlayers {
                actual: 4,
                required: 10
            })
        );
    }

    #[test]
    fn test_season_end_checked_before_team_sizes() {
        let round = sample_round(
            &[&["A1", "A2"], &["B1"]],
            &[("A1", flat(4)), ("A2", flat(4)), ("B1", flat(5))],
        );
        let config = PointsConfig {
            season_end: Some(date(2020, 5, 1)),
            ..PointsConfig::default()
        };
        assert!(matches!(
            check_round(&round, &config, &BTreeSet::new()),
            Some(Disqualification::AfterSeason { .. })
        ));
    }

    #[test]
    fn test_first_failure_wins() {
        // Unofficial and unequal: the unofficial check runs first
        let round = sample_round(
            &[&["A1", "A2"], &["B1"]],
            &[("A1", flat(4)), ("A2", flat(4)), ("B1", flat(5))],
        );
        let unofficial = BTreeSet::from([round.name.clone()]);
        let config = PointsConfig {
            min_players: 10,
            ..PointsConfig::default()
        };
        for _ in 0..3 {
            assert_eq!(
                check_round(&round, &config, &unofficial),
                Some(Disqualification::Unofficial)
            );
        }
    }
}
