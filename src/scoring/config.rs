use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Points schedule and season rules.
///
/// Every key is optional in YAML; missing keys take the values from
/// `PointsConfig::default()`.
///
/// Example YAML:
/// ```yaml
/// points:
///   fw: 1        # flight win
///   s: 1         # per skin
///   fr: 1        # front nine team win
///   ba: 1        # back nine team win
///   ov: 2        # overall team win
///   min_players: 8
///   season_start: "2020-03-31"
///   season_end: "2020-11-01"
///   max_rounds_per_month: 4
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PointsConfig {
    /// Points for winning a flight, shared among tied winners
    #[serde(rename = "fw")]
    pub flight_win: f64,

    /// Points per skin
    #[serde(rename = "s")]
    pub skin: f64,

    /// Points for each player on a team winning the front nine
    #[serde(rename = "fr")]
    pub front: f64,

    /// Points for each player on a team winning the back nine
    #[serde(rename = "ba")]
    pub back: f64,

    /// Points for each player on a team winning overall
    #[serde(rename = "ov")]
    pub overall: f64,

    /// How many of the lowest scores on a hole count toward a team's best-ball
    pub best_ball: usize,

    /// Rounds with fewer players than this are not scored
    pub min_players: usize,

    /// Rounds must be played strictly after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_start: Option<NaiveDate>,

    /// Rounds must be played strictly before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_end: Option<NaiveDate>,

    /// Rounds counted per calendar month; 0 switches to replacement rounds
    pub max_rounds_per_month: usize,

    /// Rounds in a counted season (replacement mode); None counts every round
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_round_count: Option<usize>,

    /// How many extra rounds may displace a worse counted round
    pub replacement_scores: usize,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            flight_win: 1.0,
            skin: 1.0,
            front: 1.0,
            back: 1.0,
            overall: 1.0,
            best_ball: 2,
            min_players: 0,
            season_start: None,
            season_end: None,
            max_rounds_per_month: 0,
            season_round_count: None,
            replacement_scores: 0,
        }
    }
}

/// How a player's round points roll up into a season total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonPolicy {
    /// Keep the best `max_rounds` rounds in each calendar month
    MonthlyCap { max_rounds: usize },
    /// Count the first `season_rounds` rounds, letting up to `replacements`
    /// later rounds displace the worst of them
    Replacement {
        season_rounds: Option<usize>,
        replacements: usize,
    },
}

impl PointsConfig {
    pub fn season_policy(&self) -> SeasonPolicy {
        if self.max_rounds_per_month > 0 {
            SeasonPolicy::MonthlyCap {
                max_rounds: self.max_rounds_per_month,
            }
        } else {
            SeasonPolicy::Replacement {
                season_rounds: self.season_round_count,
                replacements: self.replacement_scores,
            }
        }
    }
}
