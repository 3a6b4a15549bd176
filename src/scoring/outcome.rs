use crate::error::{Result, ScoringError};
use crate::results::{Round, HOLE_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use tracing::debug;

/// A scored stretch of holes for team best-ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Front,
    Back,
    Overall,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Front, Segment::Back, Segment::Overall];

    pub fn holes(self) -> RangeInclusive<u8> {
        match self {
            Segment::Front => 1..=9,
            Segment::Back => 10..=18,
            Segment::Overall => 1..=HOLE_COUNT as u8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Segment::Front => "front",
            Segment::Back => "back",
            Segment::Overall => "overall",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamPlayer {
    pub name: String,
    /// Total strokes across recorded holes
    pub score: u32,
}

/// A team's best-ball totals and which segments it won.
///
/// `*_split` is the number of teams tied for the win in that segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamResult {
    pub players: Vec<TeamPlayer>,
    pub front_score: u32,
    pub back_score: u32,
    pub overall_score: u32,
    pub front: bool,
    pub back: bool,
    pub overall: bool,
    pub front_split: usize,
    pub back_split: usize,
    pub overall_split: usize,
}

impl TeamResult {
    pub fn best_ball(&self, segment: Segment) -> u32 {
        match segment {
            Segment::Front => self.front_score,
            Segment::Back => self.back_score,
            Segment::Overall => self.overall_score,
        }
    }

    pub fn won(&self, segment: Segment) -> bool {
        match segment {
            Segment::Front => self.front,
            Segment::Back => self.back,
            Segment::Overall => self.overall,
        }
    }

    pub fn split(&self, segment: Segment) -> usize {
        match segment {
            Segment::Front => self.front_split,
            Segment::Back => self.back_split,
            Segment::Overall => self.overall_split,
        }
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    fn set_result(&mut self, segment: Segment, won: bool, split: usize) {
        match segment {
            Segment::Front => {
                self.front = won;
                self.front_split = split;
            }
            Segment::Back => {
                self.back = won;
                self.back_split = split;
            }
            Segment::Overall => {
                self.overall = won;
                self.overall_split = split;
            }
        }
    }
}

/// Everything derived from a valid round before points are assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedResults {
    pub teams: Vec<TeamResult>,
    /// Flight number (1-based roster position) -> winners
    pub flight_winners: BTreeMap<usize, Vec<String>>,
    /// Flight number -> number of tied winners
    pub flight_splits: BTreeMap<usize, usize>,
    /// Player -> holes on which they won a skin
    pub skins: BTreeMap<String, Vec<u8>>,
}

/// Sum of the lowest `best_ball` scores at each hole in `holes`.
///
/// Holes where fewer than `best_ball` teammates recorded a score contribute
/// whatever scores exist.
pub fn team_best_ball(
    round: &Round,
    team: &[String],
    holes: RangeInclusive<u8>,
    best_ball: usize,
) -> Result<u32> {
    let mut total = 0;
    for hole in holes {
        let mut hole_scores = Vec::with_capacity(team.len());
        for player in team {
            let card = round
                .scorecard(player)
                .ok_or_else(|| missing_scorecard(round, player))?;
            if let Some(score) = card.score(hole) {
                hole_scores.push(score);
            }
        }
        hole_scores.sort_unstable();
        total += hole_scores.iter().take(best_ball).sum::<u32>();
    }
    Ok(total)
}

fn missing_scorecard(round: &Round, player: &str) -> ScoringError {
    ScoringError::malformed(&round.name, format!("no scorecard for team player {}", player))
}

/// Best-ball totals for every team, with segment winners flagged.
pub fn derive_teams(round: &Round, best_ball: usize) -> Result<Vec<TeamResult>> {
    let mut teams = Vec::with_capacity(round.teams.len());
    for team in &round.teams {
        let mut players = Vec::with_capacity(team.len());
        for name in team {
            let card = round
                .scorecard(name)
                .ok_or_else(|| missing_scorecard(round, name))?;
            players.push(TeamPlayer {
                name: name.clone(),
                score: card.total(),
            });
        }
        teams.push(TeamResult {
            players,
            front_score: team_best_ball(round, team, Segment::Front.holes(), best_ball)?,
            back_score: team_best_ball(round, team, Segment::Back.holes(), best_ball)?,
            overall_score: team_best_ball(round, team, Segment::Overall.holes(), best_ball)?,
            front: false,
            back: false,
            overall: false,
            front_split: 0,
            back_split: 0,
            overall_split: 0,
        });
    }

    for segment in Segment::ALL {
        let Some(winning) = teams.iter().map(|t| t.best_ball(segment)).min() else {
            continue;
        };
        let split = teams
            .iter()
            .filter(|t| t.best_ball(segment) == winning)
            .count();
        for team in &mut teams {
            let won = team.best_ball(segment) == winning;
            team.set_result(segment, won, split);
        }
        debug!(
            "{}: {} best-ball {} won by {} team(s)",
            round.name,
            segment.label(),
            winning,
            split
        );
    }

    Ok(teams)
}

/// Lowest complete 18-hole total in each flight.
///
/// A flight is every player at the same roster position across teams.
/// Players without a complete scorecard cannot win their flight; a flight
/// with no complete scorecards has no entry.
pub fn derive_flights(
    round: &Round,
) -> (BTreeMap<usize, Vec<String>>, BTreeMap<usize, usize>) {
    let mut flights: BTreeMap<usize, Vec<(&str, u32)>> = BTreeMap::new();
    for team in &round.teams {
        for (idx, player) in team.iter().enumerate() {
            if let Some(card) = round.scorecard(player).filter(|c| c.is_complete()) {
                flights
                    .entry(idx + 1)
                    .or_default()
                    .push((player.as_str(), card.total()));
            }
        }
    }

    let mut winners = BTreeMap::new();
    let mut splits = BTreeMap::new();
    for (flight, entries) in flights {
        let Some(winning) = entries.iter().map(|(_, score)| *score).min() else {
            continue;
        };
        let flight_winners: Vec<String> = entries
            .iter()
            .filter(|(_, score)| *score == winning)
            .map(|(name, _)| name.to_string())
            .collect();
        splits.insert(flight, flight_winners.len());
        winners.insert(flight, flight_winners);
    }
    (winners, splits)
}

/// Skins: a hole goes to the one player with the strictly lowest score.
///
/// Every player with a recorded score on the hole is considered, team or
/// not. A tie for low, or a hole with fewer than two recorded scores, awards
/// nothing.
pub fn derive_skins(round: &Round) -> BTreeMap<String, Vec<u8>> {
    let mut skins: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    for hole in Segment::Overall.holes() {
        let mut hole_scores: Vec<(&str, u32)> = round
            .scorecards
            .iter()
            .filter_map(|(player, card)| card.score(hole).map(|s| (player.as_str(), s)))
            .collect();
        hole_scores.sort_by_key(|(_, score)| *score);

        if let [(player, low), (_, next), ..] = hole_scores.as_slice() {
            if low < next {
                skins.entry(player.to_string()).or_default().push(hole);
            }
        }
    }
    skins
}

/// Derive team, flight and skin results for a round that passed validation.
pub fn derive_results(round: &Round, best_ball: usize) -> Result<DerivedResults> {
    let teams = derive_teams(round, best_ball)?;
    let (flight_winners, flight_splits) = derive_flights(round);
    let skins = derive_skins(round);
    Ok(DerivedResults {
        teams,
        flight_winners,
        flight_splits,
        skins,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::results::Scorecard;
    use chrono::NaiveDate;

    /// Build a round from teams and 18-hole scorecards
    pub(crate) fn sample_round(teams: &[&[&str]], cards: &[(&str, [u32; 18])]) -> Round {
        Round {
            name: "Round 1 (Wed, June 3)".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 6, 3).unwrap(),
            source_url: None,
            teams: teams
                .iter()
                .map(|t| t.iter().map(|p| p.to_string()).collect())
                .collect(),
            scorecards: cards
                .iter()
                .map(|(name, holes)| {
                    let holes = (1..=18u8).zip(holes.iter().copied()).collect();
                    (name.to_string(), Scorecard::new(holes))
                })
                .collect(),
        }
    }

    pub(crate) fn flat(score: u32) -> [u32; 18] {
        [score; 18]
    }

    /// Scorecard of all 4s except the listed (hole, score) overrides
    pub(crate) fn card_with(overrides: &[(u8, u32)]) -> [u32; 18] {
        let mut holes = flat(4);
        for (hole, score) in overrides {
            holes[(*hole - 1) as usize] = *score;
        }
        holes
    }

    #[test]
    fn test_best_ball_takes_lowest_two() {
        let round = sample_round(
            &[&["A", "B", "C"]],
            &[("A", flat(3)), ("B", flat(5)), ("C", flat(4))],
        );
        let team = round.teams[0].clone();
        // 3 + 4 per hole
        assert_eq!(team_best_ball(&round, &team, Segment::Front.holes(), 2).unwrap(), 63);
        assert_eq!(team_best_ball(&round, &team, Segment::Overall.holes(), 2).unwrap(), 126);
        assert_eq!(team_best_ball(&round, &team, Segment::Back.holes(), 1).unwrap(), 27);
    }

    #[test]
    fn test_best_ball_with_missing_hole_uses_available() {
        let mut round = sample_round(&[&["A", "B"]], &[("A", flat(4)), ("B", flat(5))]);
        round.scorecards.get_mut("A").unwrap().holes.remove(&1);
        round.scorecards.get_mut("B").unwrap().holes.remove(&1);
        round.scorecards.get_mut("B").unwrap().holes.remove(&2);
        let team = round.teams[0].clone();
        // Hole 1: nothing, hole 2: 4 only, holes 3-9: 4 + 5
        assert_eq!(team_best_ball(&round, &team, 1..=9, 2).unwrap(), 4 + 7 * 9);
    }

    #[test]
    fn test_missing_scorecard_is_malformed() {
        let round = sample_round(&[&["A", "Ghost"]], &[("A", flat(4))]);
        let err = derive_teams(&round, 2).unwrap_err();
        assert!(matches!(err, ScoringError::MalformedRound { .. }));
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn test_front_tie_splits_between_teams() {
        // Both teams shoot 34 best-ball on the front; team 2 wins the back
        let t1 = card_with(&[(1, 3), (2, 3)]);
        let t2 = card_with(&[(1, 3), (10, 3)]);
        let mut t2_partner = flat(4);
        t2_partner[1] = 3;
        let round = sample_round(
            &[&["A", "B"], &["C", "D"]],
            &[("A", t1), ("B", flat(4)), ("C", t2), ("D", t2_partner)],
        );
        let teams = derive_teams(&round, 1).unwrap();
        assert_eq!(teams[0].front_score, 34);
        assert_eq!(teams[1].front_score, 34);
        assert!(teams[0].front && teams[1].front);
        assert_eq!(teams[0].front_split, 2);
        assert_eq!(teams[1].front_split, 2);

        assert!(!teams[0].back);
        assert!(teams[1].back);
        assert_eq!(teams[1].back_split, 1);
        assert!(teams[1].overall);
        assert!(!teams[0].overall);
    }

    #[test]
    fn test_team_player_totals() {
        let round = sample_round(&[&["A", "B"]], &[("A", flat(4)), ("B", flat(5))]);
        let teams = derive_teams(&round, 2).unwrap();
        assert_eq!(teams[0].players[0], TeamPlayer { name: "A".to_string(), score: 72 });
        assert_eq!(teams[0].players[1].score, 90);
        assert!(teams[0].has_player("B"));
    }

    #[test]
    fn test_flight_winners_by_roster_position() {
        let round = sample_round(
            &[&["A1", "A2"], &["B1", "B2"]],
            &[
                ("A1", flat(4)),
                ("A2", flat(5)),
                ("B1", flat(5)),
                ("B2", card_with(&[(1, 3)])),
            ],
        );
        let (winners, splits) = derive_flights(&round);
        assert_eq!(winners[&1], vec!["A1".to_string()]);
        assert_eq!(winners[&2], vec!["B2".to_string()]);
        assert_eq!(splits[&1], 1);
        assert_eq!(splits[&2], 1);
    }

    #[test]
    fn test_flight_tie_produces_multiple_winners() {
        let round = sample_round(
            &[&["A1"], &["B1"], &["C1"]],
            &[("A1", flat(4)), ("B1", flat(4)), ("C1", flat(5))],
        );
        let (winners, splits) = derive_flights(&round);
        assert_eq!(winners[&1], vec!["A1".to_string(), "B1".to_string()]);
        assert_eq!(splits[&1], 2);
    }

    #[test]
    fn test_incomplete_player_cannot_win_flight() {
        let mut round = sample_round(&[&["A1"], &["B1"]], &[("A1", flat(3)), ("B1", flat(5))]);
        round.scorecards.get_mut("A1").unwrap().holes.remove(&18);
        let (winners, _) = derive_flights(&round);
        assert_eq!(winners[&1], vec!["B1".to_string()]);
    }

    #[test]
    fn test_skin_to_unique_low() {
        // Hole 1: A 3, B 4, C 5 -> A wins a skin
        let round = sample_round(
            &[&["A", "B", "C"]],
            &[
                ("A", card_with(&[(1, 3)])),
                ("B", card_with(&[(1, 4)])),
                ("C", card_with(&[(1, 5)])),
            ],
        );
        let skins = derive_skins(&round);
        assert_eq!(skins.len(), 1);
        assert_eq!(skins["A"], vec![1]);
    }

    #[test]
    fn test_tied_low_awards_no_skin() {
        // Hole 1: A 3, B 3, C 5 -> tie for low, no skin
        let round = sample_round(
            &[&["A", "B", "C"]],
            &[
                ("A", card_with(&[(1, 3)])),
                ("B", card_with(&[(1, 3)])),
                ("C", card_with(&[(1, 5)])),
            ],
        );
        assert!(derive_skins(&round).is_empty());
    }

    #[test]
    fn test_multiple_skins_per_player() {
        let round = sample_round(
            &[&["A", "B"]],
            &[("A", card_with(&[(3, 2), (17, 3)])), ("B", flat(4))],
        );
        let skins = derive_skins(&round);
        assert_eq!(skins["A"], vec![3, 17]);
    }

    #[test]
    fn test_single_score_on_hole_awards_no_skin() {
        let mut round = sample_round(&[&["A", "B"]], &[("A", card_with(&[(5, 2)])), ("B", flat(4))]);
        round.scorecards.get_mut("B").unwrap().holes.remove(&5);
        assert!(derive_skins(&round).get("A").is_none());
    }

    #[test]
    fn test_derive_results_combines_all() {
        let round = sample_round(
            &[&["A1", "A2"], &["B1", "B2"]],
            &[
                ("A1", card_with(&[(1, 2)])),
                ("A2", flat(4)),
                ("B1", flat(5)),
                ("B2", flat(5)),
            ],
        );
        let results = derive_results(&round, 2).unwrap();
        assert_eq!(results.teams.len(), 2);
        assert!(results.teams[0].overall);
        assert!(!results.teams[1].overall);
        assert_eq!(results.flight_winners[&1], vec!["A1".to_string()]);
        assert_eq!(results.flight_winners[&2], vec!["A2".to_string()]);
        assert_eq!(results.flight_splits[&2], 1);
        assert_eq!(results.skins.len(), 1);
        assert_eq!(results.skins["A1"], vec![1]);
    }
}
