use super::config::PointsConfig;
use super::outcome::{DerivedResults, Segment, TeamResult};
use std::collections::BTreeMap;

/// Points handed out for one round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsAward {
    /// Player -> points earned this round
    pub points: BTreeMap<String, f64>,
    /// Sum of every player's points
    pub total: f64,
}

fn segment_award(config: &PointsConfig, segment: Segment) -> f64 {
    match segment {
        Segment::Front => config.front,
        Segment::Back => config.back,
        Segment::Overall => config.overall,
    }
}

/// Points for one player on `team`.
///
/// Awards add independently: a share of `fw` for each flight won, `s` per
/// skin, and a share of the front/back/overall award for each segment the
/// team won. Shares divide the award by the number of tied winners.
pub fn player_points(
    player: &str,
    team: &TeamResult,
    results: &DerivedResults,
    config: &PointsConfig,
) -> f64 {
    let flights: f64 = results
        .flight_winners
        .iter()
        .filter(|(_, winners)| winners.iter().any(|w| w == player))
        .map(|(flight, _)| {
            let split = results.flight_splits.get(flight).copied().unwrap_or(1).max(1);
            config.flight_win / split as f64
        })
        .sum();

    let skins = results.skins.get(player).map_or(0, Vec::len) as f64 * config.skin;

    let segments: f64 = Segment::ALL
        .iter()
        .filter(|segment| team.won(**segment))
        .map(|segment| segment_award(config, *segment) / team.split(*segment).max(1) as f64)
        .sum();

    flights + skins + segments
}

/// Allocate points to every team player in a valid round.
///
/// The total is folded from the same per-player values it reports, so the
/// two always agree.
pub fn allocate_points(results: &DerivedResults, config: &PointsConfig) -> PointsAward {
    results
        .teams
        .iter()
        .flat_map(|team| team.players.iter().map(move |p| (p.name.as_str(), team)))
        .fold(PointsAward::default(), |mut award, (player, team)| {
            let earned = player_points(player, team, results, config);
            *award.points.entry(player.to_string()).or_insert(0.0) += earned;
            award.total += earned;
            award
        })
}
