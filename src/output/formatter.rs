use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::RoundOutcome;
use crate::season::PlayerSeasonRecord;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points compactly: whole numbers without decimals, shares with up
/// to two ("3", "2.5", "0.33")
pub fn format_points(points: f64) -> String {
    let formatted = format!("{:.2}", points);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Win summary column: "F2 B1 O3 FL1 S4"
fn format_wins(record: &PlayerSeasonRecord) -> String {
    format!(
        "F{} B{} O{} FL{} S{}",
        record.front_wins, record.back_wins, record.overall_wins, record.flight_wins, record.skins
    )
}

/// Format standings as a ranked table: rank, points, name, rounds, wins.
/// Tied points share a rank.
pub fn format_standings_table(standings: &[PlayerSeasonRecord], use_colors: bool) -> String {
    if standings.is_empty() {
        return "No players found.".to_string();
    }

    let term_width = get_terminal_width();

    // Rank: 3 chars ("99."), points: 7 chars, rounds: 3 chars
    let points_width = 7;
    let separator = "  ";
    let name_width = standings
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut rank = 0;
    let mut previous: Option<f64> = None;

    standings
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            if previous != Some(record.points) {
                rank = idx + 1;
                previous = Some(record.points);
            }
            let rank_str = format!("{:>2}.", rank);
            let points_str = format!("{:>width$}", format_points(record.points), width = points_width);
            let wins = format_wins(record);

            let fixed_width = 3 + 1 + points_width + separator.len() * 3 + 3 + wins.len();
            let width = match term_width {
                Some(w) if w > fixed_width + 10 => name_width.min(w - fixed_width),
                Some(_) => name_width.min(20),
                None => name_width,
            };
            let name = format!("{:<width$}", truncate(&record.name, width), width = width);

            if use_colors {
                format!(
                    "{} {}{}{}{}{:>3}{}{}",
                    rank_str.dimmed(),
                    points_str.bold(),
                    separator,
                    name,
                    separator,
                    record.rounds,
                    separator,
                    wins.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{:>3}{}{}",
                    rank_str, points_str, separator, name, separator, record.rounds, separator, wins
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format standings as tab-separated values for scripting
/// Columns: points, name, rounds, front, back, overall, flights, skins
pub fn format_standings_tsv(standings: &[PlayerSeasonRecord]) -> String {
    standings
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                format_points(r.points),
                r.name,
                r.rounds,
                r.front_wins,
                r.back_wins,
                r.overall_wins,
                r.flight_wins,
                r.skins
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format rounds one per line: index, date, points awarded or skip reason
pub fn format_round_list(outcomes: &[RoundOutcome], use_colors: bool) -> String {
    if outcomes.is_empty() {
        return "No rounds found.".to_string();
    }

    outcomes
        .iter()
        .enumerate()
        .map(|(idx, outcome)| {
            let index_str = format!("{:>2}.", idx + 1);
            let status = match (&outcome.reason, outcome.valid) {
                (_, true) => format!("{} pts", format_points(outcome.total_points)),
                (Some(reason), false) => format!("skipped: {}", reason),
                (None, false) => "skipped".to_string(),
            };
            if use_colors {
                let status = if outcome.valid {
                    status.green().to_string()
                } else {
                    status.red().to_string()
                };
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    outcome.date,
                    outcome.name.bold(),
                    status
                )
            } else {
                format!("{} {}  {}  {}", index_str, outcome.date, outcome.name, status)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
