pub mod aggregate;
pub mod types;

pub use aggregate::{aggregate_player, apply_monthly_cap, apply_replacements, build_standings};
pub use types::{MonthRounds, PlayerSeasonRecord, Replacement, RoundPoints};
