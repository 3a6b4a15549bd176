pub mod loader;
pub mod types;

pub use loader::{all_players, default_season_year, load_rounds, parse_round_name_date};
pub use types::{Round, RoundFile, Scorecard, HOLE_COUNT, MAX_HOLE_SCORE};
