pub mod allocator;
pub mod config;
pub mod engine;
pub mod outcome;
pub mod validation;

pub use allocator::{allocate_points, PointsAward};
pub use config::*;
pub use engine::{score_round, score_season, RoundOutcome};
pub use outcome::{derive_results, DerivedResults, Segment, TeamPlayer, TeamResult};
pub use validation::{check_round, validate_points, Disqualification};
