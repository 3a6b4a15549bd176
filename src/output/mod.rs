pub mod formatter;
pub mod player_data;
pub mod site;

pub use formatter::{
    format_points, format_round_list, format_standings_table, format_standings_tsv,
    should_use_colors,
};
pub use player_data::{build_player_data, CardEntry, PlayerData};
pub use site::{export_site, player_file_stem, player_image, ExportSummary};
