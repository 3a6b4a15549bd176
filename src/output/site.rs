use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::player_data::PlayerData;
use crate::scoring::RoundOutcome;
use crate::season::PlayerSeasonRecord;

pub const ROUNDS_DIR: &str = "_rounds";
pub const PLAYERS_DIR: &str = "_players";
pub const PLAYER_DATA_DIR: &str = "_data/player_data";
pub const IMAGES_DIR: &str = "assets/images";
pub const DEFAULT_IMAGE: &str = "/assets/images/default.png";

/// File stem for a player: "Welton, Craig" -> "Welton_Craig"
pub fn player_file_stem(name: &str) -> String {
    name.splitn(2, ',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("_")
}

/// Avatar path for a player, falling back to the default image when
/// `<site>/assets/images/<stem>.png` does not exist
pub fn player_image(site_dir: &Path, name: &str) -> String {
    let file = format!("{}.png", player_file_stem(name));
    if site_dir.join(IMAGES_DIR).join(&file).is_file() {
        format!("/{}/{}", IMAGES_DIR, file)
    } else {
        DEFAULT_IMAGE.to_string()
    }
}

/// Render a record as a Jekyll-style page: YAML front matter and no body
pub fn front_matter<T: Serialize>(value: &T) -> Result<String> {
    let mut yaml = serde_saphyr::to_string(value)
        .map_err(|e| anyhow::anyhow!("Failed to serialize front matter: {}", e))?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(format!("---\n{}---\n", yaml))
}

/// Write a file atomically so the site never sees a half-written page
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory at {}", dir.display()))
}

/// Files written by an export
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub rounds: Vec<PathBuf>,
    pub players: Vec<PathBuf>,
    pub player_data: Vec<PathBuf>,
}

/// Write round pages, player pages and per-player scorecard data under
/// `site_dir`.
pub fn export_site(
    site_dir: &Path,
    outcomes: &[RoundOutcome],
    standings: &[PlayerSeasonRecord],
    player_data: &[PlayerData],
) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();

    let rounds_dir = site_dir.join(ROUNDS_DIR);
    ensure_dir(&rounds_dir)?;
    for outcome in outcomes {
        let path = rounds_dir.join(format!("{}.md", outcome.name));
        write_atomic(&path, front_matter(outcome)?.as_bytes())?;
        debug!("Wrote {}", path.display());
        summary.rounds.push(path);
    }

    let players_dir = site_dir.join(PLAYERS_DIR);
    ensure_dir(&players_dir)?;
    for record in standings {
        let path = players_dir.join(format!("{}.md", player_file_stem(&record.name)));
        write_atomic(&path, front_matter(record)?.as_bytes())?;
        debug!("Wrote {}", path.display());
        summary.players.push(path);
    }

    let data_dir = site_dir.join(PLAYER_DATA_DIR);
    ensure_dir(&data_dir)?;
    for data in player_data {
        let path = data_dir.join(format!("{}.json", data.name));
        let json = serde_json::to_vec_pretty(data).context("Failed to serialize player data")?;
        write_atomic(&path, &json)?;
        summary.player_data.push(path);
    }

    info!(
        "Exported {} rounds, {} players to {}",
        summary.rounds.len(),
        summary.players.len(),
        site_dir.display()
    );
    Ok(summary)
}
