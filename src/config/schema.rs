use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::scoring::PointsConfig;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory of per-round JSON files written by the sync tool
    pub results_dir: PathBuf,

    /// Root of the static site that receives the export
    pub site_dir: PathBuf,

    /// Year for rounds whose name carries only a month and day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_year: Option<i32>,

    /// Round names that never count, whatever their scores
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub unofficial_rounds: BTreeSet<String>,

    pub points: PointsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("./results"),
            site_dir: PathBuf::from("."),
            season_year: None,
            unofficial_rounds: BTreeSet::new(),
            points: PointsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
results_dir: /data/results
site_dir: /srv/site
season_year: 2020
unofficial_rounds:
  - "Round 12 (Sat, July 4)"
points:
  fw: 1
  s: 1
  ov: 2
  max_rounds_per_month: 4
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("/data/results"));
        assert_eq!(config.site_dir, PathBuf::from("/srv/site"));
        assert_eq!(config.season_year, Some(2020));
        assert!(config.unofficial_rounds.contains("Round 12 (Sat, July 4)"));
        assert_eq!(config.points.overall, 2.0);
        assert_eq!(config.points.max_rounds_per_month, 4);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        assert!(serde_saphyr::from_str::<Config>("queries: []\n").is_err());
    }
}
