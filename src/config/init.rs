use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{get_config_path, Config};
use crate::scoring::{validate_points, PointsConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Re-prompt until the answer parses and passes `check`.
fn prompt_parsed<T, F>(message: &str, default: &str, check: F) -> Result<T>
where
    T: FromStr,
    F: Fn(&T) -> Result<(), String>,
{
    loop {
        let input = prompt_with_default(message, default)?;
        match input.parse::<T>() {
            Ok(value) => match check(&value) {
                Ok(()) => return Ok(value),
                Err(e) => println!("  Invalid: {}. Try again.", e),
            },
            Err(_) => println!("  Invalid: '{}' could not be read. Try again.", input),
        }
    }
}

fn non_negative(value: &f64) -> Result<(), String> {
    if value.is_finite() && *value >= 0.0 {
        Ok(())
    } else {
        Err("must be a non-negative number".to_string())
    }
}

/// Prompt for an optional date; "none" or empty leaves it unset.
fn prompt_date(message: &str) -> Result<Option<NaiveDate>> {
    loop {
        let input = prompt_with_default(message, "none")?;
        if input == "none" || input.is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) => return Ok(Some(date)),
            Err(e) => println!("  Invalid date (expected YYYY-MM-DD): {}. Try again.", e),
        }
    }
}

/// Read an optional round count; "none" or empty leaves it unset.
fn parse_round_count(input: &str) -> Result<Option<usize>, String> {
    let input = input.trim();
    if input.is_empty() || input == "none" {
        return Ok(None);
    }
    input
        .parse::<usize>()
        .map(Some)
        .map_err(|_| format!("'{}' is not a whole number", input))
}

fn prompt_round_count(message: &str) -> Result<Option<usize>> {
    loop {
        let input = prompt_with_default(message, "none")?;
        match parse_round_count(&input) {
            Ok(count) => return Ok(count),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

fn prompt_points(defaults: &PointsConfig) -> Result<PointsConfig> {
    println!("Points are awarded per round. Ties split the award between the tied winners.");
    let flight_win =
        prompt_parsed("Flight win points (fw)", &defaults.flight_win.to_string(), non_negative)?;
    let skin = prompt_parsed("Points per skin (s)", &defaults.skin.to_string(), non_negative)?;
    let front =
        prompt_parsed("Front nine team win points (fr)", &defaults.front.to_string(), non_negative)?;
    let back =
        prompt_parsed("Back nine team win points (ba)", &defaults.back.to_string(), non_negative)?;
    let overall =
        prompt_parsed("Overall team win points (ov)", &defaults.overall.to_string(), non_negative)?;

    println!();
    println!("Rounds outside the season window, or with too few players, are not scored.");
    let min_players = prompt_parsed("Minimum players per round", "0", |_: &usize| Ok(()))?;
    let season_start = prompt_date("Season start (YYYY-MM-DD, rounds must fall after it)")?;
    let season_end = prompt_date("Season end (YYYY-MM-DD, rounds must fall before it)")?;

    println!();
    println!("Season totals either keep each player's best N rounds per month,");
    println!("or count a fixed number of rounds and let later rounds replace the worst.");
    let max_rounds_per_month =
        prompt_parsed("Rounds counted per month (0 for replacement rounds)", "0", |_: &usize| Ok(()))?;

    let (season_round_count, replacement_scores) = if max_rounds_per_month == 0 {
        let count = prompt_round_count("Rounds in a counted season (none counts every round)")?;
        let replacements = if count.is_some() {
            prompt_parsed("Replacement rounds allowed", "0", |_: &usize| Ok(()))?
        } else {
            0
        };
        (count, replacements)
    } else {
        (None, 0)
    };

    Ok(PointsConfig {
        flight_win,
        skin,
        front,
        back,
        overall,
        best_ball: defaults.best_ball,
        min_players,
        season_start,
        season_end,
        max_rounds_per_month,
        season_round_count,
        replacement_scores,
    })
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Golf League Stats Configuration");
    println!("===============================");
    println!();

    let defaults = Config::default();
    let results_dir = prompt_with_default(
        "Directory of round result files",
        &defaults.results_dir.display().to_string(),
    )?;
    let site_dir = prompt_with_default(
        "Site directory for exported pages",
        &defaults.site_dir.display().to_string(),
    )?;

    println!();
    let points = loop {
        let points = if prompt_yes_no("Configure points? (n accepts defaults)", true)? {
            println!();
            prompt_points(&defaults.points)?
        } else {
            PointsConfig::default()
        };
        match validate_points(&points) {
            Ok(()) => break points,
            Err(errors) => {
                println!("Points config errors:");
                for error in errors {
                    println!("  - {}", error);
                }
                println!();
            }
        }
    };

    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        results_dir: PathBuf::from(results_dir),
        site_dir: PathBuf::from(site_dir),
        season_year: points.season_start.map(|d| chrono::Datelike::year(&d)),
        unofficial_rounds: Default::default(),
        points,
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Add round names to `unofficial_rounds` in the file to leave them out of scoring.");
    println!("Run `golf-league-stats` to see the standings.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert!(non_negative(&0.0).is_ok());
        assert!(non_negative(&2.5).is_ok());
        assert!(non_negative(&-1.0).is_err());
        assert!(non_negative(&f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_round_count() {
        assert_eq!(parse_round_count(""), Ok(None));
        assert_eq!(parse_round_count("none"), Ok(None));
        assert_eq!(parse_round_count(" 12 "), Ok(Some(12)));
        assert!(parse_round_count("twelve").is_err());
        assert!(parse_round_count("-3").is_err());
    }

    #[test]
    fn test_wizard_defaults_serialize_to_loadable_yaml() {
        let config = Config {
            season_year: Some(2020),
            ..Config::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
