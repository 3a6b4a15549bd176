use clap::{Parser, Subcommand};
use golf_league_stats::error::ScoringError;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NO_ROUNDS: i32 = 1;
const EXIT_MALFORMED: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show season standings (default if no subcommand)
    Standings {
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// List rounds in date order with their points or skip reason
    Rounds,
    /// Write round pages, player pages and scorecard data into the site
    Export,
    /// Open a round's results page in browser by its index number
    Open {
        /// Index number of the round to open (1-based, as shown by `rounds`)
        index: usize,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "golf-league-stats")]
#[command(about = "Golf league standings from round results", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/golf-league-stats/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory of round result files (overrides config)
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    /// Site directory for export and player images (overrides config)
    #[arg(long, global = true)]
    site_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Malformed input surfaces as a `ScoringError` somewhere in the chain
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ScoringError>().is_some() {
        EXIT_MALFORMED
    } else {
        EXIT_NO_ROUNDS
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Standings { tsv: false });
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = golf_league_stats::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let mut config = match golf_league_stats::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(dir) = cli.results_dir {
        config.results_dir = dir;
    }
    if let Some(dir) = cli.site_dir {
        config.site_dir = dir;
    }

    // Validate points config at startup
    if let Err(errors) = golf_league_stats::scoring::validate_points(&config.points) {
        eprintln!("Points config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let season_year = config.season_year.unwrap_or_else(|| {
        golf_league_stats::results::default_season_year(config.points.season_start)
    });
    debug!(
        "Reading rounds from {} (season {})",
        config.results_dir.display(),
        season_year
    );

    let rounds = match golf_league_stats::results::load_rounds(&config.results_dir, season_year) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to load rounds: {:#}", e);
            std::process::exit(exit_code_for(&e));
        }
    };

    if rounds.is_empty() {
        eprintln!(
            "No round files found in {}",
            config.results_dir.display()
        );
        std::process::exit(EXIT_NO_ROUNDS);
    }

    let outcomes = match golf_league_stats::scoring::score_season(
        &rounds,
        &config.points,
        &config.unofficial_rounds,
    ) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Scoring failed: {}", e);
            std::process::exit(EXIT_MALFORMED);
        }
    };

    let players = golf_league_stats::results::all_players(&rounds);
    let site_dir = config.site_dir.clone();
    let standings = golf_league_stats::season::build_standings(
        &players,
        &outcomes,
        &config.points,
        |name| golf_league_stats::output::player_image(&site_dir, name),
    );

    let use_colors = golf_league_stats::output::should_use_colors();

    // Route based on subcommand
    match command {
        Commands::Standings { tsv } => {
            let output = if tsv {
                golf_league_stats::output::format_standings_tsv(&standings)
            } else {
                golf_league_stats::output::format_standings_table(&standings, use_colors)
            };
            println!("{}", output);
        }
        Commands::Rounds => {
            println!(
                "{}",
                golf_league_stats::output::format_round_list(&outcomes, use_colors)
            );
        }
        Commands::Export => {
            let player_data =
                golf_league_stats::output::build_player_data(&players, &rounds, &outcomes);
            match golf_league_stats::output::export_site(
                &config.site_dir,
                &outcomes,
                &standings,
                &player_data,
            ) {
                Ok(summary) => println!(
                    "Exported {} rounds, {} players and {} scorecard files to {}",
                    summary.rounds.len(),
                    summary.players.len(),
                    summary.player_data.len(),
                    config.site_dir.display()
                ),
                Err(e) => {
                    eprintln!("Export failed: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Open { index } => {
            // Validate index bounds (1-based)
            if index < 1 || index > outcomes.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    outcomes.len()
                );
                std::process::exit(EXIT_CONFIG);
            }

            let outcome = &outcomes[index - 1];
            match golf_league_stats::browser::open_round_page(outcome) {
                Ok(url) => println!("Opening {} in browser: {}", outcome.name, url),
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Init => unreachable!("init handled before loading rounds"),
    }

    debug!("Finished in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
