use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use nightly::cli::{
    handle_config_command, handle_entry_command, handle_questions_command, handle_streak_command,
    handle_week_command, StreakCommands,
};
use nightly::config::{paths::NightlyPaths, settings::Settings};
use nightly::storage::{LoadOutcome, Storage};

#[derive(Parser)]
#[command(
    name = "nightly",
    version,
    about = "Nightly inventory journal",
    long_about = "Nightly is a private evening journal. Answer the nightly inventory \
                  questions, tag the day with a mood, and follow weekly mood summaries \
                  and a sobriety day counter. Everything stays on this machine."
)]
struct Cli {
    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "NIGHTLY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Entry(nightly::cli::EntryCommands),

    /// Today, yesterday and this week at a glance
    Week,

    /// Sobriety streak commands
    #[command(subcommand)]
    Streak(StreakCommands),

    /// List the questions new entries will ask
    Questions,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let paths = match cli.data_dir {
        Some(dir) => NightlyPaths::with_base_dir(dir),
        None => NightlyPaths::new()?,
    };
    let (mut settings, settings_error) = Settings::load_or_default(&paths);
    if let Some(e) = &settings_error {
        warn!("Falling back to default settings: {}", e);
        eprintln!("Warning: {}; using default settings.", e);
    }

    // One store for the whole process, passed to every handler
    let storage = Storage::new(paths.clone())?;
    match storage.load_all()? {
        LoadOutcome::FirstRun => info!("No journal yet at {}", storage.entries.path().display()),
        LoadOutcome::Loaded { count } => info!("Loaded {} entries", count),
        LoadOutcome::Recovered { reason, moved_to } => {
            warn!("Journal could not be read: {}", reason);
            eprintln!("Warning: the journal file could not be read and was set aside.");
            if let Some(moved_to) = moved_to {
                eprintln!("  Moved to: {}", moved_to.display());
            }
        }
    }

    match cli.command {
        Some(Commands::Entry(cmd)) => {
            handle_entry_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Week) => {
            handle_week_command(&storage)?;
        }
        Some(Commands::Streak(cmd)) => {
            // Saving defaults would replace the settings file that failed to load
            if let (Some(e), StreakCommands::Set { .. } | StreakCommands::Clear) =
                (settings_error, &cmd)
            {
                return Err(e.into());
            }
            handle_streak_command(&paths, &mut settings, cmd)?;
        }
        Some(Commands::Questions) => {
            handle_questions_command(&settings)?;
        }
        Some(Commands::Config) => {
            handle_config_command(&storage, &paths, &settings)?;
        }
        None => {
            println!("Nightly - nightly inventory journal");
            println!();
            println!("Run 'nightly --help' for usage information.");
            println!("Run 'nightly questions' to see tonight's questions.");
        }
    }

    Ok(())
}
