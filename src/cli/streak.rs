//! Sobriety streak CLI commands

use chrono::{Local, Utc};
use clap::Subcommand;
use log::info;

use super::parse_date_arg;
use crate::analytics::StreakStats;
use crate::config::{paths::NightlyPaths, settings::Settings};
use crate::display::format_streak;
use crate::error::NightlyResult;

/// Streak subcommands
#[derive(Subcommand)]
pub enum StreakCommands {
    /// Show the counters
    Show {
        /// Also print a shareable progress message
        #[arg(long)]
        share: bool,
    },
    /// Set the sobriety date
    Set {
        /// Date (YYYY-MM-DD, 'YYYY-MM-DD HH:MM' or RFC 3339)
        date: String,
    },
    /// Forget the sobriety date
    Clear,
}

/// Handle a streak command
pub fn handle_streak_command(
    paths: &NightlyPaths,
    settings: &mut Settings,
    cmd: StreakCommands,
) -> NightlyResult<()> {
    match cmd {
        StreakCommands::Show { share } => {
            let stats = StreakStats::compute(settings.sobriety_start, Utc::now(), &Local);
            print!("{}", format_streak(stats.as_ref()));

            if share {
                if let Some(stats) = stats {
                    println!();
                    println!("{}", stats.share_message());
                }
            }
        }

        StreakCommands::Set { date } => {
            let start = parse_date_arg(&date)?;
            settings.sobriety_start = Some(start);
            settings.save(paths)?;
            info!("Sobriety date set to {}", start);

            println!(
                "Sobriety date set to {}",
                start.with_timezone(&Local).format("%B %-d, %Y")
            );
            if start > Utc::now() {
                println!("That date is in the future; counters stay at zero until it arrives.");
            }
        }

        StreakCommands::Clear => {
            if settings.sobriety_start.take().is_none() {
                println!("No sobriety date was set.");
                return Ok(());
            }
            settings.save(paths)?;
            println!("Sobriety date cleared.");
        }
    }

    Ok(())
}
