//! Read-only overview commands: the current week, the question set, and
//! configuration.

use chrono::{Local, Utc};

use crate::analytics::{this_week_summary, today_entry, yesterday_entry};
use crate::config::{paths::NightlyPaths, settings::Settings};
use crate::display::format_week_overview;
use crate::error::NightlyResult;
use crate::storage::Storage;

/// Print today's and yesterday's moods and the weekly summary
pub fn handle_week_command(storage: &Storage) -> NightlyResult<()> {
    let entries = storage.entries.entries()?;
    let now = Utc::now();

    print!(
        "{}",
        format_week_overview(
            today_entry(&entries, now, &Local),
            yesterday_entry(&entries, now, &Local),
            this_week_summary(&entries, now, &Local),
        )
    );

    Ok(())
}

/// Print the prompts new entries will use
pub fn handle_questions_command(settings: &Settings) -> NightlyResult<()> {
    println!("Nightly questions");
    println!("=================");
    for (i, question) in settings.questions.iter().enumerate() {
        println!("{:>2}. {}", i + 1, question);
    }
    Ok(())
}

/// Print resolved paths and settings
pub fn handle_config_command(
    storage: &Storage,
    paths: &NightlyPaths,
    settings: &Settings,
) -> NightlyResult<()> {
    println!("Nightly Configuration");
    println!("=====================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Entries file:   {}", paths.entries_file().display());
    println!();
    println!("Settings:");
    println!("  Entries:        {}", storage.entries.len()?);
    println!("  Questions:      {}", settings.questions.len());
    println!("  Date format:    {}", settings.date_format);
    match settings.sobriety_start {
        Some(start) => println!(
            "  Sobriety date:  {}",
            start.with_timezone(&Local).format("%Y-%m-%d")
        ),
        None => println!("  Sobriety date:  not set"),
    }
    Ok(())
}
