//! Entry CLI commands
//!
//! Writing, browsing and editing journal entries.

use chrono::{Local, Utc};
use clap::Subcommand;
use log::debug;

use super::{find_entry, parse_date_arg, report_write_error};
use crate::analytics::{mood_series, search};
use crate::config::settings::Settings;
use crate::display::{format_entry_details, format_entry_list, format_sparkline};
use crate::error::{NightlyError, NightlyResult};
use crate::models::{Entry, EntryId, Mood};
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Write tonight's entry
    Add {
        /// Answers in question order; use "" to skip a question
        #[arg(short, long = "answer", value_name = "TEXT")]
        answers: Vec<String>,
        /// Mood (1-5, or very-bad, bad, neutral, good, very-good)
        #[arg(short, long, default_value = "neutral")]
        mood: String,
        /// Backdate the entry (YYYY-MM-DD, 'YYYY-MM-DD HH:MM' or RFC 3339)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List past entries, newest first
    List {
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show the mood trend as a sparkline
        #[arg(long)]
        chart: bool,
    },
    /// Show every question and answer of an entry
    Show {
        /// Entry ID (short form, full UUID or UUID prefix)
        entry: String,
    },
    /// Find entries by date text or answer text
    Search {
        /// Case-insensitive text to look for
        query: String,
    },
    /// Change answers of an entry
    Edit {
        /// Entry ID
        entry: String,
        /// Replace one answer, e.g. --set "3=Called my sponsor"
        #[arg(short, long = "set", value_name = "N=TEXT")]
        sets: Vec<String>,
        /// Re-snapshot the current question set, keeping answers by position
        #[arg(long)]
        refresh_questions: bool,
    },
    /// Change the mood of an entry
    Mood {
        /// Entry ID
        entry: String,
        /// New mood
        mood: String,
    },
    /// Delete entries
    Delete {
        /// Entry IDs
        entries: Vec<String>,
        /// Delete by position in the list (0 is the newest)
        #[arg(short, long = "index", value_name = "N")]
        indexes: Vec<usize>,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> NightlyResult<()> {
    match cmd {
        EntryCommands::Add {
            answers,
            mood,
            date,
        } => {
            let mood = parse_mood(&mood)?;
            let questions = settings.questions.clone();

            if answers.len() > questions.len() {
                return Err(NightlyError::Validation(format!(
                    "Got {} answers but there are only {} questions",
                    answers.len(),
                    questions.len()
                )));
            }

            let answers: Vec<String> = answers.iter().map(|a| a.trim().to_string()).collect();
            let date = match date {
                Some(text) => parse_date_arg(&text)?,
                None => Utc::now(),
            };
            let entry = Entry::from_parts(EntryId::new(), date, questions, answers, mood);

            if !entry.has_content() {
                return Err(NightlyError::Validation(
                    "Nothing to save: every answer is blank".into(),
                ));
            }

            let id = storage.entries.insert(entry)?;
            report_write_error(storage);

            println!("Saved entry: {}", id);
            println!("  Mood: {} {}", mood.glyph(), mood.label());
        }

        EntryCommands::List { limit, chart } => {
            let entries = storage.entries.entries()?;
            let shown: Vec<&Entry> = entries.iter().take(limit.unwrap_or(usize::MAX)).collect();

            print!("{}", format_entry_list(&shown, &settings.date_format, &Local));

            if chart && !entries.is_empty() {
                println!();
                println!("Mood trend: {}", format_sparkline(&mood_series(&entries)));
            }
        }

        EntryCommands::Show { entry } => {
            let found = find_entry(storage, &entry)?;
            print!("{}", format_entry_details(&found, &Local));
        }

        EntryCommands::Search { query } => {
            let entries = storage.entries.entries()?;
            let matches = search(&entries, &query, &Local);
            debug!("Search for '{}' matched {} entries", query, matches.len());
            print!("{}", format_entry_list(&matches, &settings.date_format, &Local));
        }

        EntryCommands::Edit {
            entry,
            sets,
            refresh_questions,
        } => {
            let found = find_entry(storage, &entry)?;

            if sets.is_empty() && !refresh_questions {
                println!("No changes specified. Use --set N=TEXT or --refresh-questions.");
                return Ok(());
            }

            let mut answers = found.answers().to_vec();
            let question_count = if refresh_questions {
                settings.questions.len()
            } else {
                found.questions().len()
            };
            answers.resize(answers.len().max(question_count), String::new());

            for set in &sets {
                let (index, text) = parse_answer_set(set, question_count)?;
                answers[index] = text;
            }

            if answers.iter().all(|a| a.trim().is_empty()) {
                return Err(NightlyError::Validation(
                    "Refusing to blank every answer; use 'nightly delete' instead".into(),
                ));
            }

            if refresh_questions {
                storage.entries.update(
                    found.id(),
                    settings.questions.clone(),
                    answers,
                    found.mood(),
                )?;
            } else {
                storage.entries.update_answers(found.id(), answers)?;
            }
            report_write_error(storage);

            println!("Updated entry: {}", found.id());
        }

        EntryCommands::Mood { entry, mood } => {
            let found = find_entry(storage, &entry)?;
            let mood = parse_mood(&mood)?;

            storage.entries.update_mood(found.id(), mood)?;
            report_write_error(storage);

            println!("Updated mood of {}: {} {}", found.id(), mood.glyph(), mood.label());
        }

        EntryCommands::Delete { entries, indexes } => {
            if entries.is_empty() && indexes.is_empty() {
                println!("Nothing to delete. Give entry IDs or --index N.");
                return Ok(());
            }

            let ids = entries
                .iter()
                .map(|text| find_entry(storage, text).map(|e| e.id()))
                .collect::<NightlyResult<Vec<_>>>()?;

            let mut removed = storage.entries.delete_at(&indexes)?;
            removed += storage.entries.delete(&ids)?;
            report_write_error(storage);

            println!("Deleted {} entr{}", removed, if removed == 1 { "y" } else { "ies" });
        }
    }

    Ok(())
}

fn parse_mood(text: &str) -> NightlyResult<Mood> {
    text.parse::<Mood>()
        .map_err(|e| NightlyError::Validation(e.to_string()))
}

/// Parse `N=TEXT` into a zero-based answer index and trimmed text
fn parse_answer_set(set: &str, question_count: usize) -> NightlyResult<(usize, String)> {
    let invalid = || {
        NightlyError::Validation(format!(
            "Invalid --set '{}'. Use N=TEXT with N between 1 and {}",
            set, question_count
        ))
    };

    let (number, text) = set.split_once('=').ok_or_else(invalid)?;
    let number: usize = number.trim().parse().map_err(|_| invalid())?;

    if number == 0 || number > question_count {
        return Err(invalid());
    }

    Ok((number - 1, text.trim().to_string()))
}
