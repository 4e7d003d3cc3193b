//! Overview formatting: the week at a glance, sobriety counters,
//! and the mood sparkline.

use crate::analytics::{Milestone, StreakStats, WeeklyMoodSummary};
use crate::models::Entry;

const SPARK_LEVELS: [char; 5] = ['▁', '▂', '▄', '▆', '█'];

/// Format today's and yesterday's moods plus the weekly headline
pub fn format_week_overview(
    today: Option<&Entry>,
    yesterday: Option<&Entry>,
    summary: Option<WeeklyMoodSummary>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:10} {}\n", "Today:", mood_cell(today)));
    output.push_str(&format!("{:10} {}\n", "Yesterday:", mood_cell(yesterday)));
    output.push_str(&format!(
        "{:10} {}\n",
        "This week:",
        summary
            .map(|s| s.to_string())
            .unwrap_or_else(|| "No entries yet".to_string())
    ));

    output
}

fn mood_cell(entry: Option<&Entry>) -> String {
    match entry {
        Some(entry) => format!("{} {}", entry.mood().glyph(), entry.mood().label()),
        None => "-".to_string(),
    }
}

/// Format the sobriety counters
pub fn format_streak(stats: Option<&StreakStats>) -> String {
    let stats = match stats {
        Some(stats) => stats,
        None => {
            return "No sobriety date set. Use 'nightly streak set <DATE>' to start tracking.\n"
                .to_string()
        }
    };

    let mut output = String::new();
    output.push_str(&format!(
        "Sobriety date: {}\n",
        stats.start_day.format("%B %-d, %Y")
    ));

    if !stats.valid {
        output.push_str("The sobriety date is in the future; counters start once it arrives.\n");
        return output;
    }

    output.push_str(&format!("{:8} {}\n", "Days:", stats.days));
    output.push_str(&format!("{:8} {}\n", "Hours:", stats.hours));
    output.push_str(&format!(
        "{:8} {} ({:.1})\n",
        "Months:", stats.months, stats.approx_months
    ));
    output.push_str(&format!("{:8} {}\n", "Years:", stats.years));

    if let Some(milestone) = stats.milestone {
        output.push_str(&format!("Milestone: {}\n", format_milestone(milestone)));
    }

    output
}

fn format_milestone(milestone: Milestone) -> String {
    format!("[{}]", milestone.label())
}

/// Render mood values 1..=5 as a one-line sparkline
pub fn format_sparkline(series: &[u8]) -> String {
    series
        .iter()
        .map(|&value| {
            let index = value.clamp(1, 5) as usize - 1;
            SPARK_LEVELS[index]
        })
        .collect()
}
