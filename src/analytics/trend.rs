//! Mood trend data for history charts

use crate::models::Entry;

/// Numeric mood values ordered oldest to newest
pub fn mood_series(entries: &[Entry]) -> Vec<u8> {
    let mut dated: Vec<_> = entries.iter().map(|e| (e.date(), e.mood())).collect();
    dated.sort_by_key(|(date, _)| *date);
    dated.into_iter().map(|(_, mood)| mood.value()).collect()
}

/// Mean mood value, `None` for no entries
pub fn average_mood(entries: &[Entry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| e.mood().value() as u32).sum();
    Some(total as f64 / entries.len() as f64)
}
