//! Entry document codec
//!
//! Translates between the in-memory entry list and the persisted document: a
//! JSON array with one object per entry.
//!
//! ```text
//! [
//!   { "id": "<uuid>", "date": "<RFC 3339>",
//!     "questions": ["..."], "answers": ["..."], "mood": 1..5 }
//! ]
//! ```
//!
//! There is no version field. Older documents are read by tolerating absent
//! optional fields: a missing or unrecognized `mood` becomes neutral. The
//! required fields (`id`, `date`, `questions`, `answers`) fail the whole
//! document when missing or malformed. Any field added in the future must
//! follow the same default-on-absence rule.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::NightlyError;
use crate::models::{Entry, EntryId, Mood};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z, the reference
/// date used by documents written by the iOS app
const REFERENCE_DATE_OFFSET: f64 = 978_307_200.0;

/// Encode entries as a JSON array
///
/// Field order is id, date, questions, answers, mood. Identical input
/// always produces identical bytes.
pub fn encode(entries: &[Entry]) -> Result<Vec<u8>, NightlyError> {
    serde_json::to_vec_pretty(entries)
        .map_err(|e| NightlyError::Json(format!("Failed to encode entries: {}", e)))
}

/// Decode a JSON array of entries
///
/// # Errors
///
/// Returns [`NightlyError::CorruptDocument`] if the bytes aren't JSON, the
/// top level isn't an array of objects, or any entry lacks a valid `id`,
/// `date`, `questions` or `answers`. No entries are recovered from a
/// document that fails.
pub fn decode(bytes: &[u8]) -> Result<Vec<Entry>, NightlyError> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| NightlyError::CorruptDocument(format!("not valid JSON: {}", e)))?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(NightlyError::CorruptDocument(format!(
                "expected an array of entries, found {}",
                kind_of(&other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decode_entry(item).map_err(|reason| {
                NightlyError::CorruptDocument(format!("entry {}: {}", index, reason))
            })
        })
        .collect()
}

fn decode_entry(item: &Value) -> Result<Entry, String> {
    let object = item
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", kind_of(item)))?;

    let id = decode_id(required(object, "id")?)?;
    let date = decode_date(required(object, "date")?)?;
    let questions = decode_strings(required(object, "questions")?, "questions")?;
    let answers = decode_strings(required(object, "answers")?, "answers")?;
    let mood = decode_mood(object.get("mood"));

    Ok(Entry::from_parts(id, date, questions, answers, mood))
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, String> {
    match object.get(field) {
        Some(Value::Null) | None => Err(format!("missing field `{}`", field)),
        Some(value) => Ok(value),
    }
}

fn decode_id(value: &Value) -> Result<EntryId, String> {
    let text = value
        .as_str()
        .ok_or_else(|| format!("`id` must be a string, found {}", kind_of(value)))?;
    EntryId::parse(text).map_err(|e| format!("`id` is not a UUID: {}", e))
}

/// Accepts an RFC 3339 string or, for legacy documents, a number of seconds
/// since 2001-01-01T00:00:00Z
fn decode_date(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| format!("`date` is not an ISO-8601 timestamp: {}", e)),
        Value::Number(number) => {
            let seconds = number
                .as_f64()
                .filter(|s| s.is_finite())
                .ok_or_else(|| "`date` is not a finite number".to_string())?;
            let unix = seconds + REFERENCE_DATE_OFFSET;
            let whole = unix.floor();
            let nanos = ((unix - whole) * 1e9).round().min(999_999_999.0) as u32;
            DateTime::from_timestamp(whole as i64, nanos)
                .ok_or_else(|| "`date` is out of range".to_string())
        }
        other => Err(format!(
            "`date` must be a string or number, found {}",
            kind_of(other)
        )),
    }
}

fn decode_strings(value: &Value, field: &str) -> Result<Vec<String>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("`{}` must be an array, found {}", field, kind_of(value)))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                format!("`{}` must contain strings, found {}", field, kind_of(item))
            })
        })
        .collect()
}

/// Missing, null or out-of-scale moods fall back to neutral
fn decode_mood(value: Option<&Value>) -> Mood {
    value
        .and_then(Value::as_u64)
        .and_then(Mood::from_value)
        .unwrap_or_default()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
