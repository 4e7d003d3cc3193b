//! Journal entry model
//!
//! One nightly session: the prompts as they read at the time, the answers
//! paired with them by position, and a mood tag.
//!
//! Fields are private so that identity (`id`, `date`) and the question
//! snapshot can't be changed from outside the crate, and so the answers can
//! never drift out of step with the questions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::EntryId;
use super::mood::Mood;

/// A journal entry
///
/// Serializes in document field order: id, date, questions, answers, mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    id: EntryId,
    date: DateTime<Utc>,
    questions: Vec<String>,
    answers: Vec<String>,
    mood: Mood,
}

impl Entry {
    /// Create a new entry stamped with a fresh id and the current time
    pub fn new(questions: Vec<String>, answers: Vec<String>, mood: Mood) -> Self {
        Self::from_parts(EntryId::new(), Utc::now(), questions, answers, mood)
    }

    /// Rebuild an entry from stored parts, preserving its id and date
    pub fn from_parts(
        id: EntryId,
        date: DateTime<Utc>,
        questions: Vec<String>,
        answers: Vec<String>,
        mood: Mood,
    ) -> Self {
        let answers = pair_answers(answers, questions.len());
        Self {
            id,
            date,
            questions,
            answers,
            mood,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Question/answer pairs in prompt order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }

    /// Whether any answer has non-whitespace content
    pub fn has_content(&self) -> bool {
        self.answers.iter().any(|a| !a.trim().is_empty())
    }

    /// Replace the answers, keeping them paired with the existing questions
    pub(crate) fn set_answers(&mut self, answers: Vec<String>) {
        self.answers = pair_answers(answers, self.questions.len());
    }

    pub(crate) fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    /// Rewrite questions, answers and mood together; id and date stay
    pub(crate) fn replace_content(
        &mut self,
        questions: Vec<String>,
        answers: Vec<String>,
        mood: Mood,
    ) {
        self.answers = pair_answers(answers, questions.len());
        self.questions = questions;
        self.mood = mood;
    }
}

/// Pad with empty strings or truncate so there is exactly one answer per question
pub fn pair_answers(mut answers: Vec<String>, question_count: usize) -> Vec<String> {
    answers.resize(question_count, String::new());
    answers
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn questions() -> Vec<String> {
        vec!["Were we resentful?".into(), "What are we grateful for today?".into()]
    }

    #[test]
    fn test_new_entry() {
        let entry = Entry::new(questions(), vec!["No".into(), "Coffee".into()], Mood::Good);
        assert!(!entry.id().as_uuid().is_nil());
        assert_eq!(entry.questions().len(), 2);
        assert_eq!(entry.answers(), &["No".to_string(), "Coffee".to_string()]);
        assert_eq!(entry.mood(), Mood::Good);
    }

    #[test]
    fn test_short_answers_are_padded() {
        let entry = Entry::new(questions(), vec!["Only one".into()], Mood::Neutral);
        assert_eq!(entry.answers().len(), entry.questions().len());
        assert_eq!(entry.answers()[1], "");
    }

    #[test]
    fn test_long_answers_are_truncated() {
        let answers = vec!["a".into(), "b".into(), "c".into()];
        let entry = Entry::new(questions(), answers, Mood::Neutral);
        assert_eq!(entry.answers(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_set_answers_keeps_identity() {
        let date = Utc.with_ymd_and_hms(2025, 9, 17, 21, 0, 0).unwrap();
        let id = EntryId::new();
        let mut entry = Entry::from_parts(id, date, questions(), vec![], Mood::Bad);

        entry.set_answers(vec!["Yes".into()]);

        assert_eq!(entry.id(), id);
        assert_eq!(entry.date(), date);
        assert_eq!(entry.questions(), questions().as_slice());
        assert_eq!(entry.answers(), &["Yes".to_string(), String::new()]);
        assert_eq!(entry.mood(), Mood::Bad);
    }

    #[test]
    fn test_replace_content() {
        let mut entry = Entry::new(questions(), vec![], Mood::Neutral);
        let id = entry.id();

        entry.replace_content(vec!["New prompt?".into()], vec![], Mood::VeryGood);

        assert_eq!(entry.id(), id);
        assert_eq!(entry.questions(), &["New prompt?".to_string()]);
        assert_eq!(entry.answers(), &[String::new()]);
        assert_eq!(entry.mood(), Mood::VeryGood);
    }

    #[test]
    fn test_has_content() {
        let blank = Entry::new(questions(), vec!["  ".into(), "\n".into()], Mood::Neutral);
        assert!(!blank.has_content());

        let filled = Entry::new(questions(), vec!["".into(), "Sunlight".into()], Mood::Neutral);
        assert!(filled.has_content());
    }

    #[test]
    fn test_pairs() {
        let entry = Entry::new(questions(), vec!["No".into()], Mood::Neutral);
        let pairs: Vec<_> = entry.pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("Were we resentful?", "No"),
                ("What are we grateful for today?", "")
            ]
        );
    }
}
