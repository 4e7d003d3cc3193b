//! The nightly inventory prompts
//!
//! New entries snapshot whatever prompt set is configured; this is the set
//! used when the settings do not override it.

/// Default nightly inventory questions, in the order they are asked
pub const NIGHTLY_QUESTIONS: [&str; 13] = [
    "Were we resentful?",
    "Were we selfish?",
    "Were we dishonest?",
    "Were we delusional?",
    "Were we afraid?",
    "Do we owe an apology?",
    "Have we kept something to ourselves which should be discussed with another person at once?",
    "Were we kind and loving toward all?",
    "What could we have done better?",
    "Were we thinking of ourselves most of the time?",
    "Or were we thinking of what we could do for others, of what we could pack into the stream of life?",
    "What are we grateful for today?",
    "What are our corrective measures?",
];

/// Owned copy of the default prompt set
pub fn default_questions() -> Vec<String> {
    NIGHTLY_QUESTIONS.iter().map(|q| q.to_string()).collect()
}
