// Derived words attached to a root

use serde::{Deserialize, Serialize};

/// A word derived from a root, with the number of times it was produced
/// or confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivative {
    pub word: String,
    pub frequency: u32,
}

impl Derivative {
    /// A freshly recorded derivative (frequency 1).
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            frequency: 1,
        }
    }
}

/// Formats as `<word> (f=<frequency>)`.
impl std::fmt::Display for Derivative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (f={})", self.word, self.frequency)
    }
}

/// Record `word` in an insertion-ordered derivative list.
///
/// Bumps the frequency of an existing entry or appends a new one, so a list
/// never holds two entries with the same word.
pub fn record_derivative(derivatives: &mut Vec<Derivative>, word: &str) {
    match derivatives.iter_mut().find(|d| d.word == word) {
        Some(existing) => existing.frequency += 1,
        None => derivatives.push(Derivative::new(word)),
    }
}
