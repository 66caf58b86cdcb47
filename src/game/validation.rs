//! Word validation
//!
//! An assembled word is checked against three rules:
//! - No gaps between placed letters (and at least one letter placed)
//! - Minimum length (2 letters)
//! - Dictionary presence
//!
//! The first two are structural and answered immediately. The dictionary
//! check may do I/O, so callers can run it separately and fold the answer
//! in with [`ValidationReport::with_dictionary`].

use super::dictionary::Dictionary;
use super::word::PLACEHOLDER;

/// Minimum number of letters in a valid word
pub const MIN_WORD_LENGTH: usize = 2;

/// True if nothing is placed, or a placeholder run sits between two letters.
pub fn has_gaps(word: &str) -> bool {
    let trimmed = word.trim_matches(PLACEHOLDER);
    trimmed.is_empty() || trimmed.contains(PLACEHOLDER)
}

/// True if the word holds at least [`MIN_WORD_LENGTH`] letters.
pub fn has_minimum_length(word: &str) -> bool {
    word.chars().filter(|c| c.is_ascii_alphabetic()).count() >= MIN_WORD_LENGTH
}

/// The word without placeholders, uppercased.
pub fn sanitize(word: &str) -> String {
    word.chars()
        .filter(|&c| c != PLACEHOLDER)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Dictionary check. A backend failure counts as "not found".
pub fn is_in_dictionary(word: &str, dictionary: &dyn Dictionary) -> bool {
    let word = sanitize(word);
    if word.is_empty() {
        return false;
    }
    match dictionary.lookup(&word) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("dictionary lookup for {} failed: {}", word, e);
            false
        }
    }
}

/// Outcome of the three rules for one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub no_gaps: bool,
    pub min_length: bool,
    pub in_dictionary: bool,
}

impl ValidationReport {
    /// Every rule failed; the state shown before anything is checked.
    pub fn failed() -> Self {
        Self::default()
    }

    /// Structural rules only; the dictionary indicator stays false.
    pub fn structural(word: &str) -> Self {
        Self {
            no_gaps: !has_gaps(word),
            min_length: has_minimum_length(word),
            in_dictionary: false,
        }
    }

    /// Fill in the dictionary result.
    pub fn with_dictionary(self, in_dictionary: bool) -> Self {
        Self {
            in_dictionary,
            ..self
        }
    }

    /// All three rules pass; required before the word scores.
    pub fn overall_valid(&self) -> bool {
        self.no_gaps && self.min_length && self.in_dictionary
    }

    /// Rule labels with their pass/fail state, in display order.
    pub fn rules(&self) -> [(&'static str, bool); 3] {
        [
            ("No gaps", self.no_gaps),
            ("At least 2 letters", self.min_length),
            ("Found in dictionary", self.in_dictionary),
        ]
    }
}

/// Run all three rules synchronously.
pub fn validate(word: &str, dictionary: &dyn Dictionary) -> ValidationReport {
    ValidationReport::structural(word).with_dictionary(is_in_dictionary(word, dictionary))
}
