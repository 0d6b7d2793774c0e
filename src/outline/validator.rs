//! Textual plausibility rules for heading candidates.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::OutlineOptions;

/// Short function words whose density marks ordinary prose.
pub const STOPWORDS: [&str; 13] = [
    "a", "an", "the", "is", "in", "on", "for", "of", "to", "and", "with", "that", "it",
];

/// Why a candidate line was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing left after trimming
    Empty,
    /// Same text as the title, ignoring case
    MatchesTitle,
    /// Fewer words than the minimum
    TooFewWords,
    /// More words than the maximum
    TooManyWords,
    /// Starts with an enumeration or bullet marker
    ListMarker,
    /// Ends with `.`, `!` or `?`
    TerminalPunctuation,
    /// Too many stopwords
    StopwordDense,
    /// Upper-case and too short
    ShortAllCaps,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Empty => "empty",
            Rejection::MatchesTitle => "matches title",
            Rejection::TooFewWords => "too few words",
            Rejection::TooManyWords => "too many words",
            Rejection::ListMarker => "list marker",
            Rejection::TerminalPunctuation => "terminal punctuation",
            Rejection::StopwordDense => "stopword dense",
            Rejection::ShortAllCaps => "short all-caps",
        };
        f.write_str(reason)
    }
}

/// Decides whether a normalized line reads like a heading label.
#[derive(Debug, Clone)]
pub struct HeadingValidator {
    min_words: usize,
    max_words: usize,
    max_stopword_ratio: f64,
    short_caps_max_words: usize,
    list_marker: Regex,
}

impl HeadingValidator {
    /// Create a validator with the thresholds from `options`.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            min_words: options.min_words,
            max_words: options.max_words,
            max_stopword_ratio: options.max_stopword_ratio,
            short_caps_max_words: options.short_caps_max_words,
            list_marker: Regex::new(r"^(?:\d{1,2}[.)]|[a-zA-Z][.)]|[•●○◦▪‣]|\*|-)\s")
                .expect("list marker pattern is valid"),
        }
    }

    /// Check a candidate against every rule.
    pub fn is_valid(&self, text: &str, title: &str) -> bool {
        self.rejection(text, title).is_none()
    }

    /// The first rule the candidate breaks, if any.
    pub fn rejection(&self, text: &str, title: &str) -> Option<Rejection> {
        let text = text.trim();
        if text.is_empty() {
            return Some(Rejection::Empty);
        }
        if text.to_lowercase() == title.trim().to_lowercase() {
            return Some(Rejection::MatchesTitle);
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        if word_count < self.min_words {
            return Some(Rejection::TooFewWords);
        }
        if word_count > self.max_words {
            return Some(Rejection::TooManyWords);
        }

        if self.list_marker.is_match(text) {
            return Some(Rejection::ListMarker);
        }
        if text.ends_with(['.', '!', '?']) {
            return Some(Rejection::TerminalPunctuation);
        }

        let stopword_count = words
            .iter()
            .filter(|w| STOPWORDS.contains(&w.to_lowercase().as_str()))
            .count();
        if stopword_count as f64 / word_count as f64 > self.max_stopword_ratio {
            return Some(Rejection::StopwordDense);
        }

        if is_all_caps(text) && word_count <= self.short_caps_max_words {
            return Some(Rejection::ShortAllCaps);
        }

        None
    }
}

impl Default for HeadingValidator {
    fn default() -> Self {
        Self::new(&OutlineOptions::default())
    }
}

/// Check a candidate with the default thresholds.
pub fn is_valid_heading(text: &str, title: &str) -> bool {
    static DEFAULT: OnceLock<HeadingValidator> = OnceLock::new();
    DEFAULT
        .get_or_init(HeadingValidator::default)
        .is_valid(text, title)
}

/// At least one cased letter and no lower-case letters.
fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}
