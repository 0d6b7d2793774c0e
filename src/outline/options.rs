//! Tunable thresholds for outline extraction.

/// Options controlling title and heading detection.
///
/// The defaults are the values the heuristic was calibrated with. Each threshold is
/// exposed so accuracy can be tuned per corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Only spans strictly larger than this size enter the font profile
    pub profile_threshold: f32,

    /// Heading sizes must be strictly larger than this (truncated) size
    pub heading_size_floor: i32,

    /// Maximum number of heading levels (at most 3)
    pub max_levels: usize,

    /// Lines whose top is within this distance of the title line join the title
    pub title_tolerance: f32,

    /// Minimum words in a heading (inclusive)
    pub min_words: usize,

    /// Maximum words in a heading (inclusive)
    pub max_words: usize,

    /// Highest accepted ratio of stopwords to words
    pub max_stopword_ratio: f64,

    /// All-caps candidates with this many words or fewer are rejected
    pub short_caps_max_words: usize,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font profile threshold.
    pub fn with_profile_threshold(mut self, size: f32) -> Self {
        self.profile_threshold = size;
        self
    }

    /// Set the heading size floor.
    pub fn with_heading_size_floor(mut self, size: i32) -> Self {
        self.heading_size_floor = size;
        self
    }

    /// Set the number of heading levels (clamped to 1..=3).
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels.clamp(1, 3);
        self
    }

    /// Set the title line tolerance.
    pub fn with_title_tolerance(mut self, tolerance: f32) -> Self {
        self.title_tolerance = tolerance;
        self
    }

    /// Set the accepted heading word range.
    pub fn with_word_range(mut self, min: usize, max: usize) -> Self {
        self.min_words = min;
        self.max_words = max;
        self
    }

    /// Set the maximum stopword ratio.
    pub fn with_max_stopword_ratio(mut self, ratio: f64) -> Self {
        self.max_stopword_ratio = ratio;
        self
    }

    /// Set the word limit for rejecting all-caps candidates.
    pub fn with_short_caps_max_words(mut self, words: usize) -> Self {
        self.short_caps_max_words = words;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            profile_threshold: 10.0,
            heading_size_floor: 11,
            max_levels: 3,
            title_tolerance: 2.0,
            min_words: 2,
            max_words: 10,
            max_stopword_ratio: 0.4,
            short_caps_max_words: 2,
        }
    }
}
