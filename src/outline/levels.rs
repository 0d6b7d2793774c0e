//! Selection of heading font sizes and their levels.

use crate::model::HeadingLevel;

use super::FontProfile;

/// Font sizes that mark headings, most senior level first.
///
/// Levels follow the rank in the font profile, not numeric size: a smaller
/// size that occurs more often can outrank a larger one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingSizeSet {
    sizes: Vec<i32>,
}

impl HeadingSizeSet {
    /// Walk the profile in rank order and keep sizes strictly between `floor`
    /// and `ceiling` until `max_levels` are collected.
    ///
    /// A `None` ceiling means the document has no title, so only the floor applies.
    pub fn classify(
        profile: &FontProfile,
        ceiling: Option<f32>,
        floor: i32,
        max_levels: usize,
    ) -> Self {
        let max_levels = max_levels.min(HeadingLevel::ALL.len());
        let mut sizes: Vec<i32> = Vec::with_capacity(max_levels);

        for (size, _count) in profile.iter() {
            if sizes.len() >= max_levels {
                break;
            }
            let below_title = ceiling.map_or(true, |c| (size as f32) < c);
            if below_title && size > floor && !sizes.contains(&size) {
                sizes.push(size);
            }
        }

        Self { sizes }
    }

    /// Heading level for a truncated font size.
    pub fn level_of(&self, size: i32) -> Option<HeadingLevel> {
        self.sizes
            .iter()
            .position(|s| *s == size)
            .and_then(HeadingLevel::from_rank)
    }

    /// The selected sizes in level order.
    pub fn sizes(&self) -> &[i32] {
        &self.sizes
    }

    /// Number of heading levels supported.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Check if the document supports no headings.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
