//! Font size frequency profile.

use std::collections::HashMap;

use crate::model::DocumentLayout;

/// Frequency distribution of truncated font sizes, most frequent first.
///
/// Sizes with equal counts keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontProfile {
    entries: Vec<(i32, usize)>,
}

impl FontProfile {
    /// Profile every text span of the document strictly larger than `threshold`.
    pub fn build(layout: &DocumentLayout, threshold: f32) -> Self {
        Self::from_sizes(layout.spans().map(|s| s.size), threshold)
    }

    /// Profile a raw sequence of font sizes.
    pub fn from_sizes<I>(sizes: I, threshold: f32) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut index: HashMap<i32, usize> = HashMap::new();
        let mut entries: Vec<(i32, usize)> = Vec::new();

        for size in sizes.into_iter().filter(|s| *s > threshold) {
            let key = size.trunc() as i32;
            match index.get(&key) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(key, entries.len());
                    entries.push((key, 1));
                }
            }
        }

        // sort_by is stable: first-seen order survives among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    /// (size, count) pairs in rank order.
    pub fn entries(&self) -> &[(i32, usize)] {
        &self.entries
    }

    /// Iterate over (size, count) pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no span qualified.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Block, Line, PageLayout, Span};

    #[test]
    fn test_ranks_by_descending_count() {
        let sizes = [12.0, 18.0, 12.0, 24.0, 12.0, 18.0];
        let profile = FontProfile::from_sizes(sizes, 10.0);
        assert_eq!(profile.entries(), &[(12, 3), (18, 2), (24, 1)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let sizes = [16.0, 14.0, 20.0, 14.0, 20.0, 16.0];
        let profile = FontProfile::from_sizes(sizes, 10.0);
        assert_eq!(profile.entries(), &[(16, 2), (14, 2), (20, 2)]);
    }

    #[test]
    fn test_threshold_is_exclusive_and_sizes_truncate() {
        let sizes = [10.0, 9.5, 10.4, 11.9, 11.2];
        let profile = FontProfile::from_sizes(sizes, 10.0);
        assert_eq!(profile.entries(), &[(11, 2), (10, 1)]);
    }

    #[test]
    fn test_empty_profile() {
        let profile = FontProfile::build(&DocumentLayout::new(), 10.0);
        assert!(profile.is_empty());
        assert_eq!(profile.iter().next(), None);
    }

    #[test]
    fn test_build_ignores_image_blocks() {
        let mut page = PageLayout::letter(1);
        page.add_block(Block::image(BBox::new(0.0, 0.0, 10.0, 10.0)));
        page.add_block(Block::text(vec![Line::from_spans(vec![
            Span::new("Body", 12.0, BBox::new(0.0, 20.0, 40.0, 32.0)),
            Span::new(" ", 12.0, BBox::new(40.0, 20.0, 46.0, 32.0)),
        ])]));
        let mut layout = DocumentLayout::new();
        layout.add_page(page);

        let profile = FontProfile::build(&layout, 10.0);
        assert_eq!(profile.entries(), &[(12, 2)]);
    }
}
