//! Title detection from the largest text on the first page.

use crate::model::DocumentLayout;

use super::normalize_text;

/// The detected title and the font size it was set in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleInfo {
    /// Normalized title text (empty when no span has a positive size)
    pub text: String,
    /// Largest font size on the first page (0.0 when none)
    pub max_size: f32,
    /// Top coordinate of the line holding the first largest span
    pub line_y0: Option<f32>,
}

impl TitleInfo {
    /// Upper bound (exclusive) for heading sizes, or `None` when no title exists.
    pub fn size_ceiling(&self) -> Option<f32> {
        (self.max_size > 0.0).then_some(self.max_size)
    }
}

/// Reconstruct the title from the first page.
///
/// The first span reaching the page's maximum font size anchors the title
/// line. Every line whose top lies within `tolerance` of that line contributes
/// all of its span texts, so a title split across runs or nudged baselines is
/// reassembled without pulling in body text below it.
pub fn detect_title(layout: &DocumentLayout, tolerance: f32) -> TitleInfo {
    let Some(page) = layout.first_page() else {
        return TitleInfo::default();
    };

    let mut max_size = 0.0_f32;
    let mut title_y0 = 0.0_f32;
    for line in page.text_lines() {
        for span in &line.spans {
            if span.size > max_size {
                max_size = span.size;
                title_y0 = line.y0();
            }
        }
    }

    if max_size <= 0.0 {
        return TitleInfo::default();
    }

    let words: Vec<&str> = page
        .text_lines()
        .filter(|line| (line.y0() - title_y0).abs() < tolerance)
        .flat_map(|line| line.spans.iter().map(|s| s.text.as_str()))
        .collect();

    TitleInfo {
        text: normalize_text(&words.join(" ")),
        max_size,
        line_y0: Some(title_y0),
    }
}
