//! Walk the document and emit heading records.

use std::collections::HashSet;

use crate::model::{DocumentLayout, HeadingRecord};

use super::{HeadingSizeSet, HeadingValidator};

/// Collect headings in page order, then document order within each page.
///
/// A line qualifies when its first span's truncated size is a heading size
/// and the validator accepts its text. Repeats of the same text (ignoring
/// case) on the same page are dropped; the same text on another page is kept.
pub fn assemble_outline(
    layout: &DocumentLayout,
    title: &str,
    sizes: &HeadingSizeSet,
    validator: &HeadingValidator,
) -> Vec<HeadingRecord> {
    let mut headings = Vec::new();
    if sizes.is_empty() {
        return headings;
    }

    let mut seen: HashSet<(String, usize)> = HashSet::new();

    for (page_idx, page) in layout.pages.iter().enumerate() {
        for line in page.text_lines() {
            let text = line.full_text();
            if text.is_empty() {
                continue;
            }

            let Some(level) = line.primary_size().and_then(|size| sizes.level_of(size)) else {
                continue;
            };

            if let Some(reason) = validator.rejection(&text, title) {
                log::trace!("page {}: rejected {:?} ({})", page_idx + 1, text, reason);
                continue;
            }

            if seen.insert((text.to_lowercase(), page_idx)) {
                headings.push(HeadingRecord::new(level, text, page_idx as u32 + 1));
            }
        }
    }

    headings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Block, HeadingLevel, Line, PageLayout, Span};
    use crate::outline::FontProfile;

    fn line(text: &str, size: f32, y0: f32) -> Line {
        Line::from_spans(vec![Span::new(text, size, BBox::new(72.0, y0, 300.0, y0 + size))])
    }

    fn page(number: u32, lines: Vec<Line>) -> PageLayout {
        let mut page = PageLayout::letter(number);
        page.add_block(Block::text(lines));
        page
    }

    fn sizes(list: &[f32]) -> HeadingSizeSet {
        let profile = FontProfile::from_sizes(list.iter().copied(), 10.0);
        HeadingSizeSet::classify(&profile, Some(30.0), 11, 3)
    }

    #[test]
    fn test_dedup_same_page_keeps_first() {
        let mut doc = DocumentLayout::new();
        doc.add_page(page(
            1,
            vec![
                line("Project Scope", 16.0, 100.0),
                line("project   SCOPE", 16.0, 400.0),
            ],
        ));
        let headings = assemble_outline(&doc, "", &sizes(&[16.0]), &HeadingValidator::default());

        assert_eq!(headings, vec![HeadingRecord::new(HeadingLevel::H1, "Project Scope", 1)]);
    }

    #[test]
    fn test_same_text_on_other_page_is_kept() {
        let mut doc = DocumentLayout::new();
        doc.add_page(page(1, vec![line("Project Scope", 16.0, 100.0)]));
        doc.add_page(page(2, vec![line("Project Scope", 16.0, 100.0)]));
        let headings = assemble_outline(&doc, "", &sizes(&[16.0]), &HeadingValidator::default());

        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].page, 1);
        assert_eq!(headings[1].page, 2);
    }

    #[test]
    fn test_first_span_decides_size() {
        let mixed = Line::from_spans(vec![
            Span::new("Small", 10.0, BBox::new(72.0, 100.0, 100.0, 110.0)),
            Span::new("Large Heading", 16.0, BBox::new(105.0, 94.0, 200.0, 110.0)),
        ]);
        let mut doc = DocumentLayout::new();
        doc.add_page(page(1, vec![mixed]));
        let headings = assemble_outline(&doc, "", &sizes(&[16.0]), &HeadingValidator::default());

        assert!(headings.is_empty());
    }

    #[test]
    fn test_order_is_page_then_document_order() {
        let mut doc = DocumentLayout::new();
        doc.add_page(page(
            1,
            vec![
                line("Detailed Findings", 13.0, 100.0),
                line("Main Section", 16.0, 200.0),
            ],
        ));
        doc.add_page(page(2, vec![line("Closing Remarks", 16.0, 80.0)]));
        let set = sizes(&[16.0, 16.0, 13.0]);
        let headings = assemble_outline(&doc, "", &set, &HeadingValidator::default());

        let got: Vec<_> = headings.iter().map(|h| (h.level, h.text.as_str(), h.page)).collect();
        assert_eq!(
            got,
            vec![
                (HeadingLevel::H2, "Detailed Findings", 1),
                (HeadingLevel::H1, "Main Section", 1),
                (HeadingLevel::H1, "Closing Remarks", 2),
            ]
        );
    }

    #[test]
    fn test_rejected_lines_and_title_are_skipped() {
        let mut doc = DocumentLayout::new();
        doc.add_page(page(
            1,
            vec![
                line("Annual Report", 16.0, 50.0),
                line("This is a sentence.", 16.0, 90.0),
                line("   ", 16.0, 120.0),
            ],
        ));
        let headings = assemble_outline(
            &doc,
            "Annual Report",
            &sizes(&[16.0]),
            &HeadingValidator::default(),
        );
        assert!(headings.is_empty());
    }
}
