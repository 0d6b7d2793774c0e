//! Layout grouping: spans into lines, lines into blocks.
//!
//! Works purely on page-space geometry, so it can be exercised without a PDF.

use std::cmp::Ordering;

use crate::model::{BBox, Block, Line, PageLayout, Span};

use super::content::PageContent;

/// Fallback line spacing when a block has fewer than two lines.
const DEFAULT_LINE_SPACING: f32 = 12.0;

/// Thresholds for line and block grouping.
#[derive(Debug, Clone, Copy)]
pub struct LayoutBuilder {
    /// Baseline tolerance as a fraction of the span's font size
    pub line_tolerance: f32,
    /// A gap this many times the average spacing starts a new block
    pub paragraph_gap_factor: f32,
    /// A font size change above this (points) starts a new block
    pub size_change: f32,
    /// A left margin shift above this (points) starts a new block
    pub indent_change: f32,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self {
            line_tolerance: 0.3,
            paragraph_gap_factor: 1.5,
            size_change: 1.0,
            indent_change: 20.0,
        }
    }
}

impl LayoutBuilder {
    /// Build a page from extracted content.
    pub fn build_page(&self, number: u32, width: f32, height: f32, content: PageContent) -> PageLayout {
        let lines = self.group_spans_into_lines(content.spans);
        let text_blocks = self.group_lines_into_blocks(lines);

        let mut page = PageLayout::new(number, width, height);
        for block in merge_images(text_blocks, content.images) {
            page.add_block(block);
        }
        page
    }

    /// Group spans sharing a baseline, top-to-bottom then left-to-right.
    pub fn group_spans_into_lines(&self, mut spans: Vec<Span>) -> Vec<Line> {
        if spans.is_empty() {
            return vec![];
        }

        spans.sort_by(|a, b| match cmp_f32(a.baseline(), b.baseline()) {
            Ordering::Equal => cmp_f32(a.bbox.x0, b.bbox.x0),
            other => other,
        });

        let mut lines: Vec<Line> = Vec::new();
        let mut current: Vec<Span> = Vec::new();
        let mut current_baseline: Option<f32> = None;

        for span in spans {
            let tolerance = span.size * self.line_tolerance;
            let baseline = span.baseline();

            match current_baseline {
                Some(y) if (baseline - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        lines.push(finish_line(std::mem::take(&mut current)));
                    }
                    current_baseline = Some(baseline);
                    current.push(span);
                }
            }
        }

        if !current.is_empty() {
            lines.push(finish_line(current));
        }

        lines
    }

    /// Group consecutive lines into paragraph-like text blocks.
    pub fn group_lines_into_blocks(&self, lines: Vec<Line>) -> Vec<Block> {
        if lines.is_empty() {
            return vec![];
        }

        let avg_spacing = average_line_spacing(&lines);
        let mut blocks = Vec::new();
        let mut current: Vec<Line> = Vec::new();

        for line in lines {
            if let Some(prev) = current.last() {
                if self.should_break_block(prev, &line, avg_spacing) {
                    blocks.push(Block::text(std::mem::take(&mut current)));
                }
            }
            current.push(line);
        }

        if !current.is_empty() {
            blocks.push(Block::text(current));
        }

        blocks
    }

    fn should_break_block(&self, prev: &Line, curr: &Line, avg_spacing: f32) -> bool {
        // Large spacing indicates new paragraph
        let spacing = (curr.y0() - prev.y0()).abs();
        if spacing > avg_spacing * self.paragraph_gap_factor {
            return true;
        }

        if (line_size(prev) - line_size(curr)).abs() > self.size_change {
            return true;
        }

        // Indentation
        (prev.bbox.x0 - curr.bbox.x0).abs() > self.indent_change
    }
}

fn finish_line(mut spans: Vec<Span>) -> Line {
    spans.sort_by(|a, b| cmp_f32(a.bbox.x0, b.bbox.x0));
    Line::from_spans(spans)
}

fn line_size(line: &Line) -> f32 {
    line.spans.first().map(|s| s.size).unwrap_or(0.0)
}

fn average_line_spacing(lines: &[Line]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[1].y0() - w[0].y0()).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return DEFAULT_LINE_SPACING;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Interleave image blocks with text blocks by top edge. Text wins ties.
fn merge_images(text_blocks: Vec<Block>, mut images: Vec<BBox>) -> Vec<Block> {
    if images.is_empty() {
        return text_blocks;
    }
    images.sort_by(|a, b| cmp_f32(a.y0, b.y0));

    let mut blocks = Vec::with_capacity(text_blocks.len() + images.len());
    let mut images = images.into_iter().peekable();

    for block in text_blocks {
        while let Some(image) = images.next_if(|img| img.y0 < block.bbox.y0) {
            blocks.push(Block::image(image));
        }
        blocks.push(block);
    }
    blocks.extend(images.map(Block::image));
    blocks
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
