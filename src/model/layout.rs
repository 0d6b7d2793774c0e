//! Positioned text types produced by the span extractor.
//!
//! The outline core only ever sees this shape: a document is a sequence of
//! pages, a page a sequence of blocks, a text block a sequence of lines and a
//! line a sequence of spans. Nothing here refers to a concrete PDF library.

use serde::{Deserialize, Serialize};

use crate::outline::normalize_text;

/// Axis-aligned bounding box in page space (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A run of text rendered with a uniform font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content, whitespace preserved
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Bounding box
    pub bbox: BBox,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            size,
            bbox,
        }
    }

    /// Font size truncated toward zero, the key used by font profiling.
    pub fn truncated_size(&self) -> i32 {
        self.size.trunc() as i32
    }

    /// Whether the span carries no visible characters.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Approximate baseline (bottom edge minus descender).
    pub fn baseline(&self) -> f32 {
        self.bbox.y1 - self.size * 0.2
    }
}

/// Spans sharing a vertical position, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in this line
    pub spans: Vec<Span>,
    /// Union of the span boxes
    pub bbox: BBox,
}

impl Line {
    /// Create a line from spans, computing its bounding box.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        let bbox = spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default();
        Self { spans, bbox }
    }

    /// Top coordinate of the line.
    pub fn y0(&self) -> f32 {
        self.bbox.y0
    }

    /// Normalized concatenation of the line's non-blank spans.
    pub fn full_text(&self) -> String {
        let parts: Vec<&str> = self
            .spans
            .iter()
            .filter(|s| !s.is_blank())
            .map(|s| s.text.as_str())
            .collect();
        normalize_text(&parts.join(" "))
    }

    /// Truncated size of the first span. Headings are assumed font-homogeneous,
    /// so the first run decides the line's class.
    pub fn primary_size(&self) -> Option<i32> {
        self.spans.first().map(Span::truncated_size)
    }
}

/// Type of layout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    /// Lines of text
    Text,
    /// An image region; carries no lines
    Image,
}

/// A parser-level grouping of lines, or an image region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block type
    pub block_type: BlockType,
    /// Lines in this block (empty for images)
    pub lines: Vec<Line>,
    /// Bounding box
    pub bbox: BBox,
}

impl Block {
    /// Create a text block from lines.
    pub fn text(lines: Vec<Line>) -> Self {
        let bbox = lines
            .iter()
            .map(|l| l.bbox)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default();
        Self {
            block_type: BlockType::Text,
            lines,
            bbox,
        }
    }

    /// Create an image block.
    pub fn image(bbox: BBox) -> Self {
        Self {
            block_type: BlockType::Image,
            lines: Vec::new(),
            bbox,
        }
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        self.block_type == BlockType::Text
    }
}

/// The blocks of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty Letter-sized page.
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Lines of every text block, in block order. Image blocks are skipped.
    pub fn text_lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks
            .iter()
            .filter(|b| b.is_text())
            .flat_map(|b| b.lines.iter())
    }

    /// Spans of every text line on the page.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.text_lines().flat_map(|l| l.spans.iter())
    }
}

/// All pages of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Pages in document order
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageLayout) {
        self.pages.push(page);
    }

    /// The first page, if any.
    pub fn first_page(&self) -> Option<&PageLayout> {
        self.pages.first()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every text span in the document, page by page.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages.iter().flat_map(|p| p.spans())
    }
}
