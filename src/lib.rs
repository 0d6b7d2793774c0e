//! # pdf-outline
//!
//! Title and heading outline extraction for PDF documents.
//!
//! The only structural signal is font size: the largest text on the first
//! page is the title, and up to three frequent sizes between body text and
//! the title become heading levels H1 to H3. Candidate lines are then
//! filtered by simple textual rules.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_file, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let outline = extract_file("report.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! - [`parser`]: PDF pages to positioned spans, lines and blocks
//! - [`outline`]: the pure heuristic over a [`DocumentLayout`]
//! - [`render`]: JSON output
//! - [`batch`]: directory-to-directory driver

pub mod batch;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{run_batch, BatchEvent, BatchOptions, BatchReport, FileOutcome};
pub use error::{Error, Result};
pub use model::{
    BBox, Block, BlockType, DocumentLayout, HeadingLevel, HeadingRecord, Line, OutlineDocument,
    PageLayout, Span,
};
pub use outline::{extract_outline, OutlineOptions};
pub use parser::{ErrorMode, ExtractOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Extract the outline of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_file;
///
/// let outline = extract_file("report.pdf").unwrap();
/// println!("{}: {} headings", outline.title, outline.outline.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<OutlineDocument> {
    OutlineExtractor::new().extract_file(path)
}

/// Extract the outline of a PDF file with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    extract: ExtractOptions,
    outline: &OutlineOptions,
) -> Result<OutlineDocument> {
    let layout = PdfParser::open_with_options(path, extract)?.parse()?;
    Ok(extract_outline(&layout, outline))
}

/// Extract the outline of an in-memory PDF.
pub fn extract_bytes(data: &[u8]) -> Result<OutlineDocument> {
    OutlineExtractor::new().extract_bytes(data)
}

/// Extract the outline of a PDF read from `reader`.
pub fn extract_reader<R: Read>(reader: R) -> Result<OutlineDocument> {
    let layout = PdfParser::from_reader(reader)?.parse()?;
    Ok(extract_outline(&layout, &OutlineOptions::default()))
}

/// Builder for outline extraction with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{OutlineExtractor, OutlineOptions};
///
/// let outline = OutlineExtractor::new()
///     .lenient()
///     .with_outline_options(OutlineOptions::new().with_word_range(1, 12))
///     .extract_file("report.pdf")?;
/// # Ok::<(), pdf_outline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    extract_options: ExtractOptions,
    outline_options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn unreadable pages into empty pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Set span extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set outline thresholds.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Extract from a file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineDocument> {
        extract_file_with_options(path, self.extract_options.clone(), &self.outline_options)
    }

    /// Extract from bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<OutlineDocument> {
        let parser = PdfParser::from_bytes_with_options(data, self.extract_options.clone())?;
        Ok(self.extract_layout(&parser.parse()?))
    }

    /// Run the heuristic over an already extracted layout.
    pub fn extract_layout(&self, layout: &DocumentLayout) -> OutlineDocument {
        extract_outline(layout, &self.outline_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_builder() {
        let extractor = OutlineExtractor::new()
            .lenient()
            .with_outline_options(OutlineOptions::new().with_max_levels(2));

        assert_eq!(extractor.extract_options.error_mode, ErrorMode::Lenient);
        assert_eq!(extractor.outline_options.max_levels, 2);
    }

    #[test]
    fn test_extract_bytes_empty_data() {
        assert!(extract_bytes(&[]).is_err());
    }

    #[test]
    fn test_extract_bytes_not_pdf() {
        assert!(extract_bytes(b"<html>not a pdf</html>").is_err());
    }

    #[test]
    fn test_extract_file_missing() {
        let result = extract_file("/nonexistent/file.pdf");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_extract_layout_uses_options() {
        let mut page = PageLayout::letter(1);
        page.add_block(Block::text(vec![Line::from_spans(vec![Span::new(
            "Overview",
            14.0,
            BBox::new(72.0, 100.0, 140.0, 114.0),
        )])]));
        page.add_block(Block::text(vec![Line::from_spans(vec![Span::new(
            "Document Heading",
            22.0,
            BBox::new(72.0, 40.0, 300.0, 62.0),
        )])]));
        let mut layout = DocumentLayout::new();
        layout.add_page(page);

        let default = OutlineExtractor::new().extract_layout(&layout);
        assert_eq!(default.title, "Document Heading");
        assert!(default.outline.is_empty());

        let relaxed = OutlineExtractor::new()
            .with_outline_options(OutlineOptions::new().with_word_range(1, 10))
            .extract_layout(&layout);
        assert_eq!(relaxed.outline.len(), 1);
        assert_eq!(relaxed.outline[0].text, "Overview");
    }
}
