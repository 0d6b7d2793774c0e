//! PDF parsing module.
//!
//! Turns PDF pages into the [`DocumentLayout`](crate::model::DocumentLayout)
//! consumed by the outline passes.

mod backend;
mod content;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, ContentOp, FormXObject, LopdfBackend, MediaBox, ObjectRef, PageId,
    PdfBackend, PdfValue, ResourceScope, XObjectKind,
};
pub use content::{PageContent, SpanExtractor};
pub use layout::LayoutBuilder;
pub use options::{ErrorMode, ExtractOptions};
pub use pdf_parser::PdfParser;
