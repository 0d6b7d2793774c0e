//! Document model types.
//!
//! `layout` is the positioned-text shape handed from the span extractor to the
//! outline core; `outline` is the result shape that gets serialized.

mod layout;
mod outline;

pub use layout::{BBox, Block, BlockType, DocumentLayout, Line, PageLayout, Span};
pub use outline::{HeadingLevel, HeadingRecord, OutlineDocument};
