//! Rendering module for converting outlines to output formats.

mod json;

pub use json::{to_json, JsonFormat};
