//! Whitespace normalization for comparison strings.

/// Collapse every run of whitespace to a single ASCII space and trim both ends.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
