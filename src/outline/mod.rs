//! Heuristic outline extraction.
//!
//! The passes run in order over an immutable [`DocumentLayout`]:
//!
//! 1. [`FontProfile::build`] ranks truncated font sizes by frequency.
//! 2. [`detect_title`] picks the largest text on the first page.
//! 3. [`HeadingSizeSet::classify`] keeps up to three sizes between the
//!    heading floor and the title size, in rank order.
//! 4. [`assemble_outline`] keeps lines set in those sizes that pass the
//!    [`HeadingValidator`].
//!
//! Font size is the only structural signal. Each pass owns its accumulator,
//! so documents can be processed on independent threads.

mod assemble;
mod levels;
mod normalize;
mod options;
mod profile;
mod title;
mod validator;

pub use assemble::assemble_outline;
pub use levels::HeadingSizeSet;
pub use normalize::normalize_text;
pub use options::OutlineOptions;
pub use profile::FontProfile;
pub use title::{detect_title, TitleInfo};
pub use validator::{is_valid_heading, HeadingValidator, Rejection, STOPWORDS};

use crate::model::{DocumentLayout, OutlineDocument};

/// Intermediate results of the classification passes.
#[derive(Debug, Clone)]
pub struct OutlineAnalysis {
    /// Font size frequency profile
    pub profile: FontProfile,
    /// Detected title
    pub title: TitleInfo,
    /// Sizes selected as heading levels
    pub heading_sizes: HeadingSizeSet,
}

/// Run the profiling, title and level passes without assembling headings.
pub fn analyze(layout: &DocumentLayout, options: &OutlineOptions) -> OutlineAnalysis {
    let profile = FontProfile::build(layout, options.profile_threshold);
    let title = detect_title(layout, options.title_tolerance);
    let heading_sizes = HeadingSizeSet::classify(
        &profile,
        title.size_ceiling(),
        options.heading_size_floor,
        options.max_levels,
    );

    log::debug!(
        "profile={:?} title={:?} max_size={} heading_sizes={:?}",
        profile.entries(),
        title.text,
        title.max_size,
        heading_sizes.sizes()
    );

    OutlineAnalysis {
        profile,
        title,
        heading_sizes,
    }
}

/// Extract the title and heading outline of a document.
pub fn extract_outline(layout: &DocumentLayout, options: &OutlineOptions) -> OutlineDocument {
    let analysis = analyze(layout, options);
    let validator = HeadingValidator::new(options);

    let mut document = OutlineDocument::new(analysis.title.text);
    document.outline = assemble_outline(
        layout,
        &document.title,
        &analysis.heading_sizes,
        &validator,
    );
    document
}
