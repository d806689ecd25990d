//! HTML Formatting Module
//!
//! Second stage of the conversion pipeline: re-lays out raw HTML into a
//! stable, human-readable form.
//!
//! # Architecture
//!
//! - `options.rs` - Layout configuration and element classes
//! - `tokenizer.rs` - Splits markup into tags, words and verbatim runs
//! - `output.rs` - Line buffer with indentation and trimming
//! - `beautifier.rs` - Layout rules

mod beautifier;
pub mod options;
mod output;
mod tokenizer;

pub use beautifier::HtmlBeautifier;
pub use options::FormatOptions;

/// Pretty-prints markup.
///
/// Implementations must be total: malformed markup is formatted on a best
/// effort basis rather than rejected.
pub trait MarkupFormatter {
    /// Re-lay out `markup`.
    fn format(&self, markup: &str) -> String;
}

/// Format `markup` with the default options.
pub fn format(markup: &str) -> String {
    HtmlBeautifier::default().beautify(markup)
}
