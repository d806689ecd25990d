//! Markdown parsing module
//!
//! This module renders markdown to HTML using the comrak library, a
//! CommonMark + GFM compatible parser, behind the [`MarkupParser`] trait.
//!
//! # Example
//! ```ignore
//! use htmlsmith::markdown::{ComrakParser, MarkupParser};
//!
//! let html = ComrakParser::default().parse_to_html("# Hello\n\nThis is **bold** text.");
//! ```

mod parser;

pub use parser::{ComrakParser, MarkdownOptions, MarkupParser};
