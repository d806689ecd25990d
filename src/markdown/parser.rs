//! Markdown parser implementation using comrak
//!
//! This module wraps comrak's rendering function behind the [`MarkupParser`]
//! capability so the conversion pipeline does not depend on a particular
//! Markdown implementation.

use comrak::{markdown_to_html, Options};
use log::trace;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Capability
// ─────────────────────────────────────────────────────────────────────────────

/// Turns lightweight markup into raw HTML.
///
/// Implementations must be total: malformed syntax is rendered as literal
/// text, never reported as an error.
pub trait MarkupParser {
    /// Render `source` to an HTML fragment.
    fn parse_to_html(&self, source: &str) -> String;
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable superscript (^text^)
    pub superscript: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Enable description lists
    pub description_lists: bool,
    /// Turn straight quotes and dashes into typographic ones
    pub smart_punctuation: bool,
    /// Render a single newline inside a paragraph as `<br>`
    pub hard_breaks: bool,
    /// Pass raw HTML in the source through to the output
    pub allow_raw_html: bool,
    /// Generate GitHub-style heading IDs with this prefix
    pub header_ids: Option<String>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            superscript: false,
            footnotes: false,
            description_lists: false,
            smart_punctuation: false,
            hard_breaks: true,
            allow_raw_html: true,
            header_ids: None,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        // Extension options
        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.superscript = self.superscript;
        options.extension.footnotes = self.footnotes;
        options.extension.description_lists = self.description_lists;
        options.extension.header_ids = self.header_ids.clone();

        // Parse options
        options.parse.smart = self.smart_punctuation;

        // Render options
        options.render.hardbreaks = self.hard_breaks;
        options.render.unsafe_ = self.allow_raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Comrak-backed parser
// ─────────────────────────────────────────────────────────────────────────────

/// CommonMark + GFM parser backed by comrak.
#[derive(Debug, Clone)]
pub struct ComrakParser {
    options: Options,
}

impl ComrakParser {
    /// Create a parser from markdown options.
    pub fn new(options: &MarkdownOptions) -> Self {
        Self {
            options: options.to_comrak_options(),
        }
    }
}

impl Default for ComrakParser {
    fn default() -> Self {
        Self::new(&MarkdownOptions::default())
    }
}

impl MarkupParser for ComrakParser {
    fn parse_to_html(&self, source: &str) -> String {
        let html = markdown_to_html(source, &self.options);
        trace!("comrak rendered {} bytes into {} bytes", source.len(), html.len());
        html
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
