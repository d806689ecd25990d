//! Formatter Options and Configuration
//!
//! Layout settings for the HTML beautifier. The defaults produce flush-left
//! output with no wrapping and no blank lines.

use serde::{Deserialize, Serialize};

/// Largest accepted `indent_size`.
pub const MAX_INDENT_SIZE: usize = 8;

/// Largest accepted `max_preserve_newlines`.
pub const MAX_PRESERVED_NEWLINES: usize = 10;

/// Elements that flow inline with surrounding text instead of starting a line.
pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "area", "audio", "b", "bdi", "bdo", "big", "br", "button", "canvas",
    "cite", "code", "data", "datalist", "del", "dfn", "em", "embed", "font", "i", "iframe", "img",
    "input", "ins", "kbd", "label", "map", "mark", "math", "meter", "noscript", "object",
    "output", "progress", "q", "ruby", "rp", "rt", "s", "samp", "select", "small", "span",
    "strike", "strong", "sub", "sup", "svg", "template", "textarea", "time", "tt", "u", "var",
    "video", "wbr",
];

/// Elements that never have a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is always raw text.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose children are not indented.
pub const UNINDENTED_ELEMENTS: &[&str] = &["html", "head", "body"];

// ─────────────────────────────────────────────────────────────────────────────
// Format Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for the HTML beautifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Indent characters per nesting level
    pub indent_size: usize,

    /// Character used for indentation
    pub indent_char: char,

    /// Terminate the output with a newline
    pub end_with_newline: bool,

    /// Keep explicit newlines found between tokens
    pub preserve_newlines: bool,

    /// Blank lines allowed in a row when preserving newlines
    pub max_preserve_newlines: usize,

    /// Wrap text lines longer than this; values of 1 or less disable wrapping
    pub wrap_line_length: usize,

    /// Extra indent for attributes moved to a continuation line
    pub wrap_attributes_indent_size: usize,

    /// Elements whose content, tags excluded, is copied through untouched
    pub unformatted: Vec<String>,

    /// Elements whose content is preserved byte for byte
    pub content_unformatted: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_size: 0,
            indent_char: ' ',
            end_with_newline: true,
            preserve_newlines: true,
            max_preserve_newlines: 0,
            wrap_line_length: 1,
            wrap_attributes_indent_size: 0,
            unformatted: ["strong", "em", "h1", "h2", "h3", "h4", "h5", "h6", "ruby", "rt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            content_unformatted: Vec::new(),
        }
    }
}

impl FormatOptions {
    /// Clamp out-of-range values and lowercase element names.
    pub fn sanitize(&mut self) {
        self.indent_size = self.indent_size.min(MAX_INDENT_SIZE);
        self.max_preserve_newlines = self.max_preserve_newlines.min(MAX_PRESERVED_NEWLINES);
        self.wrap_attributes_indent_size = self.wrap_attributes_indent_size.min(MAX_INDENT_SIZE);
        if !self.indent_char.is_whitespace() {
            self.indent_char = ' ';
        }
        for name in self
            .unformatted
            .iter_mut()
            .chain(self.content_unformatted.iter_mut())
        {
            *name = name.trim().to_ascii_lowercase();
        }
    }

    /// Line length at which text wraps, if wrapping is enabled.
    pub fn wrap_limit(&self) -> Option<usize> {
        (self.wrap_line_length > 1).then_some(self.wrap_line_length)
    }

    /// The string emitted for one level of indentation.
    pub fn indent_unit(&self) -> String {
        self.indent_char.to_string().repeat(self.indent_size)
    }

    /// Whether the content of `name` is copied through verbatim.
    pub fn is_verbatim(&self, name: &str) -> bool {
        RAW_TEXT_ELEMENTS.contains(&name)
            || self.unformatted.iter().any(|n| n == name)
            || self.content_unformatted.iter().any(|n| n == name)
    }
}

/// Whether `name` flows inline.
pub fn is_inline(name: &str) -> bool {
    INLINE_ELEMENTS.contains(&name)
}

/// Whether `name` is a void element.
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
