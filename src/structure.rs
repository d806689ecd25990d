//! Text structuring: raw text to raw HTML
//!
//! The first stage of the conversion pipeline. In [`Mode::Rich`] the text is
//! rendered as Markdown; in [`Mode::Plain`] it is split into paragraphs on
//! blank lines. The result is well-formed but not yet pretty-printed.

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::markdown::MarkupParser;

/// Forced line break marker emitted in plain mode.
pub const LINE_BREAK: &str = "<br>";

/// Separator between plain-mode paragraph candidates.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Characters trimmed from both ends of a plain-mode paragraph.
const TRIM_CHARS: &[char] = &[' ', '\t', '\r', '\n', '\u{FEFF}', '\u{00A0}'];

// ─────────────────────────────────────────────────────────────────────────────
// Mode
// ─────────────────────────────────────────────────────────────────────────────

/// How the input text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Interpret Markdown syntax
    #[default]
    Rich,
    /// Blank-line separated paragraphs, no syntax interpretation
    Plain,
}

impl Mode {
    /// Toggle between Rich and Plain.
    pub fn toggle(&self) -> Self {
        match self {
            Mode::Rich => Mode::Plain,
            Mode::Plain => Mode::Rich,
        }
    }

    /// Whether markup syntax is interpreted in this mode.
    pub fn parses_markup(&self) -> bool {
        matches!(self, Mode::Rich)
    }

    /// Get a display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Rich => "Markdown",
            Mode::Plain => "Plain text",
        }
    }
}

impl From<bool> for Mode {
    fn from(parse_markup: bool) -> Self {
        if parse_markup {
            Mode::Rich
        } else {
            Mode::Plain
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Structuring
// ─────────────────────────────────────────────────────────────────────────────

/// Turn raw text into raw markup according to `mode`.
///
/// Accepts any string. Empty or blank-only input yields an empty string.
pub fn structure<P: MarkupParser + ?Sized>(text: &str, mode: Mode, parser: &P) -> String {
    let markup = match mode {
        Mode::Rich => normalize_line_breaks(&parser.parse_to_html(text)),
        Mode::Plain => plain_paragraphs(text),
    };
    debug!(
        "structured {} bytes of input into {} bytes of {:?} markup",
        text.len(),
        markup.len(),
        mode
    );
    markup
}

/// Make every `<br>` marker (any spelling) end with exactly one newline.
///
/// Applied over the whole rendered document, raw HTML passages included.
pub fn normalize_line_breaks(html: &str) -> String {
    static LINE_BREAK_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINE_BREAK_RE
        .get_or_init(|| Regex::new(r"(?i)(<br\s*/?>)\n?").expect("line break pattern is valid"));
    re.replace_all(html, "${1}\n").into_owned()
}

/// Wrap each blank-line separated chunk of `text` in a paragraph element.
///
/// Chunks that trim to nothing are dropped. Line feeds left inside a chunk
/// become `<br>` followed by a newline.
pub fn plain_paragraphs(text: &str) -> String {
    let line_break = format!("{}\n", LINE_BREAK);
    text.split(PARAGRAPH_SEPARATOR)
        .map(|candidate| candidate.trim_matches(TRIM_CHARS))
        .filter(|paragraph| !paragraph.is_empty())
        .fold(String::with_capacity(text.len()), |mut markup, paragraph| {
            markup.push_str("<p>");
            markup.push_str(&paragraph.replace('\n', &line_break));
            markup.push_str("</p>");
            markup
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
