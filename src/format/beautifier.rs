//! HTML beautifier
//!
//! Re-lays out an HTML fragment with deterministic whitespace:
//!
//! - block elements start on their own line, and close on their own line when
//!   their content spanned lines;
//! - inline elements and text flow on the current line, separated by single
//!   spaces;
//! - explicit newlines between tokens are kept, up to the configured number of
//!   blank lines;
//! - the content of unformatted elements (and of `script`/`style`) is copied
//!   through untouched.
//!
//! Formatting is total: unbalanced or malformed markup is laid out on a best
//! effort basis. Formatting already formatted output returns it unchanged.

use log::trace;

use super::options::{is_inline, is_void, FormatOptions, UNINDENTED_ELEMENTS};
use super::output::Output;
use super::tokenizer::{Token, TokenKind, Tokenizer};
use super::MarkupFormatter;

/// The kind of the previously printed token, as far as layout cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Nothing,
    Text,
    StartTag,
    BlockEnd,
    InlineEnd,
    Other,
}

/// An element that has been opened and not yet closed.
#[derive(Debug)]
struct OpenElement {
    name: String,
    /// A block child started on its own line
    multiline: bool,
    /// Children are indented one level deeper
    indents: bool,
    verbatim: bool,
}

/// HTML pretty-printer configured by [`FormatOptions`].
#[derive(Debug, Clone, Default)]
pub struct HtmlBeautifier {
    options: FormatOptions,
}

impl HtmlBeautifier {
    /// Create a beautifier; options are sanitized first.
    pub fn new(mut options: FormatOptions) -> Self {
        options.sanitize();
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Pretty-print `markup`.
    pub fn beautify(&self, markup: &str) -> String {
        let source = markup.replace("\r\n", "\n").replace('\r', "\n");
        let tokens = Tokenizer::new(&source, |name: &str| self.options.is_verbatim(name));

        let mut printer = Printer::new(&self.options);
        for token in tokens {
            printer.print(token);
        }
        let text = printer.finish();
        trace!("beautified {} bytes into {} bytes", markup.len(), text.len());
        text
    }
}

impl MarkupFormatter for HtmlBeautifier {
    fn format(&self, markup: &str) -> String {
        self.beautify(markup)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Printer
// ─────────────────────────────────────────────────────────────────────────────

struct Printer<'o> {
    options: &'o FormatOptions,
    out: Output,
    open: Vec<OpenElement>,
    last: Last,
}

impl<'o> Printer<'o> {
    fn new(options: &'o FormatOptions) -> Self {
        Self {
            options,
            out: Output::new(options.indent_unit()),
            open: Vec::new(),
            last: Last::Nothing,
        }
    }

    fn finish(self) -> String {
        self.out.into_string(self.options.end_with_newline)
    }

    fn print(&mut self, token: Token<'_>) {
        if !matches!(token.kind, TokenKind::Raw(_)) {
            self.traverse_whitespace(&token);
        }
        match token.kind {
            TokenKind::StartTag {
                name,
                raw,
                self_closing,
            } => self.start_tag(name, raw, self_closing),
            TokenKind::EndTag { name, raw } => self.end_tag(&name, raw),
            TokenKind::Comment(text) => {
                self.out.push_token(text, None);
                self.last = Last::Other;
            }
            TokenKind::Directive(text) => {
                self.out.newline(false);
                self.out.push_token(text, None);
                self.last = Last::BlockEnd;
            }
            TokenKind::Word(word) => {
                self.out.push_token(word, self.options.wrap_limit());
                self.last = Last::Text;
            }
            TokenKind::Raw(text) => {
                self.out.push_raw(text);
                self.last = Last::Other;
            }
        }
    }

    /// Turn the whitespace before a token into a space or newlines.
    fn traverse_whitespace(&mut self, token: &Token<'_>) {
        if !token.whitespace_before && token.newlines == 0 {
            return;
        }

        let mut newlines = 0;
        if !token.is_text() && self.last != Last::Text {
            newlines = usize::from(token.newlines > 0);
        }
        if self.options.preserve_newlines {
            newlines = token.newlines.min(self.options.max_preserve_newlines + 1);
        }

        for n in 0..newlines {
            self.out.newline(n > 0);
        }
        if newlines == 0 {
            self.out.space_before = true;
        }
    }

    fn start_tag(&mut self, name: String, raw: &str, self_closing: bool) {
        let block = !is_inline(&name);
        if block && self.last != Last::Text {
            if let Some(parent) = self.open.last_mut() {
                parent.multiline = true;
            }
            self.out.newline(false);
        }

        self.push_tag(raw);
        self.last = Last::StartTag;

        if self_closing || is_void(&name) {
            if block {
                self.last = Last::BlockEnd;
            }
            return;
        }

        let verbatim = self.options.is_verbatim(&name);
        let indents = block && !verbatim && !UNINDENTED_ELEMENTS.contains(&name.as_str());
        if indents {
            self.out.indent_level += 1;
        }
        self.open.push(OpenElement {
            name,
            multiline: false,
            indents,
            verbatim,
        });
    }

    fn end_tag(&mut self, name: &str, raw: &str) {
        let block = !is_inline(name);
        let Some(index) = self.open.iter().rposition(|e| e.name == name) else {
            // Stray closer: print it where it stands
            self.push_tag(raw);
            self.last = Last::Other;
            return;
        };

        // Close anything left open inside this element
        let mut closed = None;
        while self.open.len() > index {
            if let Some(element) = self.open.pop() {
                if element.indents {
                    self.out.indent_level = self.out.indent_level.saturating_sub(1);
                }
                closed = Some(element);
            }
        }

        let expand = closed.is_some_and(|element| {
            !element.verbatim && (element.multiline || (block && self.last == Last::BlockEnd))
        });
        if expand {
            self.out.newline(false);
        }

        self.push_tag(raw);
        self.last = if block { Last::BlockEnd } else { Last::InlineEnd };
    }

    /// Print a tag with its attribute whitespace normalized, moving
    /// attributes to continuation lines when wrapping requires it.
    fn push_tag(&mut self, raw: &str) {
        let tag = normalize_tag(raw);
        let Some(limit) = self.options.wrap_limit() else {
            self.out.push_token(&tag, None);
            return;
        };

        let attributes = split_attributes(&tag);
        let mut parts = attributes.iter();
        if let Some(head) = parts.next() {
            self.out.push_token(head, Some(limit));
        }
        for part in parts {
            let width = part.chars().count();
            if self.out.line_width() + 1 + width > limit {
                self.out.newline(false);
                let indent = " ".repeat(self.options.wrap_attributes_indent_size);
                self.out.push_token(&format!("{}{}", indent, part), None);
            } else {
                self.out.space_before = true;
                self.out.push_token(part, None);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tag text helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Collapse whitespace runs outside quotes to one space and drop whitespace
/// directly before the closing `>`.
fn normalize_tag(raw: &str) -> String {
    let mut tag = String::with_capacity(raw.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;

    for c in raw.chars() {
        if let Some(q) = quote {
            tag.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_ascii_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && c != '>' {
            tag.push(' ');
        }
        pending_space = false;
        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        tag.push(c);
    }
    tag
}

/// Split a normalized tag at the spaces between attributes.
fn split_attributes(tag: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in tag.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == ' ' => {
                parts.push(&tag[start..i]);
                start = i + 1;
            }
            None => {}
        }
    }
    parts.push(&tag[start..]);
    parts
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
