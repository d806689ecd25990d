//! Line buffer for the beautifier
//!
//! Collects formatted lines, applying indentation when a line receives its
//! first token and removing trailing whitespace when a line is closed.

pub struct Output {
    lines: Vec<String>,
    current: String,
    /// Width of `current` in characters
    width: usize,
    indent_unit: String,
    pub indent_level: usize,
    /// A space is owed before the next token on this line
    pub space_before: bool,
}

impl Output {
    pub fn new(indent_unit: String) -> Self {
        Self {
            lines: Vec::new(),
            current: String::new(),
            width: 0,
            indent_unit,
            indent_level: 0,
            space_before: false,
        }
    }

    pub fn line_width(&self) -> usize {
        self.width
    }

    /// Start a new line.
    ///
    /// Without `force`, nothing happens when the current line is empty. A
    /// newline is never emitted before the first token of the document.
    pub fn newline(&mut self, force: bool) -> bool {
        if self.lines.is_empty() && self.current.is_empty() {
            return false;
        }
        if !force && self.current.is_empty() {
            return false;
        }
        let trimmed = self.current.trim_end_matches([' ', '\t']).len();
        self.current.truncate(trimmed);
        self.lines.push(std::mem::take(&mut self.current));
        self.width = 0;
        self.space_before = false;
        true
    }

    fn write_indent(&mut self) {
        if self.current.is_empty() {
            for _ in 0..self.indent_level {
                self.current.push_str(&self.indent_unit);
            }
            self.width = self.current.chars().count();
        }
    }

    fn append(&mut self, text: &str) {
        self.current.push_str(text);
        self.width += text.chars().count();
    }

    /// Append a token, honoring a pending space.
    ///
    /// With a wrap limit, the pending space becomes a line break when the
    /// token would push the line past the limit.
    pub fn push_token(&mut self, text: &str, wrap: Option<usize>) {
        if self.space_before && !self.current.is_empty() {
            let token_width = text.lines().next().map_or(0, |l| l.chars().count());
            let too_long = wrap.is_some_and(|limit| self.width + 1 + token_width > limit);
            if too_long {
                self.newline(false);
            } else {
                self.append(" ");
            }
        }
        self.space_before = false;
        self.write_indent();

        if text.contains('\n') {
            self.push_raw(text);
        } else {
            self.append(text);
        }
    }

    /// Append text exactly as given; embedded newlines start new lines
    /// without indentation or trimming.
    pub fn push_raw(&mut self, text: &str) {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            self.append(first);
        }
        for segment in segments {
            self.lines.push(std::mem::take(&mut self.current));
            self.width = 0;
            self.append(segment);
        }
        self.space_before = false;
    }

    /// Finish the document.
    pub fn into_string(mut self, end_with_newline: bool) -> String {
        if !self.current.is_empty() {
            self.newline(false);
        }
        while self.lines.last().is_some_and(|l| l.trim().is_empty()) {
            self.lines.pop();
        }
        let mut text = self.lines.join("\n");
        if end_with_newline {
            text.push('\n');
        }
        text
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_output() {
        assert_eq!(Output::new(String::new()).into_string(true), "\n");
        assert_eq!(Output::new(String::new()).into_string(false), "");
    }

    #[test]
    fn test_no_leading_newline() {
        let mut out = Output::new(String::new());
        assert!(!out.newline(true));
        out.push_token("a", None);
        assert_eq!(out.into_string(true), "a\n");
    }

    #[test]
    fn test_unforced_newline_skips_empty_line() {
        let mut out = Output::new(String::new());
        out.push_token("a", None);
        assert!(out.newline(false));
        assert!(!out.newline(false));
        assert!(out.newline(true));
        out.push_token("b", None);
        assert_eq!(out.into_string(false), "a\n\nb");
    }

    #[test]
    fn test_space_before_and_trailing_trim() {
        let mut out = Output::new(String::new());
        out.push_token("a", None);
        out.space_before = true;
        out.push_token("b", None);
        out.push_raw("  ");
        out.newline(false);
        assert_eq!(out.into_string(false), "a b");
    }

    #[test]
    fn test_indentation() {
        let mut out = Output::new("  ".to_string());
        out.push_token("<ul>", None);
        out.indent_level = 1;
        out.newline(false);
        out.push_token("<li>", None);
        assert_eq!(out.into_string(false), "<ul>\n  <li>");
    }

    #[test]
    fn test_wrap_at_limit() {
        let mut out = Output::new(String::new());
        for word in ["aaa", "bbb", "ccc"] {
            out.space_before = true;
            out.push_token(word, Some(7));
        }
        assert_eq!(out.into_string(false), "aaa bbb\nccc");
    }

    #[test]
    fn test_raw_keeps_lines() {
        let mut out = Output::new(" ".to_string());
        out.indent_level = 2;
        out.push_raw("x  \n  y");
        assert_eq!(out.into_string(false), "x  \n  y");
    }
}
