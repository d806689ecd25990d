//! HTML tokenizer for the beautifier
//!
//! Splits markup into tags, comments, directives and whitespace-separated
//! words, recording the whitespace that preceded each token. The content of
//! verbatim elements is returned as a single raw token. Anything that does
//! not look like a tag is treated as text, so the tokenizer never fails.

/// What a token is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `<name ...>` or `<name ... />`
    StartTag {
        name: String,
        raw: &'a str,
        self_closing: bool,
    },
    /// `</name>`
    EndTag { name: String, raw: &'a str },
    /// `<!-- ... -->`
    Comment(&'a str),
    /// `<!DOCTYPE ...>`, `<![CDATA[...]]>`, `<?...?>`
    Directive(&'a str),
    /// A run of non-whitespace text
    Word(&'a str),
    /// Verbatim content of an element
    Raw(&'a str),
}

/// A token plus the whitespace seen before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Line feeds in the whitespace before this token
    pub newlines: usize,
    /// Whether any whitespace preceded this token
    pub whitespace_before: bool,
}

impl Token<'_> {
    pub fn is_text(&self) -> bool {
        matches!(self.kind, TokenKind::Word(_))
    }
}

/// Streaming tokenizer over a markup string.
///
/// `is_verbatim` decides which elements have their content emitted as a
/// single [`TokenKind::Raw`] token.
pub struct Tokenizer<'a, F> {
    source: &'a str,
    pos: usize,
    is_verbatim: F,
    /// End tag position and raw content waiting to be emitted
    pending_raw: Option<(usize, usize)>,
}

impl<'a, F> Tokenizer<'a, F>
where
    F: Fn(&str) -> bool,
{
    pub fn new(source: &'a str, is_verbatim: F) -> Self {
        Self {
            source,
            pos: 0,
            is_verbatim,
            pending_raw: None,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    /// Consume whitespace, returning (any whitespace, line feed count).
    fn skip_whitespace(&mut self) -> (bool, usize) {
        let bytes = self.bytes();
        let start = self.pos;
        let mut newlines = 0;
        while self.pos < bytes.len() && is_html_whitespace(bytes[self.pos]) {
            if bytes[self.pos] == b'\n' {
                newlines += 1;
            }
            self.pos += 1;
        }
        (self.pos > start, newlines)
    }

    fn read_comment(&mut self) -> TokenKind<'a> {
        let start = self.pos;
        let end = find_from(self.source, start + 4, "-->")
            .map(|i| i + 3)
            .unwrap_or(self.source.len());
        self.pos = end;
        TokenKind::Comment(&self.source[start..end])
    }

    fn read_directive(&mut self) -> TokenKind<'a> {
        let start = self.pos;
        let terminator = if self.source[start..].starts_with("<![CDATA[") {
            "]]>"
        } else {
            ">"
        };
        let end = find_from(self.source, start + 2, terminator)
            .map(|i| i + terminator.len())
            .unwrap_or(self.source.len());
        self.pos = end;
        TokenKind::Directive(&self.source[start..end])
    }

    fn read_end_tag(&mut self) -> Option<TokenKind<'a>> {
        let start = self.pos;
        let end = find_from(self.source, start + 2, ">")? + 1;
        let raw = &self.source[start..end];
        self.pos = end;
        Some(TokenKind::EndTag {
            name: tag_name(&raw[2..]),
            raw,
        })
    }

    fn read_start_tag(&mut self) -> Option<TokenKind<'a>> {
        let start = self.pos;
        let end = find_tag_end(self.bytes(), start + 1)? + 1;
        let raw = &self.source[start..end];
        let name = tag_name(&raw[1..]);
        let self_closing = raw.ends_with("/>");
        self.pos = end;

        if !self_closing && (self.is_verbatim)(&name) {
            let close = find_matching_close(self.source, end, &name).unwrap_or(self.source.len());
            self.pending_raw = Some((end, close));
        }

        Some(TokenKind::StartTag {
            name,
            raw,
            self_closing,
        })
    }

    fn read_word(&mut self) -> TokenKind<'a> {
        let bytes = self.bytes();
        let start = self.pos;
        // Always consume at least one character so a stray '<' makes progress
        let first_len = self.source[start..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        self.pos += first_len;
        while self.pos < bytes.len()
            && !is_html_whitespace(bytes[self.pos])
            && bytes[self.pos] != b'<'
        {
            self.pos += 1;
        }
        TokenKind::Word(&self.source[start..self.pos])
    }

    fn read_markup(&mut self) -> TokenKind<'a> {
        let rest = &self.source[self.pos..];
        let next = rest.as_bytes().get(1).copied();
        if rest.starts_with("<!--") {
            return self.read_comment();
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            return self.read_directive();
        }
        if rest.starts_with("</") {
            if let Some(b) = rest.as_bytes().get(2) {
                if b.is_ascii_alphabetic() {
                    if let Some(kind) = self.read_end_tag() {
                        return kind;
                    }
                }
            }
        } else if next.is_some_and(|b| b.is_ascii_alphabetic()) {
            if let Some(kind) = self.read_start_tag() {
                return kind;
            }
        }
        self.read_word()
    }
}

impl<'a, F> Iterator for Tokenizer<'a, F>
where
    F: Fn(&str) -> bool,
{
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((start, end)) = self.pending_raw.take() {
            self.pos = end;
            if end > start {
                return Some(Token {
                    kind: TokenKind::Raw(&self.source[start..end]),
                    newlines: 0,
                    whitespace_before: false,
                });
            }
        }

        let (whitespace_before, newlines) = self.skip_whitespace();
        if self.pos >= self.source.len() {
            return None;
        }

        let kind = if self.bytes()[self.pos] == b'<' {
            self.read_markup()
        } else {
            self.read_word()
        };

        Some(Token {
            kind,
            newlines,
            whitespace_before,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanning helpers
// ─────────────────────────────────────────────────────────────────────────────

fn is_html_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

fn find_from(source: &str, from: usize, needle: &str) -> Option<usize> {
    source.get(from..)?.find(needle).map(|i| i + from)
}

/// Lowercased element name at the start of `s`.
fn tag_name(s: &str) -> String {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_'))
        .map(|b| b.to_ascii_lowercase() as char)
        .collect()
}

/// Index of the `>` closing a start tag, skipping quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

fn is_name_boundary(b: Option<&u8>) -> bool {
    match b {
        None => true,
        Some(b) => is_html_whitespace(*b) || matches!(b, b'>' | b'/'),
    }
}

/// Position of the `</name` that closes an element opened just before
/// `from`, accounting for nested elements of the same name.
fn find_matching_close(source: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let name = name.as_bytes();
    let mut depth = 1usize;
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        let closing = bytes.get(i + 1) == Some(&b'/');
        let name_start = if closing { i + 2 } else { i + 1 };
        let name_end = name_start + name.len();
        let matches_name = bytes
            .get(name_start..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            && is_name_boundary(bytes.get(name_end));
        if matches_name {
            if closing {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            } else {
                depth += 1;
            }
        }
        i += 1;
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind<'_>> {
        Tokenizer::new(source, |name: &str| name == "em" || name == "script")
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        assert!(kinds("").is_empty());
        assert!(kinds(" \n\t ").is_empty());
    }

    #[test]
    fn test_tags_and_words() {
        let tokens = kinds("<p>hello world</p>");
        assert_eq!(tokens.len(), 4);
        assert!(matches!(&tokens[0], TokenKind::StartTag { name, .. } if name == "p"));
        assert_eq!(tokens[1], TokenKind::Word("hello"));
        assert_eq!(tokens[2], TokenKind::Word("world"));
        assert!(matches!(
            &tokens[3],
            TokenKind::EndTag { name, raw } if name == "p" && *raw == "</p>"
        ));
    }

    #[test]
    fn test_newline_counting() {
        let tokens: Vec<_> = Tokenizer::new("a\n\n b c", |_: &str| false).collect();
        assert_eq!(tokens[0].newlines, 0);
        assert!(!tokens[0].whitespace_before);
        assert_eq!(tokens[1].newlines, 2);
        assert!(tokens[1].whitespace_before);
        assert_eq!(tokens[2].newlines, 0);
        assert!(tokens[2].whitespace_before);
    }

    #[test]
    fn test_self_closing_and_uppercase() {
        let tokens = kinds("<BR /><Img src=\"a.png\">");
        assert!(matches!(
            &tokens[0],
            TokenKind::StartTag { name, self_closing: true, .. } if name == "br"
        ));
        assert!(matches!(
            &tokens[1],
            TokenKind::StartTag { name, self_closing: false, .. } if name == "img"
        ));
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        let tokens = kinds("<a title=\"x > y\">link</a>");
        assert!(matches!(
            &tokens[0],
            TokenKind::StartTag { raw, .. } if *raw == "<a title=\"x > y\">"
        ));
        assert_eq!(tokens[1], TokenKind::Word("link"));
    }

    #[test]
    fn test_verbatim_content_is_raw() {
        let tokens = kinds("<em>a  <b>c</b>\n d</em>");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], TokenKind::Raw("a  <b>c</b>\n d"));
        assert!(matches!(&tokens[2], TokenKind::EndTag { name, .. } if name == "em"));
    }

    #[test]
    fn test_verbatim_nested_same_element() {
        let tokens = kinds("<em>a <em>b</em> c</em>");
        assert_eq!(tokens[1], TokenKind::Raw("a <em>b</em> c"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_verbatim_unclosed_takes_rest() {
        let tokens = kinds("<em>dangling <p>");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], TokenKind::Raw("dangling <p>"));
    }

    #[test]
    fn test_empty_verbatim_content() {
        let tokens = kinds("<em></em>");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_comment_and_doctype() {
        let tokens = kinds("<!DOCTYPE html><!-- a <b> -->");
        assert_eq!(tokens[0], TokenKind::Directive("<!DOCTYPE html>"));
        assert_eq!(tokens[1], TokenKind::Comment("<!-- a <b> -->"));
    }

    #[test]
    fn test_stray_angle_brackets_are_text() {
        let tokens = kinds("1 < 2 <3 <");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Word("1"),
                TokenKind::Word("<"),
                TokenKind::Word("2"),
                TokenKind::Word("<3"),
                TokenKind::Word("<"),
            ]
        );
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        let tokens = kinds("<div class=\"x");
        assert!(tokens.iter().all(|t| matches!(t, TokenKind::Word(_))));
    }

    #[test]
    fn test_multibyte_text() {
        let tokens = kinds("漢字 <ruby>かな</ruby>");
        assert_eq!(tokens[0], TokenKind::Word("漢字"));
    }
}
