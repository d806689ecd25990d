//! Text to HTML conversion
//!
//! Runs the two-stage pipeline: [`structure`] turns the raw text into raw
//! HTML according to the [`Mode`], then a [`MarkupFormatter`] lays it out.
//! Both stages are pure; a converter can be reused for any number of calls.

use log::debug;

use crate::format::{FormatOptions, HtmlBeautifier, MarkupFormatter};
use crate::markdown::{ComrakParser, MarkdownOptions, MarkupParser};
use crate::structure::{structure, Mode};

/// Text to HTML converter over a parser and a formatter.
#[derive(Debug, Clone, Default)]
pub struct Converter<P = ComrakParser, F = HtmlBeautifier> {
    parser: P,
    formatter: F,
}

impl Converter {
    /// Converter backed by comrak and the built-in beautifier.
    pub fn with_options(markdown: &MarkdownOptions, format: FormatOptions) -> Self {
        Self {
            parser: ComrakParser::new(markdown),
            formatter: HtmlBeautifier::new(format),
        }
    }
}

impl<P, F> Converter<P, F>
where
    P: MarkupParser,
    F: MarkupFormatter,
{
    /// Build a converter from custom capabilities.
    pub fn new(parser: P, formatter: F) -> Self {
        Self { parser, formatter }
    }

    /// Convert `text` to formatted HTML.
    ///
    /// Never fails: any string yields a best-effort result.
    pub fn convert(&self, text: &str, mode: Mode) -> String {
        let markup = structure(text, mode, &self.parser);
        let html = self.formatter.format(&markup);
        debug!(
            "converted {} bytes in {} mode to {} bytes",
            text.len(),
            mode.label(),
            html.len()
        );
        html
    }
}

/// Convert `text` to formatted HTML with the default configuration.
///
/// `Mode::Rich` interprets Markdown; `Mode::Plain` wraps blank-line separated
/// paragraphs. Accepts `bool` through `Mode::from` as well.
pub fn convert_text_to_html(text: &str, mode: impl Into<Mode>) -> String {
    let converter: Converter = Converter::default();
    converter.convert(text, mode.into())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseParser;

    impl MarkupParser for UppercaseParser {
        fn parse_to_html(&self, source: &str) -> String {
            format!("<div>{}</div>", source.to_uppercase())
        }
    }

    struct Identity;

    impl MarkupFormatter for Identity {
        fn format(&self, markup: &str) -> String {
            markup.to_string()
        }
    }

    #[test]
    fn test_empty_input_both_modes() {
        assert_eq!(convert_text_to_html("", true), "\n");
        assert_eq!(convert_text_to_html("", false), "\n");
    }

    #[test]
    fn test_blank_runs_match_empty_input() {
        assert_eq!(
            convert_text_to_html("\n\n\n\n", false),
            convert_text_to_html("", false)
        );
    }

    #[test]
    fn test_plain_paragraph_splitting() {
        assert_eq!(
            convert_text_to_html("a\n\nb", Mode::Plain),
            "<p>a</p>\n<p>b</p>\n"
        );
    }

    #[test]
    fn test_plain_soft_break() {
        assert_eq!(
            convert_text_to_html("line1\nline2", Mode::Plain),
            "<p>line1<br>\nline2</p>\n"
        );
    }

    #[test]
    fn test_plain_no_break_space_paragraph_discarded() {
        assert_eq!(
            convert_text_to_html("a\n\n\u{00A0}\n\nb", false),
            convert_text_to_html("a\n\n   \n\nb", false)
        );
        assert_eq!(convert_text_to_html("\u{00A0}", false), "\n");
    }

    #[test]
    fn test_mode_divergence() {
        assert_eq!(convert_text_to_html("# Title", true), "<h1>Title</h1>\n");
        assert_eq!(convert_text_to_html("# Title", false), "<p># Title</p>\n");
    }

    #[test]
    fn test_rich_soft_break_becomes_line_break() {
        let html = convert_text_to_html("line1\nline2", Mode::Rich);
        assert_eq!(html, "<p>line1<br />\nline2</p>\n");
    }

    #[test]
    fn test_rich_document() {
        let html = convert_text_to_html(
            "# Title\n\nSome **bold** and *soft*\ntext.\n\n- one\n- two\n",
            Mode::Rich,
        );
        assert_eq!(
            html,
            "<h1>Title</h1>\n\
             <p>Some <strong>bold</strong> and <em>soft</em><br />\n\
             text.</p>\n\
             <ul>\n\
             <li>one</li>\n\
             <li>two</li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn test_rich_ruby_passthrough() {
        let html = convert_text_to_html("<ruby>漢<rt>かん</rt></ruby>字", Mode::Rich);
        assert!(html.contains("<ruby>漢<rt>かん</rt></ruby>字"));
    }

    #[test]
    fn test_rich_malformed_markdown_is_literal() {
        let html = convert_text_to_html("**unclosed and `tick", Mode::Rich);
        assert!(html.contains("**unclosed"));
        assert!(html.ends_with('\n'));
    }

    #[test]
    fn test_totality_on_odd_inputs() {
        let inputs = [
            "",
            "\0\u{1}\u{7f}",
            "<<<",
            "</p>",
            "\r\n\r\n\r\n",
            "\u{FEFF}\u{00A0}\t",
            "```\nunterminated fence",
            "> > > nested\n> quote",
            "| a |\n|---|\n",
            "🎉 emoji <b>bold",
        ];
        for input in inputs {
            for mode in [Mode::Rich, Mode::Plain] {
                let html = convert_text_to_html(input, mode);
                assert!(html.ends_with('\n'), "{:?} {:?} -> {:?}", input, mode, html);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "# a\n\nb *c*\nd";
        for mode in [Mode::Rich, Mode::Plain] {
            assert_eq!(
                convert_text_to_html(text, mode),
                convert_text_to_html(text, mode)
            );
        }
    }

    #[test]
    fn test_format_is_idempotent_on_output() {
        let beautifier = HtmlBeautifier::default();
        for (text, mode) in [
            ("# Title\n\ntext\nmore", Mode::Rich),
            ("> quote\n\n1. a\n2. b", Mode::Rich),
            ("a\n\nb\nc", Mode::Plain),
        ] {
            let once = convert_text_to_html(text, mode);
            assert_eq!(beautifier.format(&once), once);
        }
    }

    #[test]
    fn test_custom_capabilities() {
        let converter = Converter::new(UppercaseParser, Identity);
        assert_eq!(converter.convert("hi", Mode::Rich), "<div>HI</div>");
        assert_eq!(converter.convert("hi", Mode::Plain), "<p>hi</p>");
    }

    #[test]
    fn test_custom_parser_line_breaks_normalized() {
        struct BreakParser;
        impl MarkupParser for BreakParser {
            fn parse_to_html(&self, _source: &str) -> String {
                "<p>a<br>b</p>".to_string()
            }
        }
        let converter = Converter::new(BreakParser, Identity);
        assert_eq!(converter.convert("", Mode::Rich), "<p>a<br>\nb</p>");
    }

    #[test]
    fn test_with_options() {
        let converter = Converter::with_options(
            &MarkdownOptions {
                hard_breaks: false,
                ..Default::default()
            },
            FormatOptions::default(),
        );
        assert_eq!(converter.convert("a\nb", Mode::Rich), "<p>a\nb</p>\n");
    }
}
