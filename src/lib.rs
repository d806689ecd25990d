//! htmlsmith - text and Markdown to tidy HTML
//!
//! Converts free-form text into consistently formatted HTML. Input is either
//! interpreted as Markdown ([`Mode::Rich`]) or split into paragraphs on blank
//! lines ([`Mode::Plain`]); the resulting markup is then pretty-printed with
//! deterministic whitespace.
//!
//! ```
//! use htmlsmith::{convert_text_to_html, Mode};
//!
//! assert_eq!(convert_text_to_html("# Hi", Mode::Rich), "<h1>Hi</h1>\n");
//! assert_eq!(convert_text_to_html("a\n\nb", Mode::Plain), "<p>a</p>\n<p>b</p>\n");
//! ```

pub mod clipboard;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod markdown;
pub mod structure;

pub use convert::{convert_text_to_html, Converter};
pub use error::{Error, Result};
pub use structure::Mode;
