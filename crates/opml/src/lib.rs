//! opml - a lenient OPML parser
//!
//! Parses an OPML document into its head metadata and an immutable tree of
//! outlines. Real-world OPML is often incomplete or slightly broken, so the
//! main entry point never fails: anything it cannot read comes back as an
//! absent field or an empty outline list.
//!
//! # Quick Start
//!
//! ```
//! let doc = opml::parse(
//!     r#"<opml version="2.0">
//!          <head><title>Feeds</title></head>
//!          <body>
//!            <outline text="News">
//!              <outline text="Example" type="rss" xmlUrl="https://example.com/feed"/>
//!            </outline>
//!          </body>
//!        </opml>"#,
//! );
//! assert_eq!(doc.title(), Some("Feeds"));
//! assert_eq!(doc.outlines().len(), 1);
//!
//! let texts: Vec<String> = doc.flatten().iter().map(|o| o.to_string()).collect();
//! assert_eq!(texts, ["News", "Example"]);
//!
//! assert_eq!(opml::parse("").outlines().len(), 0);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub use config::Config;

pub mod date;
pub use date::parse_date;

pub mod document;
pub use document::{Document, Head};

pub mod error;
pub use error::{Error, ErrorKind, Result};

pub mod outline;
pub use outline::{Iter, Outline};

pub mod parser;
pub use parser::Parser;

pub mod xml;

/// Parse an OPML document, never failing.
///
/// Uses [`Config::default`]: outlines nested deeper than its `max_depth` are
/// dropped, and input over its `max_size` reads as an empty document. See
/// [`parse_with_config`] to change the limits.
pub fn parse(input: &str) -> Document {
    Parser::new().parse(input)
}

/// Parse with custom limits, never failing
pub fn parse_with_config(input: &str, config: Config) -> Document {
    Parser::with_config(config).parse(input)
}

/// Parse an OPML document, reporting malformed XML
pub fn try_parse(input: &str) -> Result<Document> {
    Parser::new().try_parse(input)
}
