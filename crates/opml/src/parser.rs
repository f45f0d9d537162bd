//! OPML document parser

use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::document::Document;
use crate::error::Result;
use crate::xml::{self, XmlDocument};

/// OPML parser with configurable limits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Parser {
    config: Config,
}

impl Parser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new parser with custom configuration
    pub const fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> Config {
        self.config
    }

    /// Parse `input`, degrading anything unreadable to an empty [`Document`].
    ///
    /// The configured limits still apply: outlines nested deeper than
    /// `max_depth` are dropped with a warning and the rest of the document
    /// is kept, while input larger than `max_size` reads as empty.
    #[instrument(level = "debug", skip_all, fields(len = input.len()))]
    pub fn parse(&self, input: &str) -> Document {
        match xml::read_truncated(input, self.config) {
            Ok(tree) => build(&tree),
            Err(err) => {
                warn!(%err, "malformed OPML, treating as empty");
                Document::default()
            }
        }
    }

    /// Parse `input`, reporting XML that is not well-formed or exceeds the
    /// configured limits. Missing sections and bad dates are still not errors.
    pub fn try_parse(&self, input: &str) -> Result<Document> {
        let tree = xml::read(input, self.config)?;
        Ok(build(&tree))
    }
}

fn build(tree: &XmlDocument) -> Document {
    let document = Document::from_xml(tree);
    debug!(
        outlines = document.outlines().len(),
        title = document.title(),
        "parsed OPML document"
    );
    document
}
