//! Error types for opml
//!
//! None of these reach callers of [`crate::parse`]; they exist for the strict
//! [`crate::Parser::try_parse`] entry point and for logging.

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The XML engine rejected the input
    Xml,
    /// Input ended while an element was still open
    UnclosedElement { name: String },
    /// An end tag did not match the open element
    MismatchedEndTag { expected: String, found: String },
    /// More than one top-level element
    MultipleRoots,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => write!(f, "malformed xml"),
            Self::UnclosedElement { name } => write!(f, "unclosed element <{name}>"),
            Self::MismatchedEndTag { expected, found } => {
                write!(f, "expected </{expected}>, found </{found}>")
            }
            Self::MultipleRoots => write!(f, "multiple root elements"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// Main error type for opml
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    position: Option<u64>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            position: None,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            position: None,
            message: message.into(),
        }
    }

    /// Attach the byte offset the error was detected at
    pub fn at(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub const fn position(&self) -> Option<u64> {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "error at byte {pos}: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::with_message(ErrorKind::Xml, err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::with_message(ErrorKind::Xml, err.to_string())
    }
}

/// Result type alias for opml
pub type Result<T> = std::result::Result<T, Error>;
