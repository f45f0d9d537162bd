//! Thin adapter over `quick-xml` that produces an owned element tree

pub mod model;
pub mod reader;

pub use model::{Content, Element, XmlDocument};
pub use reader::{read, read_truncated};
