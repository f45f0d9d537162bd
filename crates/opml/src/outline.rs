//! Outline nodes and pre-order traversal

use std::fmt;

use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::date::parse_date;
use crate::xml::Element;

/// A single `<outline>` element and everything nested under it.
///
/// Nodes are built once by the parser and never change afterwards; every
/// accessor hands out shared borrows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Outline {
    name: String,
    attributes: IndexMap<String, String>,
    outlines: Vec<Outline>,
}

impl Outline {
    /// Build a node from an element, recursing into its element children.
    /// Text between child elements is not part of an outline.
    pub(crate) fn from_element(element: &Element) -> Self {
        Self {
            name: element.name.clone(),
            attributes: element.attributes.clone(),
            outlines: element.elements().map(Self::from_element).collect(),
        }
    }

    /// Tag name as written, normally `outline`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every attribute of the element, in declaration order
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Look up any attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Direct children in document order
    pub fn outlines(&self) -> &[Self] {
        &self.outlines
    }

    pub fn is_leaf(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn text(&self) -> Option<&str> {
        self.attribute("text")
    }

    pub fn title(&self) -> Option<&str> {
        self.attribute("title")
    }

    /// The `type` attribute (`rss`, `link`, `include`, ...)
    pub fn kind(&self) -> Option<&str> {
        self.attribute("type")
    }

    pub fn xml_url(&self) -> Option<&str> {
        self.attribute("xmlUrl")
    }

    pub fn html_url(&self) -> Option<&str> {
        self.attribute("htmlUrl")
    }

    pub fn url(&self) -> Option<&str> {
        self.attribute("url")
    }

    pub fn description(&self) -> Option<&str> {
        self.attribute("description")
    }

    pub fn language(&self) -> Option<&str> {
        self.attribute("language")
    }

    /// Comma-separated category paths such as `/Boston/Weather`
    pub fn category(&self) -> Vec<&str> {
        self.attribute("category")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|path| !path.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The `created` attribute; unparseable dates read as absent
    pub fn created(&self) -> Option<OffsetDateTime> {
        self.attribute("created").and_then(parse_date)
    }

    pub fn is_comment(&self) -> bool {
        self.flag("isComment")
    }

    pub fn is_breakpoint(&self) -> bool {
        self.flag("isBreakpoint")
    }

    fn flag(&self, name: &str) -> bool {
        self.attribute(name)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }

    /// Pre-order iterator over this node and all its descendants
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(std::slice::from_ref(self))
    }

    /// This node followed by all its descendants, depth first
    pub fn flatten(&self) -> Vec<&Self> {
        self.iter().collect()
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text().unwrap_or_default())
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a Outline;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first pre-order iterator over a forest of outlines
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Outline>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(roots: &'a [Outline]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Outline;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.outlines.iter().rev());
        Some(node)
    }
}
