//! The parsed OPML document: head metadata plus the root outlines

use std::convert::Infallible;
use std::str::FromStr;

use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::date::parse_date;
use crate::outline::{Iter, Outline};
use crate::xml::{Element, XmlDocument};

/// Metadata from `<head>`.
///
/// Every child element with non-empty text is kept verbatim in
/// [`Head::field`]; the accessors below interpret the standard ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Head {
    fields: IndexMap<String, String>,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339::option"))]
    date_created: Option<OffsetDateTime>,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339::option"))]
    date_modified: Option<OffsetDateTime>,
}

impl Head {
    fn from_element(head: &Element) -> Self {
        let mut fields = IndexMap::new();
        for element in head.elements() {
            let text = element.text();
            if text.is_empty() {
                continue;
            }
            fields
                .entry(element.local_name().to_string())
                .or_insert(text);
        }

        let date_created = fields.get("dateCreated").map(String::as_str).and_then(parse_date);
        let date_modified = fields.get("dateModified").map(String::as_str).and_then(parse_date);

        Self {
            fields,
            date_created,
            date_modified,
        }
    }

    /// Raw text of any head element, standard or not
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.field("ownerName")
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.field("ownerEmail")
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.field("ownerId")
    }

    pub fn docs(&self) -> Option<&str> {
        self.field("docs")
    }

    pub const fn date_created(&self) -> Option<OffsetDateTime> {
        self.date_created
    }

    pub const fn date_modified(&self) -> Option<OffsetDateTime> {
        self.date_modified
    }

    /// Line numbers of expanded outlines; entries that are not numbers are skipped
    pub fn expansion_state(&self) -> Vec<usize> {
        self.field("expansionState")
            .map(|value| {
                value
                    .split(',')
                    .filter_map(|line| line.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn vert_scroll_state(&self) -> Option<i64> {
        self.number("vertScrollState")
    }

    pub fn window_top(&self) -> Option<i64> {
        self.number("windowTop")
    }

    pub fn window_left(&self) -> Option<i64> {
        self.number("windowLeft")
    }

    pub fn window_bottom(&self) -> Option<i64> {
        self.number("windowBottom")
    }

    pub fn window_right(&self) -> Option<i64> {
        self.number("windowRight")
    }

    fn number(&self, name: &str) -> Option<i64> {
        self.field(name).and_then(|value| value.parse().ok())
    }
}

/// A parsed OPML document.
///
/// Missing or malformed parts never make parsing fail, they just leave the
/// matching field absent; `Document::default()` is what an empty or
/// unreadable input turns into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    version: Option<String>,
    head: Head,
    outlines: Vec<Outline>,
}

impl Document {
    pub(crate) fn from_xml(xml: &XmlDocument) -> Self {
        let Some(root) = &xml.root else {
            return Self::default();
        };

        let head = section(root, "head")
            .map(Head::from_element)
            .unwrap_or_default();
        let outlines = section(root, "body")
            .map(|body| body.elements().map(Outline::from_element).collect())
            .unwrap_or_default();

        Self {
            version: root.attributes.get("version").cloned(),
            head,
            outlines,
        }
    }

    /// The `version` attribute of the root element
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn title(&self) -> Option<&str> {
        self.head.title()
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.head.owner_name()
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.head.owner_email()
    }

    pub const fn date_created(&self) -> Option<OffsetDateTime> {
        self.head.date_created()
    }

    pub const fn date_modified(&self) -> Option<OffsetDateTime> {
        self.head.date_modified()
    }

    /// Top-level outlines of `<body>` in document order
    pub fn outlines(&self) -> &[Outline] {
        &self.outlines
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    /// Pre-order iterator over every outline in the document
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.outlines)
    }

    /// Every outline in the document, depth first. The document itself is
    /// not an outline and does not appear.
    pub fn flatten(&self) -> Vec<&Outline> {
        self.iter().collect()
    }
}

impl FromStr for Document {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(crate::parse(s))
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Outline;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `<head>` or `<body>`: a direct child of the root when present, otherwise
/// the first one anywhere in the tree
fn section<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    root.child(name).or_else(|| root.find(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Content;

    fn text_element(name: &str, text: &str) -> Element {
        let mut element = Element::new(name);
        element.children.push(Content::Text(text.to_string()));
        element
    }

    fn head_of(children: Vec<Element>) -> Head {
        let mut head = Element::new("head");
        head.children
            .extend(children.into_iter().map(Content::Element));
        Head::from_element(&head)
    }

    #[test]
    fn test_head_standard_fields() {
        let head = head_of(vec![
            text_element("title", "playlist.xml"),
            text_element("ownerName", "Dave Winer"),
            text_element("expansionState", "1, 3,x,17"),
            text_element("windowTop", "164"),
            text_element("windowLeft", "wide"),
        ]);
        assert_eq!(head.title(), Some("playlist.xml"));
        assert_eq!(head.owner_name(), Some("Dave Winer"));
        assert_eq!(head.owner_email(), None);
        assert_eq!(head.expansion_state(), vec![1, 3, 17]);
        assert_eq!(head.window_top(), Some(164));
        assert_eq!(head.window_left(), None);
    }

    #[test]
    fn test_empty_head_field_is_absent() {
        let head = head_of(vec![Element::new("title"), text_element("docs", "  ")]);
        assert_eq!(head.title(), None);
        assert_eq!(head.docs(), None);
        assert!(head.fields().is_empty());
    }

    #[test]
    fn test_malformed_date_keeps_raw_field() {
        let head = head_of(vec![text_element("dateCreated", "1372185524793")]);
        assert_eq!(head.date_created(), None);
        assert_eq!(head.field("dateCreated"), Some("1372185524793"));
    }

    #[test]
    fn test_first_duplicate_head_field_wins() {
        let head = head_of(vec![
            text_element("title", "first"),
            text_element("title", "second"),
        ]);
        assert_eq!(head.title(), Some("first"));
    }

    #[test]
    fn test_no_root_is_default() {
        assert_eq!(
            Document::from_xml(&XmlDocument::default()),
            Document::default()
        );
    }
}
