//! XML data model

use indexmap::IndexMap;

/// XML document. `root` is `None` for empty input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlDocument {
    pub root: Option<Element>,
}

/// XML element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name without any namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Direct element children in document order
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|content| match content {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// First direct child with the given local name
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.local_name() == name)
    }

    /// First element with the given local name, searching this element and
    /// then its descendants in document order
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.local_name() == name {
            return Some(self);
        }
        self.elements().find_map(|element| element.find(name))
    }

    /// Concatenated direct text content with surrounding whitespace removed
    pub fn text(&self) -> String {
        let text: String = self
            .children
            .iter()
            .filter_map(|content| match content {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect();
        text.trim().to_string()
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut title = Element::new("title");
        title.children.push(Content::Text("  Feeds ".to_string()));

        let mut head = Element::new("head");
        head.children.push(Content::Element(title));

        let mut body = Element::new("body");
        body.children.push(Content::Element(Element::new("opml:head")));

        let mut root = Element::new("opml");
        root.children.push(Content::Text("\n".to_string()));
        root.children.push(Content::Element(head));
        root.children.push(Content::Element(body));
        root
    }

    #[test]
    fn test_local_name_strips_prefix() {
        assert_eq!(Element::new("opml:outline").local_name(), "outline");
        assert_eq!(Element::new("outline").local_name(), "outline");
    }

    #[test]
    fn test_elements_skip_text() {
        let root = sample();
        let names: Vec<&str> = root.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["head", "body"]);
    }

    #[test]
    fn test_child_and_text() {
        let root = sample();
        let title = root.child("head").and_then(|head| head.child("title"));
        assert_eq!(title.map(Element::text).as_deref(), Some("Feeds"));
        assert!(root.child("title").is_none());
    }

    #[test]
    fn test_find_is_preorder() {
        let root = sample();
        assert_eq!(root.find("opml").map(|e| e.name.as_str()), Some("opml"));
        // The real <head> comes before the prefixed one nested in <body>
        assert_eq!(root.find("head").map(|e| e.name.as_str()), Some("head"));
        assert!(root.find("missing").is_none());
    }
}
