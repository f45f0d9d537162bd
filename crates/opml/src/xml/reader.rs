//! Builds an [`XmlDocument`] from the `quick-xml` event stream

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::{Content, Element, XmlDocument};

/// Read `input` into an owned element tree.
///
/// Empty or whitespace-only input gives a document without a root. Any
/// well-formedness problem, or nesting beyond `config.max_depth`, is an
/// error; deciding what to do with it is left to the caller.
pub fn read(input: &str, config: Config) -> Result<XmlDocument> {
    config.check_size(input.len())?;
    TreeBuilder::new(input, config, false).build()
}

/// Like [`read`], but elements nested deeper than `config.max_depth` are
/// dropped together with their content instead of failing the whole read.
pub fn read_truncated(input: &str, config: Config) -> Result<XmlDocument> {
    config.check_size(input.len())?;
    TreeBuilder::new(input, config, true).build()
}

struct TreeBuilder<'a> {
    reader: Reader<&'a [u8]>,
    config: Config,
    truncate: bool,
    /// Elements opened but not yet closed
    stack: Vec<Element>,
    /// Open elements inside a subtree dropped for depth
    skipped: usize,
    root: Option<Element>,
}

impl<'a> TreeBuilder<'a> {
    fn new(input: &'a str, config: Config, truncate: bool) -> Self {
        let mut reader = Reader::from_str(input);
        // End tags are matched against `stack` in `close`
        reader.config_mut().check_end_names = false;

        Self {
            reader,
            config,
            truncate,
            stack: Vec::new(),
            skipped: 0,
            root: None,
        }
    }

    fn build(mut self) -> Result<XmlDocument> {
        loop {
            let position = self.reader.buffer_position();

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    if self.skip_element(position)? {
                        self.skipped += 1;
                        continue;
                    }
                    let element = start_element(&e)?;
                    self.stack.push(element);
                }
                Ok(Event::Empty(e)) => {
                    if self.skip_element(position)? {
                        continue;
                    }
                    let element = start_element(&e)?;
                    self.attach(element, position)?;
                }
                Ok(Event::End(_)) if self.skipped > 0 => {
                    self.skipped -= 1;
                }
                Ok(Event::End(e)) => {
                    let found = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let element = self.stack.pop().ok_or_else(|| {
                        Error::with_message(
                            ErrorKind::Xml,
                            format!("unexpected closing tag </{found}>"),
                        )
                        .at(position)
                    })?;
                    if element.name != found {
                        return Err(Error::new(ErrorKind::MismatchedEndTag {
                            expected: element.name,
                            found,
                        })
                        .at(position));
                    }
                    self.attach(element, position)?;
                }
                Ok(Event::Text(_) | Event::CData(_)) if self.skipped > 0 => {}
                Ok(Event::Text(e)) => {
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(err) => {
                            debug!(%err, "keeping text with unknown entities verbatim");
                            String::from_utf8_lossy(&e).into_owned()
                        }
                    };
                    self.push_text(text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    self.push_text(text);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(err) => {
                    return Err(Error::from(err).at(self.reader.error_position()));
                }
            }
        }

        if self.skipped > 0 {
            return Err(Error::with_message(
                ErrorKind::Xml,
                "input ended inside a dropped element",
            ));
        }
        if let Some(open) = self.stack.pop() {
            return Err(Error::new(ErrorKind::UnclosedElement { name: open.name }));
        }

        Ok(XmlDocument { root: self.root })
    }

    /// Whether the element starting at `position` lies below the depth limit
    /// and is being dropped
    fn skip_element(&self, position: u64) -> Result<bool> {
        if self.skipped > 0 {
            return Ok(true);
        }
        match self.config.check_depth(self.stack.len() + 1, position) {
            Ok(()) => Ok(false),
            Err(err) if self.truncate => {
                warn!(%err, "dropping element nested too deeply");
                Ok(true)
            }
            Err(err) => Err(err),
        }
    }

    fn attach(&mut self, element: Element, position: u64) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Content::Element(element));
            return Ok(());
        }
        if self.root.is_some() {
            return Err(Error::new(ErrorKind::MultipleRoots).at(position));
        }
        self.root = Some(element);
        Ok(())
    }

    /// Text outside the root element and whitespace between tags is dropped
    fn push_text(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Content::Text(text));
        }
    }
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = IndexMap::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(err) => {
                debug!(%err, attribute = %key, "keeping attribute value verbatim");
                String::from_utf8_lossy(&attr.value).into_owned()
            }
        };
        attributes.insert(key, value);
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}
