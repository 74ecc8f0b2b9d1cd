//! Minimal element tree built from quick-xml pull events.
//!
//! Only what document projection needs: attributes, child lookup by tag
//! name, and leading text content.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::{GigawordError, Result};
use crate::models::parse_int;

/// An XML element with its attributes, children and text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Text appearing before the first child element.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = decode(start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = decode(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn require_attr(&self, name: &'static str) -> Result<&str> {
        self.attr(name).ok_or_else(|| GigawordError::MissingAttribute {
            element: self.name.clone(),
            attribute: name,
        })
    }

    /// First child with the given tag name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn require(&self, name: &'static str) -> Result<&Element> {
        self.find(name).ok_or_else(|| GigawordError::MissingElement {
            parent: self.name.clone(),
            child: name,
        })
    }

    /// All children with the given tag name, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn children(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text of a required child, verbatim.
    pub fn child_text(&self, name: &'static str) -> Result<&str> {
        self.require(name).map(Element::text)
    }

    /// Text of a required child parsed as an integer.
    pub fn child_int<T: std::str::FromStr>(&self, name: &'static str) -> Result<T> {
        parse_int(name, self.child_text(name)?)
    }

    fn push_text(&mut self, text: &str) {
        if self.children.is_empty() {
            self.text.push_str(text);
        }
    }
}

fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| GigawordError::Xml(e.to_string()))
}

/// Parse a well-formed fragment with exactly one root element.
///
/// `keep(depth, name)` is asked about every non-root element before it is
/// built; depth is the number of open ancestors. Rejected elements are
/// skipped with their whole subtree and never materialized.
pub fn parse_fragment<F>(fragment: &str, mut keep: F) -> Result<Element>
where
    F: FnMut(usize, &str) -> bool,
{
    let mut reader = Reader::from_str(fragment);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                let depth = stack.len();
                if depth > 0 && !keep(depth, decode(start.name().as_ref())?) {
                    let name = start.name().as_ref().to_vec();
                    skip_buf.clear();
                    reader.read_to_end_into(QName(&name), &mut skip_buf)?;
                } else {
                    stack.push(Element::from_start(&start)?);
                }
            }
            Event::Empty(start) => {
                let depth = stack.len();
                if depth == 0 || keep(depth, decode(start.name().as_ref())?) {
                    let element = Element::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| GigawordError::Xml("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(decode(&data)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(GigawordError::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| GigawordError::Xml("no root element".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(GigawordError::Xml("multiple root elements".to_string())),
    }
    Ok(())
}
