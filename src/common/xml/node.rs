//! A small owned XML tree.
//!
//! Renderers build [`XmlElement`] fragments and hand them to a parent; the
//! packaging layer serializes the finished part. Names are stored with their
//! prefix (`w:p`), and the prefix is bound once on the serialized root.
use std::borrow::Cow;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use smallvec::SmallVec;

use crate::common::{Error, Result};

/// Namespace bound to the `w:` prefix.
pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

type Name = Cow<'static, str>;

/// A node in the tree: an element or a run of character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: Name,
    attributes: SmallVec<[(Name, String); 4]>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute, builder style.
    #[inline]
    pub fn with_attr(mut self, key: impl Into<Name>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Add a numeric attribute, builder style.
    #[inline]
    pub fn with_num(self, key: impl Into<Name>, value: u32) -> Self {
        let mut buf = itoa::Buffer::new();
        let formatted = buf.format(value).to_string();
        self.with_attr(key, formatted)
    }

    /// Add a child element, builder style.
    #[inline]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.append(child);
        self
    }

    /// Add a character-data child, builder style.
    #[inline]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.append_text(text);
        self
    }

    /// Set an attribute, replacing any previous value for the same key.
    pub fn set_attr(&mut self, key: impl Into<Name>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn append(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    pub fn append_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Take the children out, consuming the element.
    pub fn into_children(self) -> Vec<XmlNode> {
        self.children
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = XmlElement>) {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child elements, skipping character data.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name() == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.name() == name)
    }

    /// All descendant elements with the given name, in document order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in self.elements() {
            if child.name() == name {
                found.push(child);
            }
            child.collect_named(name, found);
        }
    }

    /// Concatenated character data of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Element(e) => e.collect_text(out),
                XmlNode::Text(t) => out.push_str(t),
            }
        }
    }

    /// Write this element and its subtree.
    pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        self.write_with_ns(writer, false)
    }

    fn write_with_ns<W: Write>(&self, writer: &mut Writer<W>, declare_ns: bool) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_ref());
        if declare_ns {
            start.push_attribute(("xmlns:w", WORDML_NS));
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_ref(), value.as_str()));
        }

        if self.children.is_empty() {
            return emit(writer, Event::Empty(start));
        }

        emit(writer, Event::Start(start))?;
        for node in &self.children {
            match node {
                XmlNode::Element(e) => e.write_with_ns(writer, false)?,
                XmlNode::Text(t) => emit(writer, Event::Text(BytesText::new(t)))?,
            }
        }
        emit(writer, Event::End(BytesEnd::new(self.name.as_ref())))
    }

    /// Serialize the subtree as a fragment (no declaration, no namespace binding).
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// Serialize as a standalone part: XML declaration plus `xmlns:w` on this element.
    pub fn to_part_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
        )?;
        self.write_with_ns(&mut writer, true)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}
