use std::collections::HashMap;
use std::fmt;

use crate::input::TextInputData;
use crate::style::{Color, StyleSheet};

/// Handle to a node in a [`Document`](crate::Document) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub enum NodeKind {
    /// The document root. Exactly one per document.
    Document,
    Element(ElementData),
    Text(String),
    /// Root of an isolated tree attached to `host`. Has no parent.
    ShadowRoot { host: NodeId, styles: StyleSheet },
}

#[derive(Debug, Default)]
pub struct ElementData {
    pub tag: String,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    pub shadow_root: Option<NodeId>,
    /// Live value of an `<input>`. `None` until the value is first edited,
    /// in which case the `value` attribute is the displayed value.
    pub input: Option<TextInputData>,
    /// Custom properties (`--name`) declared on this element.
    pub custom_properties: HashMap<String, Color>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Custom elements are the tags carrying a hyphen.
    pub fn is_custom(&self) -> bool {
        self.tag.contains('-')
    }
}

#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }
}
