use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::custom::{Constructor, CustomElement, Reaction};
use crate::dispatch::Registration;
use crate::error::DomError;
use crate::node::{ElementData, Node, NodeId, NodeKind};
use crate::style::{Color, StyleSheet};

/// Tags that may host a shadow root besides custom elements.
const SHADOW_HOST_TAGS: &[&str] = &[
    "article", "aside", "blockquote", "body", "div", "footer", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "main", "nav", "p", "section", "span",
];

/// Arena of nodes plus the platform state attached to them.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    styles: StyleSheet,
    pub(crate) definitions: HashMap<String, Rc<Constructor>>,
    pub(crate) elements: HashMap<NodeId, Rc<RefCell<Box<dyn CustomElement>>>>,
    pub(crate) reactions: VecDeque<Reaction>,
    pub(crate) flushing: bool,
    pub(crate) listeners: HashMap<NodeId, Vec<Registration>>,
    pub(crate) next_listener: u64,
    pub(crate) focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
            root: NodeId(0),
            styles: StyleSheet::new(),
            definitions: HashMap::new(),
            elements: HashMap::new(),
            reactions: VecDeque::new(),
            flushing: false,
            listeners: HashMap::new(),
            next_listener: 0,
            focused: None,
        }
    }

    /// The document node. Everything reachable from here is connected.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::NodeNotFound(id))
    }

    pub fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        self.node(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a detached element. Defined custom elements are upgraded
    /// immediately.
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let tag = tag.to_ascii_lowercase();
        if !is_valid_tag(&tag) {
            return Err(DomError::InvalidTagName(tag));
        }
        let id = self.push(NodeKind::Element(ElementData::new(tag.clone())));
        if self.definitions.contains_key(&tag) {
            self.upgrade(id)?;
            self.flush_reactions()?;
        }
        Ok(id)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    /// Attach an open shadow root to `host` and return it.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, DomError> {
        let element = self.element(host)?;
        if element.shadow_root.is_some() {
            return Err(DomError::ShadowRootExists(host));
        }
        if !element.is_custom() && !SHADOW_HOST_TAGS.contains(&element.tag.as_str()) {
            return Err(DomError::ShadowRootUnsupported(element.tag.clone()));
        }
        let shadow = self.push(NodeKind::ShadowRoot {
            host,
            styles: StyleSheet::new(),
        });
        self.element_mut(host)?.shadow_root = Some(shadow);
        log::trace!("attached shadow root {shadow} to {host}");
        Ok(shadow)
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Append `child` to `parent`, moving it if it already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        match self.node(parent)?.kind {
            NodeKind::Text(_) => return Err(DomError::NotAContainer(parent)),
            NodeKind::Element(_) | NodeKind::Document | NodeKind::ShadowRoot { .. } => {}
        }
        match self.node(child)?.kind {
            NodeKind::Document | NodeKind::ShadowRoot { .. } => {
                return Err(DomError::Hierarchy {
                    parent,
                    child,
                    reason: "node type cannot be inserted",
                });
            }
            NodeKind::Element(_) | NodeKind::Text(_) => {}
        }
        if self.composed_ancestors(parent).any(|a| a == child) {
            return Err(DomError::Hierarchy {
                parent,
                child,
                reason: "child is an ancestor of parent",
            });
        }

        if let Some(old_parent) = self.node(child)?.parent {
            self.detach(old_parent, child)?;
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);

        if self.is_connected(child) {
            for node in self.shadow_including_descendants(child) {
                if self.elements.contains_key(&node) {
                    self.reactions.push_back(Reaction::Connected(node));
                }
            }
        }
        self.flush_reactions()
    }

    /// Remove `child` from `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(parent, child)?;
        self.flush_reactions()
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let was_connected = self.is_connected(child);
        self.node_mut(parent)?.children.retain(|c| *c != child);
        self.node_mut(child)?.parent = None;

        if was_connected {
            if let Some(focused) = self.focused {
                if self.composed_ancestors(focused).any(|a| a == child) || focused == child {
                    self.focused = None;
                }
            }
            for node in self.shadow_including_descendants(child) {
                if self.elements.contains_key(&node) {
                    self.reactions.push_back(Reaction::Disconnected(node));
                }
            }
        }
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children()).unwrap_or(&[])
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.nodes
            .get(id.0)
            .and_then(|n| n.as_element())
            .map(|e| e.tag.as_str())
    }

    /// Text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(current) => {
                *current = text.into();
                Ok(())
            }
            _ => Err(DomError::NotAText(id)),
        }
    }

    /// Concatenated text of all light-tree descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.text(id) {
            out.push_str(text);
            return;
        }
        for child in self.children(id) {
            self.collect_text(*child, out);
        }
    }

    /// The root of the tree `id` lives in: the document, a shadow root, or
    /// the top of a detached subtree.
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Parent in the composed tree: a shadow root's parent is its host.
    pub fn composed_parent(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id.0)?;
        match (&node.kind, node.parent) {
            (_, Some(parent)) => Some(parent),
            (NodeKind::ShadowRoot { host, .. }, None) => Some(*host),
            _ => None,
        }
    }

    /// Ancestors of `id` in the composed tree, nearest first, excluding `id`.
    pub fn composed_ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.composed_parent(id), move |n| self.composed_parent(*n))
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root || self.composed_ancestors(id).any(|a| a == self.root)
    }

    /// `id` and its descendants in tree order, entering shadow roots before
    /// light children.
    pub fn shadow_including_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in self.children(node).iter().rev() {
                stack.push(*child);
            }
            if let Some(shadow) = self.shadow_root(node) {
                stack.push(shadow);
            }
        }
        out
    }

    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.nodes
            .get(host.0)
            .and_then(|n| n.as_element())
            .and_then(|e| e.shadow_root)
    }

    /// Host of a shadow root.
    pub fn host(&self, shadow: NodeId) -> Option<NodeId> {
        match &self.nodes.get(shadow.0)?.kind {
            NodeKind::ShadowRoot { host, .. } => Some(*host),
            _ => None,
        }
    }

    /// The shadow host whose tree contains `id`, if any.
    pub fn containing_host(&self, id: NodeId) -> Option<NodeId> {
        self.host(self.tree_root(id))
    }

    /// First light-tree descendant with the given tag, in tree order.
    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        if self.tag(root) == Some(tag) {
            return Some(root);
        }
        self.children(root)
            .iter()
            .find_map(|child| self.find_by_tag(*child, tag))
    }

    /// First element in `host`'s shadow tree exposing `part`.
    pub fn query_part(&self, host: NodeId, part: &str) -> Option<NodeId> {
        let shadow = self.shadow_root(host)?;
        self.descendants(shadow).into_iter().find(|node| {
            self.attribute(*node, "part")
                .is_some_and(|parts| parts.split_whitespace().any(|p| p == part))
        })
    }

    /// Light-tree descendants of `id`, including `id`, in tree order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in self.children(node).iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    // =========================================================================
    // Slots
    // =========================================================================

    /// Light children of the host projected into `slot`. Only the default
    /// slot is supported, so every host child without a `slot` attribute is
    /// assigned to the first unnamed slot of the shadow tree.
    pub fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        if self.tag(slot) != Some("slot") || self.attribute(slot, "name").is_some() {
            return Vec::new();
        }
        let Some(host) = self.containing_host(slot) else {
            return Vec::new();
        };
        let first_slot = self
            .shadow_root(host)
            .and_then(|shadow| {
                self.descendants(shadow).into_iter().find(|n| {
                    self.tag(*n) == Some("slot") && self.attribute(*n, "name").is_none()
                })
            });
        if first_slot != Some(slot) {
            return Vec::new();
        }

        self.children(host)
            .iter()
            .copied()
            .filter(|child| match self.text(*child) {
                Some(text) => !text.trim().is_empty(),
                None => self.attribute(*child, "slot").is_none(),
            })
            .collect()
    }

    /// Text a slot displays: its assigned nodes, or its fallback content.
    pub fn slot_text(&self, slot: NodeId) -> String {
        let assigned = self.assigned_nodes(slot);
        let text = if assigned.is_empty() {
            self.text_content(slot)
        } else {
            assigned.iter().map(|n| self.text_content(*n)).collect()
        };
        text.trim().to_string()
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(id.0)?.as_element()?.attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn attribute_names(&self, id: NodeId) -> Vec<&str> {
        self.nodes
            .get(id.0)
            .and_then(|n| n.as_element())
            .map(|e| e.attributes.iter().map(|(n, _)| n.as_str()).collect())
            .unwrap_or_default()
    }

    /// Set an attribute. Upgraded custom elements observing `name` get an
    /// `attribute_changed` callback, even when the value is unchanged.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || "\"'>/=".contains(c)) {
            return Err(DomError::InvalidAttributeName(name));
        }
        let value = value.into();
        let element = self.element_mut(id)?;
        let old = match element.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, current)) => Some(std::mem::replace(current, value.clone())),
            None => {
                element.attributes.push((name.clone(), value.clone()));
                None
            }
        };
        self.enqueue_attribute_changed(id, name, old, Some(value));
        self.flush_reactions()
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(id)?;
        let Some(index) = element.attributes.iter().position(|(n, _)| *n == name) else {
            return Ok(false);
        };
        let (_, old) = element.attributes.remove(index);
        self.enqueue_attribute_changed(id, name, Some(old), None);
        self.flush_reactions()?;
        Ok(true)
    }

    // =========================================================================
    // Styling
    // =========================================================================

    /// The document-level stylesheet. Its tag rules never match inside
    /// shadow trees; its part rules style elements exported by shadow hosts.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleSheet {
        &mut self.styles
    }

    /// The stylesheet scoped to the tree rooted at `root`.
    pub fn scope_styles(&self, root: NodeId) -> Option<&StyleSheet> {
        match &self.nodes.get(root.0)?.kind {
            NodeKind::Document => Some(&self.styles),
            NodeKind::ShadowRoot { styles, .. } => Some(styles),
            _ => None,
        }
    }

    pub fn shadow_styles_mut(&mut self, shadow: NodeId) -> Result<&mut StyleSheet, DomError> {
        match &mut self.node_mut(shadow)?.kind {
            NodeKind::ShadowRoot { styles, .. } => Ok(styles),
            _ => Err(DomError::NotAShadowRoot(shadow)),
        }
    }

    /// Declare a custom property on an element. Descendants, including those
    /// inside shadow trees, inherit it.
    pub fn set_custom_property(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        color: Color,
    ) -> Result<(), DomError> {
        self.element_mut(id)?
            .custom_properties
            .insert(name.into(), color);
        Ok(())
    }

    /// Look up a custom property on `id` or its nearest composed ancestor.
    pub fn custom_property(&self, id: NodeId, name: &str) -> Option<&Color> {
        std::iter::once(id)
            .chain(self.composed_ancestors(id))
            .filter_map(|n| self.nodes.get(n.0).and_then(|n| n.as_element()))
            .find_map(|e| e.custom_properties.get(name))
    }

    /// Elements of the document arena with the given tag, in creation order.
    pub(crate) fn elements_with_tag(&self, tag: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.as_element().is_some_and(|e| e.tag == tag))
            .map(|(i, _)| NodeId(i))
            .collect()
    }
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
