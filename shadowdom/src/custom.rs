//! Custom element definitions and lifecycle reactions.

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::document::Document;
use crate::error::DomError;
use crate::node::NodeId;

/// Builds the instance backing a custom element. Runs once per element, on
/// creation or when the tag gets defined, and may attach a shadow root.
pub type Constructor = dyn Fn(&mut Document, NodeId) -> Result<Box<dyn CustomElement>, DomError>;

/// Behaviour of an upgraded custom element.
///
/// Callbacks run synchronously from the document operation that caused
/// them. Document mutations made inside a callback queue their own
/// reactions, which run after the current callback returns.
pub trait CustomElement {
    /// Attribute names that trigger [`CustomElement::attribute_changed`].
    fn observed_attributes(&self) -> &[&str] {
        &[]
    }

    /// The element became connected to the document.
    fn connected(&mut self, _doc: &mut Document, _host: NodeId) -> Result<(), DomError> {
        Ok(())
    }

    /// The element was removed from the document.
    fn disconnected(&mut self, _doc: &mut Document, _host: NodeId) -> Result<(), DomError> {
        Ok(())
    }

    /// An observed attribute was set or removed. `old` and `new` may be
    /// equal when an attribute is set to its current value.
    fn attribute_changed(
        &mut self,
        _doc: &mut Document,
        _host: NodeId,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) -> Result<(), DomError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reaction {
    Connected(NodeId),
    Disconnected(NodeId),
    AttributeChanged {
        node: NodeId,
        name: String,
        old: Option<String>,
        new: Option<String>,
    },
}

impl Reaction {
    fn node(&self) -> NodeId {
        match self {
            Self::Connected(node) | Self::Disconnected(node) => *node,
            Self::AttributeChanged { node, .. } => *node,
        }
    }
}

impl Document {
    /// Register a custom element constructor for `tag`.
    ///
    /// Existing elements with that tag are upgraded: their current
    /// attributes are replayed through `attribute_changed` and connected
    /// ones receive `connected`.
    pub fn define<F>(&mut self, tag: &str, constructor: F) -> Result<(), DomError>
    where
        F: Fn(&mut Document, NodeId) -> Result<Box<dyn CustomElement>, DomError> + 'static,
    {
        let tag = tag.to_ascii_lowercase();
        if !tag.contains('-') || !tag.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(DomError::InvalidCustomElementName(tag));
        }
        if self.definitions.contains_key(&tag) {
            return Err(DomError::AlreadyDefined(tag));
        }
        self.definitions.insert(tag.clone(), Rc::new(constructor));
        log::debug!("defined <{tag}>");

        for node in self.elements_with_tag(&tag) {
            self.upgrade(node)?;
        }
        self.flush_reactions()
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(&tag.to_ascii_lowercase())
    }

    /// Borrow the instance backing an upgraded element.
    ///
    /// Returns `None` when the node is not upgraded, is of another type, or
    /// is currently running one of its own callbacks.
    pub fn custom_element<T: 'static>(&self, node: NodeId) -> Option<Ref<'_, T>> {
        let cell = self.elements.get(&node)?.try_borrow().ok()?;
        Ref::filter_map(cell, |element| element.as_any().downcast_ref::<T>()).ok()
    }

    pub(crate) fn upgrade(&mut self, node: NodeId) -> Result<(), DomError> {
        if self.elements.contains_key(&node) {
            return Ok(());
        }
        let tag = self.element(node)?.tag.clone();
        let Some(constructor) = self.definitions.get(&tag).cloned() else {
            return Ok(());
        };

        let instance = (*constructor)(self, node)?;
        let observed: Vec<String> = instance
            .observed_attributes()
            .iter()
            .map(|name| name.to_string())
            .collect();
        self.elements.insert(node, Rc::new(RefCell::new(instance)));
        log::trace!("upgraded <{tag}> {node}");

        let initial: Vec<(String, String)> = self
            .element(node)?
            .attributes
            .iter()
            .filter(|(name, _)| observed.contains(name))
            .cloned()
            .collect();
        for (name, value) in initial {
            self.reactions.push_back(Reaction::AttributeChanged {
                node,
                name,
                old: None,
                new: Some(value),
            });
        }
        if self.is_connected(node) {
            self.reactions.push_back(Reaction::Connected(node));
        }
        Ok(())
    }

    pub(crate) fn enqueue_attribute_changed(
        &mut self,
        node: NodeId,
        name: String,
        old: Option<String>,
        new: Option<String>,
    ) {
        let Some(element) = self.elements.get(&node) else {
            return;
        };
        let observed = element
            .try_borrow()
            .map(|e| e.observed_attributes().contains(&name.as_str()))
            // An element mutating its own attributes from inside a callback
            // is still notified.
            .unwrap_or(true);
        if observed {
            self.reactions.push_back(Reaction::AttributeChanged {
                node,
                name,
                old,
                new,
            });
        }
    }

    /// Run queued reactions until the queue is empty. Nested calls made
    /// from inside a callback return immediately; the outer loop picks up
    /// whatever they queued. The first error is returned after the queue
    /// has drained.
    pub(crate) fn flush_reactions(&mut self) -> Result<(), DomError> {
        if self.flushing {
            return Ok(());
        }
        self.flushing = true;
        let mut first_error = None;

        while let Some(reaction) = self.reactions.pop_front() {
            let Some(element) = self.elements.get(&reaction.node()).cloned() else {
                continue;
            };
            let mut element = element.borrow_mut();
            let result = match &reaction {
                Reaction::Connected(node) => element.connected(self, *node),
                Reaction::Disconnected(node) => element.disconnected(self, *node),
                Reaction::AttributeChanged {
                    node,
                    name,
                    old,
                    new,
                } => element.attribute_changed(self, *node, name, old.as_deref(), new.as_deref()),
            };
            if let Err(err) = result {
                log::error!("custom element reaction {reaction:?} failed: {err}");
                first_error.get_or_insert(err);
            }
        }

        self.flushing = false;
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
