use std::cell::Ref;

use shadowdom::{Document, NodeId};

use crate::error::SearchError;
use crate::properties::SearchProperty;
use crate::widget::SearchWidget;
use crate::TAG;

/// Typed handle to a `<search-widget>` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchElement {
    host: NodeId,
}

impl SearchElement {
    /// Create a detached `<search-widget>`. The tag must be defined for the
    /// element to render when connected.
    pub fn create(doc: &mut Document) -> Result<Self, SearchError> {
        let host = doc.create_element(TAG)?;
        Ok(Self { host })
    }

    /// Wrap an existing node, checking its tag.
    pub fn from_node(doc: &Document, node: NodeId) -> Result<Self, SearchError> {
        match doc.tag(node) {
            Some(TAG) => Ok(Self { host: node }),
            _ => Err(SearchError::NotASearchWidget),
        }
    }

    pub fn node(&self) -> NodeId {
        self.host
    }

    /// The upgraded instance, if the tag is defined.
    pub fn widget<'a>(&self, doc: &'a Document) -> Option<Ref<'a, SearchWidget>> {
        doc.custom_element::<SearchWidget>(self.host)
    }

    /// Read a property by name.
    pub fn property(&self, doc: &Document, name: &str) -> Result<String, SearchError> {
        Ok(name.parse::<SearchProperty>()?.get(doc, self.host))
    }

    /// Write a property by name.
    pub fn set_property(
        &self,
        doc: &mut Document,
        name: &str,
        value: impl ToString,
    ) -> Result<(), SearchError> {
        name.parse::<SearchProperty>()?.set(doc, self.host, value)
    }

    pub fn button(&self, doc: &Document) -> String {
        SearchProperty::Button.get(doc, self.host)
    }

    pub fn set_button(&self, doc: &mut Document, value: impl ToString) -> Result<(), SearchError> {
        SearchProperty::Button.set(doc, self.host, value)
    }

    pub fn label(&self, doc: &Document) -> String {
        SearchProperty::Label.get(doc, self.host)
    }

    pub fn set_label(&self, doc: &mut Document, value: impl ToString) -> Result<(), SearchError> {
        SearchProperty::Label.set(doc, self.host, value)
    }

    pub fn placeholder(&self, doc: &Document) -> String {
        SearchProperty::Placeholder.get(doc, self.host)
    }

    pub fn set_placeholder(&self, doc: &mut Document, value: impl ToString) -> Result<(), SearchError> {
        SearchProperty::Placeholder.set(doc, self.host, value)
    }

    pub fn value(&self, doc: &Document) -> String {
        SearchProperty::Value.get(doc, self.host)
    }

    pub fn set_value(&self, doc: &mut Document, value: impl ToString) -> Result<(), SearchError> {
        SearchProperty::Value.set(doc, self.host, value)
    }

    /// The rendered `<input>`, found through its exported part.
    pub fn input(&self, doc: &Document) -> Option<NodeId> {
        doc.query_part(self.host, "input")
    }

    /// The rendered `<button>`.
    pub fn action_button(&self, doc: &Document) -> Option<NodeId> {
        doc.query_part(self.host, "button")
    }

    /// The rendered `<label>`.
    pub fn label_element(&self, doc: &Document) -> Option<NodeId> {
        doc.query_part(self.host, "label")
    }
}
