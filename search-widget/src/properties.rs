use std::fmt;
use std::str::FromStr;

use shadowdom::{Document, NodeId};

use crate::error::SearchError;

/// One of the four string properties reflected to an attribute of the
/// same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchProperty {
    /// Fallback text of the action button.
    Button,
    /// Text shown above the input.
    Label,
    Placeholder,
    /// Value seeded into the input when it is first rendered.
    Value,
}

impl SearchProperty {
    pub const ALL: [SearchProperty; 4] = [
        SearchProperty::Button,
        SearchProperty::Label,
        SearchProperty::Placeholder,
        SearchProperty::Value,
    ];

    /// Attribute backing the property.
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchProperty::Button => "button",
            SearchProperty::Label => "label",
            SearchProperty::Placeholder => "placeholder",
            SearchProperty::Value => "value",
        }
    }

    /// Current value: the attribute, or `""` when it is absent.
    pub fn get(self, doc: &Document, host: NodeId) -> String {
        doc.attribute(host, self.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Write the attribute. The attribute is the only store, so the getter
    /// reflects the new value immediately.
    pub fn set(self, doc: &mut Document, host: NodeId, value: impl ToString) -> Result<(), SearchError> {
        doc.set_attribute(host, self.as_str(), value.to_string())?;
        Ok(())
    }
}

impl FromStr for SearchProperty {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchProperty::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SearchError::UnknownProperty(s.to_string()))
    }
}

impl fmt::Display for SearchProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the four properties of one widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub button: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
}

impl WidgetState {
    pub fn read(doc: &Document, host: NodeId) -> Self {
        Self {
            button: SearchProperty::Button.get(doc, host),
            label: SearchProperty::Label.get(doc, host),
            placeholder: SearchProperty::Placeholder.get(doc, host),
            value: SearchProperty::Value.get(doc, host),
        }
    }
}
