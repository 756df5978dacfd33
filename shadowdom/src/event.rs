use serde_json::Value;

use crate::node::NodeId;

/// A DOM event travelling along a propagation path.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    /// Payload of a custom event.
    pub detail: Option<Value>,
    pub bubbles: bool,
    /// Whether the event crosses shadow root boundaries.
    pub composed: bool,
    /// Target as seen from the listener currently running. Retargeted to
    /// the shadow host for listeners outside the target's shadow tree.
    pub target: Option<NodeId>,
    pub current_target: Option<NodeId>,
    pub(crate) propagation_stopped: bool,
}

impl Event {
    /// A plain event that neither bubbles nor crosses shadow boundaries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: None,
            bubbles: false,
            composed: false,
            target: None,
            current_target: None,
            propagation_stopped: false,
        }
    }

    /// An event carrying a payload.
    pub fn custom(name: impl Into<String>, detail: Value) -> Self {
        Self {
            detail: Some(detail),
            ..Self::new(name)
        }
    }

    pub fn bubbles(mut self) -> Self {
        self.bubbles = true;
        self
    }

    pub fn composed(mut self) -> Self {
        self.composed = true;
        self
    }

    /// Keep the event from reaching nodes after the current one.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Read a string field of the detail object.
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.detail.as_ref()?.get(key)?.as_str()
    }
}
