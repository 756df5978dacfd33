use std::any::Any;

use shadowdom::{CustomElement, Document, DomError, ListenerId, NodeId};

use crate::events::{emit, ButtonActivated, InputChanged};
use crate::properties::{SearchProperty, WidgetState};
use crate::template::{self, Fragment};

/// Instance state behind a `<search-widget>` element.
///
/// The properties themselves live in the host's attributes; this only
/// tracks the rendered fragment and the listeners wired into it.
#[derive(Debug, Default)]
pub struct SearchWidget {
    fragment: Option<Fragment>,
    listeners: Vec<(NodeId, ListenerId)>,
    applied_changes: usize,
}

impl SearchWidget {
    /// Constructor registered with [`Document::define`]. Allocates the
    /// shadow root; content is rendered on first connection.
    pub fn construct(doc: &mut Document, host: NodeId) -> Result<Box<dyn CustomElement>, DomError> {
        doc.attach_shadow(host)?;
        Ok(Box::new(Self::default()))
    }

    pub fn is_rendered(&self) -> bool {
        self.fragment.is_some()
    }

    /// Attribute changes that altered a value, i.e. excluding writes of the
    /// value already present.
    pub fn applied_changes(&self) -> usize {
        self.applied_changes
    }

    /// Whether the click and input listeners are currently registered.
    pub fn is_listening(&self) -> bool {
        !self.listeners.is_empty()
    }

    fn add_event_listeners(&mut self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let Some(fragment) = self.fragment else {
            return Ok(());
        };
        if self.is_listening() {
            return Ok(());
        }
        let Fragment {
            button,
            slot,
            input,
        } = fragment;

        let on_click = doc.add_event_listener(button, "click", move |doc, _| {
            let state = WidgetState::read(doc, host);
            let button = if state.button.is_empty() {
                doc.slot_text(slot)
            } else {
                state.button
            };
            let payload = ButtonActivated {
                button,
                value: state.value,
            };
            emit(doc, host, &payload);
        })?;

        let on_input = doc.add_event_listener(input, "input", move |doc, _| {
            let payload = InputChanged {
                value: doc.input_value(input),
            };
            emit(doc, host, &payload);
        })?;

        self.listeners = vec![(button, on_click), (input, on_input)];
        Ok(())
    }

    fn remove_event_listeners(&mut self, doc: &mut Document) {
        for (node, id) in self.listeners.drain(..) {
            doc.remove_event_listener(node, id);
        }
    }
}

impl CustomElement for SearchWidget {
    fn observed_attributes(&self) -> &[&str] {
        &["button", "label", "placeholder", "value"]
    }

    fn connected(&mut self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        if self.fragment.is_none() {
            let shadow = doc
                .shadow_root(host)
                .ok_or(DomError::NotAShadowRoot(host))?;
            let state = WidgetState::read(doc, host);
            self.fragment = Some(template::render(doc, shadow, &state)?);
            log::debug!("rendered search widget {host} with {state:?}");
        }
        self.add_event_listeners(doc, host)
    }

    fn disconnected(&mut self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        self.remove_event_listeners(doc);
        log::debug!("search widget {host} disconnected");
        Ok(())
    }

    /// Records the change. The rendered fragment keeps the values it was
    /// built with.
    fn attribute_changed(
        &mut self,
        _doc: &mut Document,
        host: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), DomError> {
        // Absent and empty read back the same through the getters
        if old.unwrap_or_default() == new.unwrap_or_default() {
            return Ok(());
        }
        let Ok(property) = name.parse::<SearchProperty>() else {
            return Ok(());
        };
        self.applied_changes += 1;
        log::debug!("search widget {host}: {property} {old:?} -> {new:?}");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
