//! Event listeners and dispatch.

use std::fmt;
use std::rc::Rc;

use crate::document::Document;
use crate::error::DomError;
use crate::event::Event;
use crate::node::NodeId;

/// Callback invoked with the document and the event in flight. Listeners may
/// mutate the document and dispatch further events.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Handle returned by [`Document::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

pub(crate) struct Registration {
    id: ListenerId,
    event: String,
    callback: Listener,
}

impl Document {
    pub fn add_event_listener<F>(
        &mut self,
        node: NodeId,
        event: &str,
        callback: F,
    ) -> Result<ListenerId, DomError>
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.node(node)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.entry(node).or_default().push(Registration {
            id,
            event: event.to_string(),
            callback: Rc::new(callback),
        });
        log::trace!("added {id} for {event:?} on {node}");
        Ok(id)
    }

    /// Returns whether the listener was registered on `node`.
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(registrations) = self.listeners.get_mut(&node) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        let removed = registrations.len() != before;
        if removed {
            log::trace!("removed {id} from {node}");
        }
        removed
    }

    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        self.listeners
            .get(&node)
            .map(|regs| regs.iter().filter(|r| r.event == event).count())
            .unwrap_or(0)
    }

    fn has_listener(&self, node: NodeId, id: ListenerId) -> bool {
        self.listeners
            .get(&node)
            .is_some_and(|regs| regs.iter().any(|r| r.id == id))
    }

    /// Nodes an event visits, target first. Non-composed events stop at the
    /// shadow root of the target's tree.
    pub fn event_path(&self, target: NodeId, composed: bool) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut current = target;
        loop {
            let next = if composed {
                self.composed_parent(current)
            } else {
                self.parent(current)
            };
            match next {
                Some(node) => {
                    path.push(node);
                    current = node;
                }
                None => break,
            }
        }
        path
    }

    /// `target` as seen by a listener on `current`: hosts stand in for
    /// nodes inside shadow trees that `current` is not part of.
    pub fn retarget(&self, target: NodeId, current: NodeId) -> NodeId {
        let mut retargeted = target;
        loop {
            let root = self.tree_root(retargeted);
            match self.host(root) {
                Some(host)
                    if root != current && !self.composed_ancestors(current).any(|a| a == root) =>
                {
                    retargeted = host;
                }
                _ => return retargeted,
            }
        }
    }

    /// Dispatch `event` at `target` and return how many listeners ran.
    ///
    /// Listeners on the target always run; ancestors along the path follow
    /// only for bubbling events. Listeners removed during dispatch are
    /// skipped.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> Result<usize, DomError> {
        self.node(target)?;
        let path = self.event_path(target, event.composed);
        let mut invoked = 0;

        for (index, current) in path.into_iter().enumerate() {
            if index > 0 && !event.bubbles {
                break;
            }
            event.current_target = Some(current);
            event.target = Some(self.retarget(target, current));

            let callbacks: Vec<(ListenerId, Listener)> = self
                .listeners
                .get(&current)
                .map(|regs| {
                    regs.iter()
                        .filter(|r| r.event == event.name)
                        .map(|r| (r.id, Rc::clone(&r.callback)))
                        .collect()
                })
                .unwrap_or_default();

            for (id, callback) in callbacks {
                if !self.has_listener(current, id) {
                    continue;
                }
                (*callback)(self, &mut event);
                invoked += 1;
            }

            if event.propagation_stopped {
                break;
            }
        }

        log::trace!("dispatched {:?} at {target}: {invoked} listeners", event.name);
        Ok(invoked)
    }

    /// Simulate a native click. Disabled elements ignore it.
    pub fn click(&mut self, node: NodeId) -> Result<usize, DomError> {
        if self.has_attribute(node, "disabled") {
            return Ok(0);
        }
        self.dispatch_event(node, Event::new("click").bubbles().composed())
    }
}
