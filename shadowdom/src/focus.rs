use crate::document::Document;
use crate::error::DomError;
use crate::hit::is_interactive;
use crate::node::NodeId;
use crate::style::Display;

impl Document {
    /// Get the currently focused element.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Programmatically focus an element.
    /// Returns true if focus changed.
    pub fn focus(&mut self, node: NodeId) -> Result<bool, DomError> {
        self.element(node)?;
        if self.focused == Some(node) {
            return Ok(false);
        }
        self.focused = Some(node);
        log::trace!("focused {node}");
        Ok(true)
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Connected inputs and buttons in display order.
    pub fn focusable_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_focusable(self.root(), &mut out);
        out
    }

    fn collect_focusable(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if self.element(node).is_ok() && self.display(node) == Display::None {
            return;
        }
        if is_interactive(self, node) {
            out.push(node);
        }
        for child in self.flat_children(node) {
            self.collect_focusable(child, out);
        }
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element if focus changed.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        self.cycle_focus(1)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element if focus changed.
    pub fn focus_prev(&mut self) -> Option<NodeId> {
        self.cycle_focus(-1)
    }

    fn cycle_focus(&mut self, step: isize) -> Option<NodeId> {
        let focusable = self.focusable_nodes();
        if focusable.is_empty() {
            return None;
        }
        let len = focusable.len() as isize;
        let next = match self.focused.and_then(|f| focusable.iter().position(|n| *n == f)) {
            Some(i) => focusable[(i as isize + step).rem_euclid(len) as usize],
            None if step < 0 => focusable[focusable.len() - 1],
            None => focusable[0],
        };
        if self.focused == Some(next) {
            return None;
        }
        self.focused = Some(next);
        Some(next)
    }
}
