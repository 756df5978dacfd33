use crate::document::Document;
use crate::layout::LayoutResult;
use crate::node::NodeId;

/// Find the topmost interactive element (input or button) at the given
/// coordinates. Disabled elements are skipped.
pub fn hit_test(doc: &Document, layout: &LayoutResult, x: u16, y: u16) -> Option<NodeId> {
    layout.order().iter().rev().copied().find(|node| {
        is_interactive(doc, *node) && layout.get(*node).is_some_and(|rect| rect.contains(x, y))
    })
}

/// Find the deepest laid out node of any kind at the given coordinates.
pub fn hit_test_any(layout: &LayoutResult, x: u16, y: u16) -> Option<NodeId> {
    layout
        .order()
        .iter()
        .rev()
        .copied()
        .find(|node| layout.get(*node).is_some_and(|rect| rect.contains(x, y)))
}

pub fn is_interactive(doc: &Document, node: NodeId) -> bool {
    matches!(doc.tag(node), Some("input" | "button")) && !doc.has_attribute(node, "disabled")
}
