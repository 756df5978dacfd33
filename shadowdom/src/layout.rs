//! Flow layout over the flattened tree.
//!
//! Shadow content replaces a host's children and slots project the host's
//! light children, so layout sees the tree as it is displayed. Blocks start
//! a new line and span the available width; inline nodes flow left to
//! right, one column apart, wrapping when they do not fit.

use std::collections::HashMap;

use crate::document::Document;
use crate::node::{NodeId, NodeKind};
use crate::style::Display;
use crate::text::{collapse_whitespace, display_width};

/// Width of an input without a `min_width` style.
pub const DEFAULT_INPUT_WIDTH: u16 = 20;
/// Inputs take a text row plus the rule drawn beneath it.
pub const INPUT_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Positions of laid out nodes, plus the order to paint them in.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    rects: HashMap<NodeId, Rect>,
    order: Vec<NodeId>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&Rect> {
        self.rects.get(&node)
    }

    /// Laid out nodes, parents before children.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn reserve(&mut self, node: NodeId) {
        self.order.push(node);
    }

    fn insert(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }
}

impl Document {
    /// Children as displayed: a host's shadow content, a slot's assigned
    /// nodes (or fallback content), or the plain children otherwise.
    pub fn flat_children(&self, node: NodeId) -> Vec<NodeId> {
        if let Some(shadow) = self.shadow_root(node) {
            return self.children(shadow).to_vec();
        }
        if self.tag(node) == Some("slot") {
            let assigned = self.assigned_nodes(node);
            if !assigned.is_empty() {
                return assigned;
            }
        }
        self.children(node).to_vec()
    }

    /// Displayed text of the flattened subtree, whitespace collapsed.
    pub fn flat_text(&self, node: NodeId) -> String {
        let mut raw = String::new();
        self.collect_flat_text(node, &mut raw);
        collapse_whitespace(&raw)
    }

    fn collect_flat_text(&self, node: NodeId, out: &mut String) {
        if let Some(text) = self.text(node) {
            out.push_str(text);
            out.push(' ');
            return;
        }
        for child in self.flat_children(node) {
            self.collect_flat_text(child, out);
        }
    }
}

struct Flow {
    left: u16,
    right: u16,
    x: u16,
    y: u16,
    line_height: u16,
}

impl Flow {
    fn newline(&mut self) {
        if self.x > self.left {
            self.y = self.y.saturating_add(self.line_height.max(1));
            self.x = self.left;
            self.line_height = 0;
        }
    }

    /// Place an inline box of the given size, one column after the previous.
    fn place(&mut self, width: u16, height: u16) -> Rect {
        if self.x > self.left {
            self.x = self.x.saturating_add(1);
        }
        if self.x.saturating_add(width) > self.right && self.x > self.left {
            self.newline();
        }
        let rect = Rect::new(
            self.x,
            self.y,
            width.min(self.right.saturating_sub(self.x)),
            height,
        );
        self.x = self.x.saturating_add(width).min(self.right);
        self.line_height = self.line_height.max(height);
        rect
    }
}

/// Display width of `text`, clamped to what a rect can hold.
fn columns(text: &str) -> u16 {
    u16::try_from(display_width(text)).unwrap_or(u16::MAX)
}

/// Lay out the document within `area`.
pub fn layout(doc: &Document, area: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    let root = doc.root();
    result.reserve(root);
    result.insert(root, area);

    let mut flow = Flow {
        left: area.x,
        right: area.right(),
        x: area.x,
        y: area.y,
        line_height: 0,
    };
    for child in doc.flat_children(root) {
        layout_node(doc, child, &mut flow, &mut result);
    }
    result
}

fn layout_node(doc: &Document, node: NodeId, flow: &mut Flow, result: &mut LayoutResult) {
    let Ok(n) = doc.node(node) else {
        return;
    };
    match &n.kind {
        NodeKind::Text(text) => {
            let text = collapse_whitespace(text);
            if text.is_empty() {
                return;
            }
            result.reserve(node);
            let rect = flow.place(columns(&text), 1);
            result.insert(node, rect);
        }
        NodeKind::Element(element) => match doc.display(node) {
            Display::None => {}
            Display::Block => {
                let margin = doc.computed_style(node).margin_y.unwrap_or(0);
                flow.newline();
                flow.y = flow.y.saturating_add(margin);
                let start_y = flow.y;
                result.reserve(node);
                for child in doc.flat_children(node) {
                    layout_node(doc, child, flow, result);
                }
                flow.newline();
                let rect = Rect::new(flow.left, start_y, flow.right - flow.left, flow.y - start_y);
                result.insert(node, rect);
                flow.y = flow.y.saturating_add(margin);
            }
            Display::Inline => match element.tag.as_str() {
                "input" => {
                    let width = doc
                        .computed_style(node)
                        .min_width
                        .unwrap_or(DEFAULT_INPUT_WIDTH);
                    result.reserve(node);
                    let rect = flow.place(width, INPUT_HEIGHT);
                    result.insert(node, rect);
                }
                "button" => {
                    let style = doc.computed_style(node);
                    let padding = style.padding_x.unwrap_or(1);
                    let label = columns(&doc.flat_text(node));
                    let width = label
                        .saturating_add(padding.saturating_mul(2))
                        .max(style.min_width.unwrap_or(0));
                    result.reserve(node);
                    let rect = flow.place(width, 1);
                    result.insert(node, rect);
                }
                _ => {
                    result.reserve(node);
                    let (start_x, start_y) = (flow.x, flow.y);
                    for child in doc.flat_children(node) {
                        layout_node(doc, child, flow, result);
                    }
                    let rect = if flow.y == start_y {
                        Rect::new(start_x, start_y, flow.x - start_x, flow.line_height.max(1))
                    } else {
                        let height = (flow.y - start_y).saturating_add(flow.line_height.max(1));
                        Rect::new(flow.left, start_y, flow.right - flow.left, height)
                    };
                    result.insert(node, rect);
                }
            },
        },
        NodeKind::Document | NodeKind::ShadowRoot { .. } => {}
    }
}
