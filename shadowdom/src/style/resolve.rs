use super::{Color, Display, Rgb, Selector, Style};
use crate::document::Document;
use crate::node::{NodeId, NodeKind};

/// Custom properties may reference each other; stop following after this many hops.
const MAX_VAR_DEPTH: usize = 16;

impl Document {
    /// Style of `node` after scoping, `::part()` hooks and inheritance of
    /// the foreground colour. Text nodes take the style of their parent.
    ///
    /// Precedence, lowest first: the `:host` rule of the element's own
    /// shadow root, tag rules of the tree the element lives in, part rules
    /// of the tree its host lives in.
    pub fn computed_style(&self, node: NodeId) -> Style {
        let Ok(element) = self.element(node) else {
            return self
                .composed_parent(node)
                .map(|parent| self.computed_style(parent))
                .unwrap_or_default();
        };
        let focused = self.focused == Some(node);
        let mut style = Style::new();

        if let Some(shadow) = element.shadow_root {
            if let Some(sheet) = self.scope_styles(shadow) {
                sheet.apply(&Selector::Host, focused, &mut style);
            }
        }

        let scope = self.tree_root(node);
        if let Some(sheet) = self.scope_styles(scope) {
            sheet.apply(&Selector::Tag(element.tag.clone()), focused, &mut style);
        }

        if let (Some(host), Some(parts)) = (self.host(scope), element.attribute("part")) {
            if let Some(outer) = self.scope_styles(self.tree_root(host)) {
                for part in parts.split_whitespace() {
                    outer.apply(&Selector::Part(part.to_string()), focused, &mut style);
                }
            }
        }

        if style.foreground.is_none() {
            style.foreground = self
                .composed_ancestors(node)
                .find(|ancestor| self.element(*ancestor).is_ok())
                .and_then(|parent| self.computed_style(parent).foreground);
        }
        style
    }

    /// Display of an element: its computed `display`, or the tag default.
    pub fn display(&self, node: NodeId) -> Display {
        match self.node(node).map(|n| &n.kind) {
            Ok(NodeKind::Element(element)) => self
                .computed_style(node)
                .display
                .unwrap_or_else(|| default_display(&element.tag)),
            Ok(NodeKind::Text(_)) => Display::Inline,
            _ => Display::Block,
        }
    }

    /// Resolve `color` for `node`, looking custom properties up along the
    /// composed ancestor chain.
    pub fn resolve_color(&self, node: NodeId, color: &Color) -> Rgb {
        self.resolve_color_depth(node, color, 0)
    }

    fn resolve_color_depth(&self, node: NodeId, color: &Color, depth: usize) -> Rgb {
        match color {
            Color::Var { name, fallback } => {
                let declared = (depth < MAX_VAR_DEPTH)
                    .then(|| self.custom_property(node, name))
                    .flatten();
                match (declared, fallback) {
                    (Some(value), _) => self.resolve_color_depth(node, value, depth + 1),
                    (None, Some(fallback)) => self.resolve_color_depth(node, fallback, depth + 1),
                    (None, None) => Rgb::default(),
                }
            }
            concrete => concrete.to_rgb(),
        }
    }
}

fn default_display(tag: &str) -> Display {
    match tag {
        "input" | "button" | "span" | "slot" | "b" | "em" | "code" | "a" => Display::Inline,
        "style" | "template" | "script" => Display::None,
        _ => Display::Block,
    }
}
