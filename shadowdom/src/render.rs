use crate::buffer::{Buffer, DEFAULT_FG};
use crate::document::Document;
use crate::layout::{LayoutResult, Rect};
use crate::node::{NodeId, NodeKind};
use crate::style::{Rgb, Style};
use crate::text::{collapse_whitespace, display_width, truncate_to_width};

/// Rule colour under inputs when no `border_color` is styled.
pub const DEFAULT_BORDER: Rgb = Rgb::new(204, 204, 204);

pub fn render_to_buffer(doc: &Document, layout: &LayoutResult, buf: &mut Buffer) {
    for node in layout.order() {
        if let Some(rect) = layout.get(*node) {
            render_node(doc, *node, *rect, buf);
        }
    }
}

fn render_node(doc: &Document, node: NodeId, rect: Rect, buf: &mut Buffer) {
    let Ok(n) = doc.node(node) else {
        return;
    };
    let style = doc.computed_style(node);
    let fg = style
        .foreground
        .as_ref()
        .map(|c| doc.resolve_color(node, c))
        .unwrap_or(DEFAULT_FG);

    match &n.kind {
        NodeKind::Text(text) => {
            let text = collapse_whitespace(text);
            buf.set_str(rect.x, rect.y, rect.right(), &text, fg, style.text_style);
        }
        NodeKind::Element(element) => {
            if let Some(bg) = &style.background {
                fill_rect(buf, rect, doc.resolve_color(node, bg));
            }
            match element.tag.as_str() {
                "input" => render_input(doc, node, rect, &style, fg, buf),
                "button" => render_button(doc, node, rect, &style, fg, buf),
                _ => {}
            }
        }
        NodeKind::Document | NodeKind::ShadowRoot { .. } => {}
    }
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb) {
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = bg;
            }
        }
    }
}

fn render_input(doc: &Document, node: NodeId, rect: Rect, style: &Style, fg: Rgb, buf: &mut Buffer) {
    if rect.width == 0 {
        return;
    }
    let value = doc.input_value(node);
    let width = rect.width as usize;

    if value.is_empty() {
        let placeholder = doc.attribute(node, "placeholder").unwrap_or_default();
        let mut dim = style.text_style;
        dim.dim = true;
        buf.set_str(rect.x, rect.y, rect.right(), &truncate_to_width(placeholder, width), fg, dim);
    } else {
        buf.set_str(rect.x, rect.y, rect.right(), &truncate_to_width(&value, width), fg, style.text_style);
    }

    if doc.focused() == Some(node) {
        let cursor = doc
            .input_data(node)
            .map(|data| data.cursor)
            .unwrap_or_else(|| value.chars().count());
        let before: String = value.chars().take(cursor).collect();
        let offset = display_width(&before).min(width - 1);
        let col = rect.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
        if let Some(cell) = buf.get_mut(col, rect.y) {
            std::mem::swap(&mut cell.fg, &mut cell.bg);
        }
    }

    if rect.height > 1 {
        let border = style
            .border_color
            .as_ref()
            .map(|c| doc.resolve_color(node, c))
            .unwrap_or(DEFAULT_BORDER);
        let rule = "─".repeat(width);
        buf.set_str(rect.x, rect.y.saturating_add(1), rect.right(), &rule, border, Default::default());
    }
}

fn render_button(doc: &Document, node: NodeId, rect: Rect, style: &Style, fg: Rgb, buf: &mut Buffer) {
    let label = truncate_to_width(&doc.flat_text(node), rect.width as usize);
    let offset = (rect.width as usize).saturating_sub(display_width(&label)) / 2;
    let x = rect.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
    buf.set_str(x, rect.y, rect.right(), &label, fg, style.text_style);
}
