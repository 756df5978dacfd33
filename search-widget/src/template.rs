use shadowdom::{Color, Display, Document, DomError, NodeId, Selector, Style, StyleSheet};

use crate::properties::WidgetState;

/// Custom property themable from outside the shadow root.
pub const INPUT_BORDER_COLOR_PROPERTY: &str = "--search-input-border-color";

const INPUT_BORDER_DEFAULT: Color = Color::Rgb {
    r: 0xcc,
    g: 0xcc,
    b: 0xcc,
};
const BUTTON_BACKGROUND: Color = Color::Rgb {
    r: 0x5f,
    g: 0x39,
    b: 0x93,
};
const BUTTON_BACKGROUND_FOCUSED: Color = Color::Rgb {
    r: 0x47,
    g: 0x2b,
    b: 0x6e,
};
const BUTTON_FOREGROUND: Color = Color::Rgb {
    r: 0xff,
    g: 0xff,
    b: 0xff,
};

/// Stylesheet scoped to the widget's shadow root.
pub fn styles() -> StyleSheet {
    let mut sheet = StyleSheet::new();
    sheet
        .rule(Selector::Host, Style::new().display(Display::Block).margin_y(1))
        .rule(
            Selector::tag("label"),
            Style::new().display(Display::Block).dim(),
        )
        .rule(
            Selector::tag("input"),
            Style::new()
                .min_width(24)
                .border_color(Color::var(INPUT_BORDER_COLOR_PROPERTY, INPUT_BORDER_DEFAULT)),
        )
        .rule(
            Selector::tag("button"),
            Style::new()
                .background(BUTTON_BACKGROUND)
                .foreground(BUTTON_FOREGROUND)
                .padding_x(2)
                .min_width(12),
        )
        .rule_focused(
            Selector::tag("button"),
            Style::new().background(BUTTON_BACKGROUND_FOCUSED).bold(),
        );
    sheet
}

/// Nodes of the rendered fragment the widget keeps hold of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub input: NodeId,
    pub button: NodeId,
    pub slot: NodeId,
}

/// Build `label → input → button > slot` into `shadow`, seeded from
/// `state`.
pub(crate) fn render(doc: &mut Document, shadow: NodeId, state: &WidgetState) -> Result<Fragment, DomError> {
    *doc.shadow_styles_mut(shadow)? = styles();

    let label = doc.create_element("label")?;
    doc.set_attribute(label, "part", "label")?;
    let label_text = doc.create_text(state.label.clone());
    doc.append_child(label, label_text)?;

    let input = doc.create_element("input")?;
    doc.set_attribute(input, "type", "text")?;
    doc.set_attribute(input, "value", state.value.clone())?;
    doc.set_attribute(input, "placeholder", state.placeholder.clone())?;
    doc.set_attribute(input, "part", "input")?;

    let button = doc.create_element("button")?;
    doc.set_attribute(button, "part", "button")?;
    let slot = doc.create_element("slot")?;
    let fallback = doc.create_text(state.button.clone());
    doc.append_child(slot, fallback)?;
    doc.append_child(button, slot)?;

    for node in [label, input, button] {
        doc.append_child(shadow, node)?;
    }

    Ok(Fragment {
        input,
        button,
        slot,
    })
}
