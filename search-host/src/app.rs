//! The demo page: a header, one `<search-widget>`, and a status line that
//! shows the last notification the widget sent.

use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEvent, MouseEventKind};
use search_widget::{
    ButtonActivated, InputChanged, Notification, SearchElement, INPUT_BORDER_COLOR_PROPERTY,
};
use shadowdom::{hit_test, Color, Document, Key, KeyPress, LayoutResult, MouseButton, NodeId, Selector, Style};

use crate::config::HostConfig;
use crate::error::HostError;

const INITIAL_STATUS: &str = "No notifications yet";

pub struct App {
    doc: Document,
    search: SearchElement,
    status: NodeId,
    quit: bool,
}

impl App {
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        let mut doc = Document::new();
        search_widget::define(&mut doc)?;

        doc.styles_mut()
            .rule(
                Selector::tag("header"),
                Style::new().bold().foreground(Color::oklch(0.8, 0.12, 300.0)),
            )
            .rule(Selector::tag("p"), Style::new().dim())
            .rule(Selector::part("label"), Style::new().italic());

        let app = doc.create_element("div")?;
        doc.set_attribute(app, "class", "app")?;
        if let Some(color) = config.input_border_color()? {
            doc.set_custom_property(app, INPUT_BORDER_COLOR_PROPERTY, color)?;
        }

        let header = text_element(&mut doc, "header", "Search widget demo")?;

        let search = SearchElement::create(&mut doc)?;
        let attributes = &config.widget;
        search.set_value(&mut doc, &attributes.value)?;
        search.set_label(&mut doc, &attributes.label)?;
        search.set_button(&mut doc, &attributes.button)?;
        search.set_placeholder(&mut doc, &attributes.placeholder)?;

        let help = text_element(
            &mut doc,
            "p",
            "Tab moves focus, Enter activates, Esc quits",
        )?;
        let status_line = doc.create_element("p")?;
        let status = doc.create_text(INITIAL_STATUS);
        doc.append_child(status_line, status)?;

        for child in [header, search.node(), help, status_line] {
            doc.append_child(app, child)?;
        }
        let root = doc.root();
        doc.append_child(root, app)?;

        doc.add_event_listener(app, ButtonActivated::NAME, move |doc, event| {
            if let Some(payload) = ButtonActivated::from_event(event) {
                log::info!("button activated: {payload:?}");
                let text = format!(
                    "Button activated: button={:?} value={:?}",
                    payload.button, payload.value
                );
                if let Err(err) = doc.set_text(status, text) {
                    log::warn!("failed to update status: {err}");
                }
            }
        })?;
        doc.add_event_listener(app, InputChanged::NAME, move |doc, event| {
            if let Some(payload) = InputChanged::from_event(event) {
                log::debug!("input changed: {payload:?}");
                let text = format!("Input changed: value={:?}", payload.value);
                if let Err(err) = doc.set_text(status, text) {
                    log::warn!("failed to update status: {err}");
                }
            }
        })?;

        if let Some(input) = search.input(&doc) {
            doc.focus(input)?;
        }

        Ok(Self {
            doc,
            search,
            status,
            quit: false,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn search(&self) -> SearchElement {
        self.search
    }

    /// Text of the status line.
    pub fn status(&self) -> &str {
        self.doc.text(self.status).unwrap_or_default()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Route one terminal event into the document.
    pub fn handle_event(&mut self, event: &CrosstermEvent, layout: &LayoutResult) -> Result<(), HostError> {
        match event {
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key(KeyPress::from(*key_event))
            }
            CrosstermEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(button),
                column,
                row,
                ..
            }) if MouseButton::from(*button) == MouseButton::Left => self.handle_click(layout, *column, *row),
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, press: KeyPress) -> Result<(), HostError> {
        if press.is_interrupt() {
            self.quit = true;
            return Ok(());
        }
        match press.key {
            Key::Escape => self.quit = true,
            Key::Tab => {
                self.doc.focus_next();
            }
            Key::BackTab => {
                self.doc.focus_prev();
            }
            _ => {
                if let Some(focused) = self.doc.focused() {
                    self.doc.handle_key(focused, press.key, press.modifiers)?;
                }
            }
        }
        Ok(())
    }

    fn handle_click(&mut self, layout: &LayoutResult, x: u16, y: u16) -> Result<(), HostError> {
        let Some(node) = hit_test(&self.doc, layout, x, y) else {
            return Ok(());
        };
        self.doc.focus(node)?;
        if self.doc.tag(node) == Some("button") {
            self.doc.click(node)?;
        }
        Ok(())
    }
}

fn text_element(doc: &mut Document, tag: &str, text: &str) -> Result<NodeId, HostError> {
    let element = doc.create_element(tag)?;
    let content = doc.create_text(text);
    doc.append_child(element, content)?;
    Ok(element)
}
