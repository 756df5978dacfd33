//! Live values and key editing for `<input>` elements.

use crate::document::Document;
use crate::error::DomError;
use crate::event::Event;
use crate::keys::{Key, Modifiers};
use crate::node::NodeId;

/// Text and caret of an edited input. Positions count characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputData {
    pub text: String,
    pub cursor: usize,
    /// Other end of the selection. Nothing is selected when it equals `cursor`.
    pub anchor: Option<usize>,
}

impl TextInputData {
    /// Caret placed after the last character.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            cursor: text.chars().count(),
            text,
            anchor: None,
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Selected range, ordered.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor.filter(|anchor| *anchor != self.cursor)?;
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        let len = self.len();
        if len > 0 {
            self.anchor = Some(0);
            self.cursor = len;
        }
    }

    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> TextEditResult {
        use TextEditResult::{Changed, Handled, Ignored, Submitted};

        if modifiers.ctrl {
            if key == Key::Char('a') {
                self.select_all();
                return Handled;
            }
            return Ignored;
        }
        let extend = modifiers.shift;
        match key {
            Key::Char(c) if !modifiers.alt => {
                self.insert_char(c);
                Changed
            }
            Key::Backspace if modifiers.none() => {
                if self.delete_back() {
                    Changed
                } else {
                    Handled
                }
            }
            Key::Delete if modifiers.none() => {
                if self.delete_forward() {
                    Changed
                } else {
                    Handled
                }
            }
            Key::Left => {
                self.step(-1, extend);
                Handled
            }
            Key::Right => {
                self.step(1, extend);
                Handled
            }
            Key::Home => {
                self.move_to(0, extend);
                Handled
            }
            Key::End => {
                self.move_to(self.len(), extend);
                Handled
            }
            Key::Enter => Submitted,
            _ => Ignored,
        }
    }

    /// Type `c` over the selection, or at the caret.
    pub fn insert_char(&mut self, c: char) {
        let (start, end) = self.selection().unwrap_or((self.cursor, self.cursor));
        let mut utf8 = [0; 4];
        self.splice(start, end, c.encode_utf8(&mut utf8));
    }

    /// Remove the selection or the character before the caret. False when
    /// nothing was removed.
    pub fn delete_back(&mut self) -> bool {
        let range = match self.selection() {
            Some(range) => range,
            None if self.cursor > 0 => (self.cursor - 1, self.cursor),
            None => {
                self.clear_selection();
                return false;
            }
        };
        self.splice(range.0, range.1, "");
        true
    }

    /// Remove the selection or the character after the caret.
    pub fn delete_forward(&mut self) -> bool {
        let range = match self.selection() {
            Some(range) => range,
            None if self.cursor < self.len() => (self.cursor, self.cursor + 1),
            None => {
                self.clear_selection();
                return false;
            }
        };
        self.splice(range.0, range.1, "");
        true
    }

    /// Replace characters `start..end` and leave the caret after `insert`.
    fn splice(&mut self, start: usize, end: usize, insert: &str) {
        let bytes = byte_offset(&self.text, start)..byte_offset(&self.text, end);
        self.text.replace_range(bytes, insert);
        self.cursor = start + insert.chars().count();
        self.clear_selection();
    }

    fn step(&mut self, delta: isize, extend: bool) {
        if let (false, Some((start, end))) = (extend, self.selection()) {
            self.cursor = if delta < 0 { start } else { end };
            self.clear_selection();
            return;
        }
        let target = self.cursor.saturating_add_signed(delta).min(self.len());
        self.move_to(target, extend);
    }

    fn move_to(&mut self, position: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.clear_selection();
        }
        self.cursor = position;
    }
}

/// What a key press did to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    Changed,
    /// Enter.
    Submitted,
    /// Consumed without touching the text, like caret movement.
    Handled,
    /// Left for the caller.
    Ignored,
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

impl Document {
    /// The value an input displays: its edited value, or its `value`
    /// attribute until the first edit.
    pub fn input_value(&self, node: NodeId) -> String {
        let Ok(element) = self.element(node) else {
            return String::new();
        };
        match &element.input {
            Some(data) => data.text.clone(),
            None => element.attribute("value").unwrap_or_default().to_string(),
        }
    }

    /// Editing state, once the input has been edited.
    pub fn input_data(&self, node: NodeId) -> Option<&TextInputData> {
        self.element(node).ok()?.input.as_ref()
    }

    /// Replace the live value without dispatching events. Later changes to
    /// the `value` attribute no longer affect what the input shows.
    pub fn set_input_value(&mut self, node: NodeId, value: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(node)?.input = Some(TextInputData::new(value));
        Ok(())
    }

    fn input_data_mut(&mut self, node: NodeId) -> Result<&mut TextInputData, DomError> {
        let element = self.element_mut(node)?;
        if element.input.is_none() {
            let seed = element.attribute("value").unwrap_or_default().to_string();
            element.input = Some(TextInputData::new(seed));
        }
        Ok(element.input.get_or_insert_with(TextInputData::default))
    }

    /// Deliver a key press to `node`.
    ///
    /// Inputs edit their live value and dispatch `input` when the text
    /// changed, or `change` on Enter. Buttons treat Enter and Space as a
    /// click.
    pub fn handle_key(
        &mut self,
        node: NodeId,
        key: Key,
        modifiers: Modifiers,
    ) -> Result<TextEditResult, DomError> {
        if self.has_attribute(node, "disabled") {
            return Ok(TextEditResult::Ignored);
        }
        match self.tag(node) {
            Some("input") => {
                let result = self.input_data_mut(node)?.handle_key(key, modifiers);
                match result {
                    TextEditResult::Changed => {
                        self.dispatch_event(node, Event::new("input").bubbles().composed())?;
                    }
                    TextEditResult::Submitted => {
                        self.dispatch_event(node, Event::new("change").bubbles())?;
                    }
                    TextEditResult::Handled | TextEditResult::Ignored => {}
                }
                Ok(result)
            }
            Some("button") if matches!(key, Key::Enter | Key::Char(' ')) && modifiers.none() => {
                self.click(node)?;
                Ok(TextEditResult::Handled)
            }
            _ => Ok(TextEditResult::Ignored),
        }
    }

    /// Type `text` into an input one character at a time, as a user would.
    pub fn type_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        for c in text.chars() {
            self.handle_key(node, Key::Char(c), Modifiers::new())?;
        }
        Ok(())
    }

    /// Replace an input's whole value and dispatch a single `input` event.
    pub fn fill(&mut self, node: NodeId, text: &str) -> Result<usize, DomError> {
        if self.tag(node) != Some("input") {
            return Err(DomError::NotAnInput(node));
        }
        self.set_input_value(node, text)?;
        self.dispatch_event(node, Event::new("input").bubbles().composed())
    }
}
