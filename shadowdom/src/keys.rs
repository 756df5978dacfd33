//! Keyboard and mouse input, decoupled from crossterm.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton as CtMouseButton};

/// Keys the document reacts to. Anything else is `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Left,
    Right,
    Home,
    End,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const fn new() -> Self {
        Self {
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    pub const fn shift() -> Self {
        Self {
            shift: true,
            ..Self::new()
        }
    }

    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::new()
        }
    }

    /// No modifier held.
    pub const fn none(&self) -> bool {
        !(self.shift || self.ctrl || self.alt)
    }
}

/// A key with the modifiers held while pressing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Ctrl+C.
    pub fn is_interrupt(&self) -> bool {
        self.modifiers.ctrl && self.key == Key::Char('c')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Self::Char(c),
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Tab => Self::Tab,
            KeyCode::BackTab => Self::BackTab,
            KeyCode::Esc => Self::Escape,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            _ => Self::Unsupported,
        }
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(held: KeyModifiers) -> Self {
        Self {
            shift: held.contains(KeyModifiers::SHIFT),
            ctrl: held.contains(KeyModifiers::CONTROL),
            alt: held.contains(KeyModifiers::ALT),
        }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code.into(), event.modifiers.into())
    }
}

impl From<CtMouseButton> for MouseButton {
    fn from(button: CtMouseButton) -> Self {
        match button {
            CtMouseButton::Left => Self::Left,
            CtMouseButton::Right => Self::Right,
            CtMouseButton::Middle => Self::Middle,
        }
    }
}
