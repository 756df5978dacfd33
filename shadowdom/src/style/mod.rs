//! Styles, selectors and their resolution against the composed tree.

mod color;
mod resolve;
mod sheet;

use std::ops::BitOr;

pub use color::{Color, Rgb};
pub use sheet::{Rule, Selector, StyleSheet};

/// Terminal text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            italic: false,
            underline: false,
        }
    }
}

impl BitOr for TextStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bold: self.bold || rhs.bold,
            dim: self.dim || rhs.dim,
            italic: self.italic || rhs.italic,
            underline: self.underline || rhs.underline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Starts on a new line and takes the full width.
    Block,
    /// Flows on the current line.
    Inline,
    /// Not laid out or rendered.
    None,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    /// Colour of the rule drawn under inputs.
    pub border_color: Option<Color>,
    pub text_style: TextStyle,
    pub display: Option<Display>,
    /// Horizontal padding inside buttons.
    pub padding_x: Option<u16>,
    pub min_width: Option<u16>,
    /// Blank rows above and below a block.
    pub margin_y: Option<u16>,
}

macro_rules! optional_setters {
    ($($field:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $field(mut self, $field: $ty) -> Self {
                self.$field = Some($field);
                self
            }
        )*
    };
}

macro_rules! flag_setters {
    ($($flag:ident),* $(,)?) => {
        $(
            pub fn $flag(mut self) -> Self {
                self.text_style.$flag = true;
                self
            }
        )*
    };
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    optional_setters! {
        background: Color,
        foreground: Color,
        border_color: Color,
        display: Display,
        padding_x: u16,
        min_width: u16,
        margin_y: u16,
    }

    flag_setters!(bold, dim, italic, underline);

    /// Overlay `other` on `self`. Fields `other` sets win; text attributes
    /// accumulate.
    pub fn merge(&mut self, other: &Style) {
        fn overlay<T: Clone>(base: &mut Option<T>, top: &Option<T>) {
            if top.is_some() {
                base.clone_from(top);
            }
        }

        overlay(&mut self.background, &other.background);
        overlay(&mut self.foreground, &other.foreground);
        overlay(&mut self.border_color, &other.border_color);
        overlay(&mut self.display, &other.display);
        overlay(&mut self.padding_x, &other.padding_x);
        overlay(&mut self.min_width, &other.min_width);
        overlay(&mut self.margin_y, &other.margin_y);
        self.text_style = self.text_style | other.text_style;
    }
}
