use crate::style::{Rgb, TextStyle};

pub const DEFAULT_FG: Rgb = Rgb::new(255, 255, 255);
pub const DEFAULT_BG: Rgb = Rgb::new(0, 0, 0);

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Right half of a double-width character drawn in the cell before.
    pub wide_continuation: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        char: ' ',
        fg: DEFAULT_FG,
        bg: DEFAULT_BG,
        style: TextStyle::new(),
        wide_continuation: false,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
