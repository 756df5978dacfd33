use super::Cell;
use crate::style::{Rgb, TextStyle};
use crate::text::char_width;

/// Grid of cells the renderer paints into, stored row by row.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        let offset = self.offset(x, y)?;
        self.cells.get(offset)
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        let offset = self.offset(x, y)?;
        self.cells.get_mut(offset)
    }

    /// Write `text` on row `y` from column `x`, stopping before a character
    /// would cross `max_x` or the right edge. Returns the column after the
    /// last character written. Background colours are left alone.
    pub fn set_str(&mut self, x: u16, y: u16, max_x: u16, text: &str, fg: Rgb, style: TextStyle) -> u16 {
        let limit = max_x.min(self.width);
        let mut column = x;
        for c in text.chars() {
            let width = char_width(c) as u16;
            if width == 0 {
                continue;
            }
            if column.saturating_add(width) > limit {
                break;
            }
            if let Some(cell) = self.get_mut(column, y) {
                *cell = Cell {
                    char: c,
                    fg,
                    style,
                    wide_continuation: false,
                    ..*cell
                };
            }
            for covered in column.saturating_add(1)..column.saturating_add(width) {
                if let Some(cell) = self.get_mut(covered, y) {
                    cell.char = ' ';
                    cell.wide_continuation = true;
                }
            }
            column += width;
        }
        column
    }

    fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.cells[start..start + usize::from(self.width)]
    }

    /// Characters on row `y`, without the halves of wide characters.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    /// Cells of `self` that differ from `previous`, with their positions.
    /// Both buffers must have the same size.
    pub fn diff<'a>(&'a self, previous: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> + 'a {
        let width = usize::from(self.width.max(1));
        self.cells
            .iter()
            .zip(&previous.cells)
            .enumerate()
            .filter_map(move |(i, (now, before))| {
                (now != before).then(|| ((i % width) as u16, (i / width) as u16, now))
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }
}
