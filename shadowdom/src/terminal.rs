//! Crossterm backend. Owns the screen while alive and repaints only the
//! cells that changed since the last frame.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent};
use crossterm::style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use crate::buffer::{Buffer, Cell};
use crate::document::Document;
use crate::layout::{layout, LayoutResult, Rect};
use crate::render::render_to_buffer;
use crate::style::{Rgb, TextStyle};
use crate::text::char_width;

pub struct Terminal {
    out: Stdout,
    /// What the screen currently shows.
    front: Buffer,
    /// Frame being drawn.
    back: Buffer,
    layout: LayoutResult,
}

impl Terminal {
    /// Enter raw mode and the alternate screen, capturing the mouse.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, EnableMouseCapture)?;

        let (width, height) = terminal::size()?;
        log::debug!("terminal opened at {width}x{height}");
        Ok(Self {
            out,
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
            layout: LayoutResult::new(),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }

    /// Block up to `timeout` (forever with `None`) for the next event, then
    /// take everything else already queued.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(Vec::new());
            }
        }
        let mut events = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        Ok(events)
    }

    /// Lay out and paint `doc`. The returned layout is kept for hit testing.
    pub fn render(&mut self, doc: &Document) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            log::debug!("terminal resized to {width}x{height}");
            self.front = Buffer::new(width, height);
            self.back = Buffer::new(width, height);
            execute!(self.out, Clear(ClearType::All))?;
        }

        self.back.clear();
        self.layout = layout(doc, Rect::from_size(width, height));
        render_to_buffer(doc, &self.layout, &mut self.back);
        self.present()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(&self.layout)
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    fn present(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        for (x, y, cell) in self.back.diff(&self.front) {
            if cell.wide_continuation {
                continue;
            }
            if pen.at != Some((x, y)) {
                queue!(self.out, MoveTo(x, y))?;
            }
            pen.apply(&mut self.out, cell)?;
            write!(self.out, "{}", cell.char)?;
            pen.at = Some((x + char_width(cell.char).max(1) as u16, y));
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// State last sent to the terminal. `None` colours are unknown and always
/// resent.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    style: TextStyle,
    /// Where the cursor sits after the last write.
    at: Option<(u16, u16)>,
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        if cell.style != self.style {
            // Reset clears colours as well
            queue!(out, SetAttribute(Attribute::Reset))?;
            for attribute in attributes(cell.style) {
                queue!(out, SetAttribute(attribute))?;
            }
            self.style = cell.style;
            self.fg = None;
            self.bg = None;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(ct_color(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(ct_color(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

fn ct_color(Rgb { r, g, b }: Rgb) -> CtColor {
    CtColor::Rgb { r, g, b }
}

fn attributes(style: TextStyle) -> impl Iterator<Item = Attribute> {
    let TextStyle {
        bold,
        dim,
        italic,
        underline,
    } = style;
    [
        bold.then_some(Attribute::Bold),
        dim.then_some(Attribute::Dim),
        italic.then_some(Attribute::Italic),
        underline.then_some(Attribute::Underlined),
    ]
    .into_iter()
    .flatten()
}
