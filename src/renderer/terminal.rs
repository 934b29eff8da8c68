//! Terminal sink with differential output.
//!
//! Draw calls rasterize into a grid of cells, one per terminal column/row.
//! `present` compares the grid with the previous frame and only emits
//! cells that changed, wrapped in a synchronized update so the terminal
//! never shows a half-drawn frame.
//!
//! Coordinates are cells. Pair this sink with [`TerminalCellFont`] so layout
//! and rasterization agree on glyph widths.
//!
//! [`TerminalCellFont`]: crate::font::TerminalCellFont

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use crossterm::queue;
use taffy::{Point, Size};
use unicode_width::UnicodeWidthChar;

use super::DrawSink;
use crate::font::FontMetrics;
use crate::types::Rgba;

/// Marks the cell covered by the right half of a wide glyph.
const CONTINUATION: char = '\0';

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgba,
    pub bg: Rgba,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgba::WHITE,
            bg: Rgba::TRANSPARENT,
        }
    }
}

pub struct TerminalSink {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    previous: Option<Vec<Cell>>,
}

impl TerminalSink {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            previous: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid. The next `present` redraws everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Reset every cell before drawing a new frame.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Force a full redraw on the next `present`.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.cells.get_mut(y as usize * self.width as usize + x as usize)
    }

    /// Text of row `y` with continuation cells dropped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| cell.char != CONTINUATION)
            .map(|cell| cell.char)
            .collect()
    }

    /// Write changed cells to `out`.
    ///
    /// Returns true if any cell was written.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        let mut has_changes = false;
        queue!(out, BeginSynchronizedUpdate)?;

        for y in 0..self.height {
            for x in 0..self.width {
                let index = y as usize * self.width as usize + x as usize;
                let cell = self.cells[index];
                if cell.char == CONTINUATION {
                    continue;
                }

                let changed = match &self.previous {
                    Some(prev) => prev.get(index) != Some(&cell),
                    None => true,
                };
                if !changed {
                    continue;
                }

                has_changes = true;
                queue!(
                    out,
                    MoveTo(x, y),
                    SetForegroundColor(to_color(cell.fg)),
                    SetBackgroundColor(to_color(cell.bg)),
                    Print(cell.char)
                )?;
            }
        }

        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = Some(self.cells.clone());
        Ok(has_changes)
    }
}

fn to_color(color: Rgba) -> Color {
    if color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

/// Cell span covered by `[start, start + len)`.
fn cell_span(start: f32, len: f32) -> (i32, i32) {
    (start.round() as i32, (start + len).round() as i32)
}

impl DrawSink for TerminalSink {
    fn fill_rect(&mut self, origin: Point<f32>, size: Size<f32>, color: Rgba) {
        let (x0, x1) = cell_span(origin.x, size.width);
        let (y0, y1) = cell_span(origin.y, size.height);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell {
                        char: ' ',
                        fg: cell.fg,
                        bg: color,
                    };
                }
            }
        }
    }

    // Cells have no sub-cell corners to round.
    fn fill_rounded_rect(&mut self, origin: Point<f32>, size: Size<f32>, _roundness: f32, color: Rgba) {
        self.fill_rect(origin, size, color);
    }

    fn draw_text(&mut self, text: &str, origin: Point<f32>, _font: &dyn FontMetrics, color: Rgba) {
        let y = origin.y.round() as i32;
        let mut x = origin.x.round() as i32;

        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if let Some(cell) = self.get_mut(x, y) {
                cell.char = ch;
                cell.fg = color;
            }
            if width == 2 {
                if let Some(cell) = self.get_mut(x + 1, y) {
                    cell.char = CONTINUATION;
                    cell.fg = color;
                }
            }
            x += width;
        }
    }
}
