//! Renderer - Draw-primitive sinks.
//!
//! Components draw through the [`DrawSink`] trait and never talk to a
//! backend directly. Two sinks ship with the crate:
//!
//! - [`RecordingSink`] keeps every command, for tests and snapshotting.
//! - [`TerminalSink`] rasterizes into a cell grid and writes only the cells
//!   that changed since the previous frame.

mod terminal;

pub use terminal::{Cell, TerminalSink};

use taffy::{Point, Size};

use crate::font::FontMetrics;
use crate::types::Rgba;

/// Backend the render pass draws into.
pub trait DrawSink {
    fn fill_rect(&mut self, origin: Point<f32>, size: Size<f32>, color: Rgba);

    /// `roundness` is the corner radius relative to the shorter side (0..=1).
    fn fill_rounded_rect(&mut self, origin: Point<f32>, size: Size<f32>, roundness: f32, color: Rgba);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point<f32>, font: &dyn FontMetrics, color: Rgba);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        origin: Point<f32>,
        size: Size<f32>,
        color: Rgba,
    },
    RoundedRect {
        origin: Point<f32>,
        size: Size<f32>,
        roundness: f32,
        color: Rgba,
    },
    Text {
        text: String,
        origin: Point<f32>,
        color: Rgba,
    },
}

/// Sink that stores draw calls in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text commands, in draw order.
    pub fn texts(&self) -> Vec<(&str, Point<f32>)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, origin, .. } => Some((text.as_str(), *origin)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSink for RecordingSink {
    fn fill_rect(&mut self, origin: Point<f32>, size: Size<f32>, color: Rgba) {
        self.commands.push(DrawCommand::Rect { origin, size, color });
    }

    fn fill_rounded_rect(&mut self, origin: Point<f32>, size: Size<f32>, roundness: f32, color: Rgba) {
        self.commands.push(DrawCommand::RoundedRect {
            origin,
            size,
            roundness,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point<f32>, _font: &dyn FontMetrics, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            color,
        });
    }
}
