//! Text Primitive - Static or reactive text, optionally wrapped.
//!
//! Content is a [`PropValue`], so a text node can mirror a signal (for
//! example an input's value) and pick up changes on the next pass.
//!
//! # Example
//!
//! ```ignore
//! let echo = Text::new(TextProps {
//!     content: input.value().into(),
//!     font: "mono".into(),
//!     ..Default::default()
//! });
//! ```

use std::time::Instant;

use taffy::{Point, Size};

use crate::error::Result;
use crate::font::FontRegistry;
use crate::layout::{measure_lines, wrap_text, WrapOptions, WrapResult};
use crate::renderer::DrawSink;
use crate::types::{PositionState, Rgba};

use super::component::Component;
use super::types::{PropValue, TextProps};

pub struct Text {
    content: PropValue<String>,
    font: String,
    color: Rgba,
    wrap: bool,
    wrap_options: WrapOptions,
    /// Lines from the last measurement pass.
    layout: WrapResult,
    state: PositionState,
}

impl Text {
    pub fn new(props: TextProps) -> Self {
        Self {
            content: props.content,
            font: props.font,
            color: props.color,
            wrap: props.wrap,
            wrap_options: props.wrap_options,
            layout: WrapResult::default(),
            state: PositionState::default(),
        }
    }

    pub fn content(&self) -> String {
        self.content.get()
    }

    pub fn set_content(&mut self, content: impl Into<PropValue<String>>) {
        self.content = content.into();
    }

    /// Lines produced by the last measurement pass.
    pub fn lines(&self) -> &[String] {
        &self.layout.lines
    }
}

impl Component for Text {
    fn measure(&mut self, fonts: &FontRegistry, max_viewport: Size<f32>) -> Result<Size<f32>> {
        let font = fonts.get(&self.font)?;
        let content = self.content.get();

        self.layout = if self.wrap {
            let chars: Vec<char> = content.chars().collect();
            wrap_text(&chars, font, max_viewport.width, &self.wrap_options)?
        } else {
            measure_lines(&content, font, self.wrap_options.line_spacing)
        };

        tracing::trace!(
            font = %self.font,
            lines = self.layout.line_count(),
            width = self.layout.size.width,
            "measured text"
        );
        Ok(self.layout.size)
    }

    fn render(&mut self, fonts: &FontRegistry, sink: &mut dyn DrawSink, _now: Instant) -> Result<()> {
        let font = fonts.get(&self.font)?;
        let origin = self.state.absolute();
        let step = font.line_height() + self.wrap_options.line_spacing;

        for (i, line) in self.layout.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let position = Point {
                x: origin.x,
                y: origin.y + i as f32 * step,
            };
            sink.draw_text(line, position, font, self.color);
        }
        Ok(())
    }

    fn set_position(&mut self, position: Point<f32>) {
        self.state.position = position;
    }

    fn set_position_offset(&mut self, offset: Point<f32>) {
        self.state.offset = offset;
    }

    fn position(&self) -> Point<f32> {
        self.state.absolute()
    }

    fn size(&self) -> Size<f32> {
        self.layout.size
    }
}
