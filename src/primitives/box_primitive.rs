//! Box Primitive - Filled rectangle with padding around one child.
//!
//! The child is measured against the viewport minus padding, and the box
//! grows to the child plus padding. A box without a child is just its
//! padding, which makes it usable as a spacer or a color swatch.
//!
//! # Example
//!
//! ```ignore
//! let card = BoxNode::new(BoxProps {
//!     child: Some(label.into()),
//!     padding: ClockValues::uniform(8.0),
//!     background: Rgba::DARK_GRAY,
//!     roundness: 0.2,
//! })?;
//! ```

use std::time::Instant;

use taffy::{Point, Size};

use crate::error::{ConfigError, Result};
use crate::font::FontRegistry;
use crate::renderer::DrawSink;
use crate::types::{ClockValues, PositionState, Rgba};

use super::component::{Component, Node};
use super::types::BoxProps;

pub struct BoxNode {
    child: Option<Box<Node>>,
    padding: ClockValues,
    background: Rgba,
    roundness: f32,
    state: PositionState,
    size: Size<f32>,
}

impl BoxNode {
    /// Create a box. Negative roundness is rejected.
    pub fn new(props: BoxProps) -> std::result::Result<Self, ConfigError> {
        if props.roundness < 0.0 {
            return Err(ConfigError::NegativeRoundness(props.roundness));
        }

        Ok(Self {
            child: props.child.map(Box::new),
            padding: props.padding,
            background: props.background,
            roundness: props.roundness,
            state: PositionState::default(),
            size: Size::ZERO,
        })
    }

    pub fn child(&self) -> Option<&Node> {
        self.child.as_deref()
    }

    pub fn set_child(&mut self, child: impl Into<Node>) {
        self.child = Some(Box::new(child.into()));
    }

    pub fn padding(&self) -> ClockValues {
        self.padding
    }

    pub fn set_padding(&mut self, padding: ClockValues) {
        self.padding = padding;
    }

    fn push_offsets(&mut self) {
        let absolute = self.state.absolute();
        if let Some(child) = self.child.as_deref_mut() {
            child.set_position_offset(absolute);
        }
    }
}

impl Component for BoxNode {
    fn measure(&mut self, fonts: &FontRegistry, max_viewport: Size<f32>) -> Result<Size<f32>> {
        let padding = self.padding.sum();

        let child_size = match self.child.as_deref_mut() {
            Some(child) => {
                let inner = Size {
                    width: (max_viewport.width - padding.width).max(0.0),
                    height: (max_viewport.height - padding.height).max(0.0),
                };
                let size = child.measure(fonts, inner)?;
                child.set_position(Point {
                    x: self.padding.left(),
                    y: self.padding.top(),
                });
                size
            }
            None => Size::ZERO,
        };

        self.size = Size {
            width: child_size.width + padding.width,
            height: child_size.height + padding.height,
        };
        Ok(self.size)
    }

    fn render(&mut self, fonts: &FontRegistry, sink: &mut dyn DrawSink, now: Instant) -> Result<()> {
        let origin = self.state.absolute();

        if !self.background.is_transparent() {
            if self.roundness > 0.0 {
                sink.fill_rounded_rect(origin, self.size, self.roundness, self.background);
            } else {
                sink.fill_rect(origin, self.size, self.background);
            }
        }

        match self.child.as_deref_mut() {
            Some(child) => child.render(fonts, sink, now),
            None => Ok(()),
        }
    }

    fn set_position(&mut self, position: Point<f32>) {
        self.state.position = position;
        self.push_offsets();
    }

    fn set_position_offset(&mut self, offset: Point<f32>) {
        self.state.offset = offset;
        self.push_offsets();
    }

    fn position(&self) -> Point<f32> {
        self.state.absolute()
    }

    fn size(&self) -> Size<f32> {
        self.size
    }
}
