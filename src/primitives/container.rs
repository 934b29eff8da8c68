//! Container - Lays out children along a main axis.
//!
//! Sizing and placement live in [`crate::layout::flex`]; the container only
//! owns its children and forwards its absolute position to them.
//!
//! # Example
//!
//! ```ignore
//! let column = Container::new(ContainerProps {
//!     direction: Direction::Column,
//!     cross_axis: Alignment::Center,
//!     children: vec![title.into(), input.into()],
//!     ..Default::default()
//! });
//! ```

use std::time::Instant;

use taffy::{Point, Size};

use crate::error::{ConfigError, Result};
use crate::font::FontRegistry;
use crate::layout::{layout_children, FlexLayout};
use crate::renderer::DrawSink;
use crate::types::{Alignment, Direction, PositionState};

use super::component::{Component, Node};
use super::types::ContainerProps;

pub struct Container {
    layout: FlexLayout,
    children: Vec<Node>,
    state: PositionState,
    size: Size<f32>,
}

impl Container {
    pub fn new(props: ContainerProps) -> Self {
        Self {
            layout: FlexLayout {
                direction: props.direction,
                main_axis: props.main_axis,
                cross_axis: props.cross_axis,
            },
            children: props.children,
            state: PositionState::default(),
            size: Size::ZERO,
        }
    }

    /// Build from raw enum values, rejecting anything out of range.
    pub fn from_raw(
        direction: u8,
        main_axis: u8,
        cross_axis: u8,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(ContainerProps {
            direction: Direction::try_from(direction)?,
            main_axis: Alignment::try_from(main_axis)?,
            cross_axis: Alignment::try_from(cross_axis)?,
            children: Vec::new(),
        }))
    }

    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn layout(&self) -> &FlexLayout {
        &self.layout
    }

    fn push_offsets(&mut self) {
        let absolute = self.state.absolute();
        for child in &mut self.children {
            child.set_position_offset(absolute);
        }
    }
}

impl Component for Container {
    fn measure(&mut self, fonts: &FontRegistry, max_viewport: Size<f32>) -> Result<Size<f32>> {
        self.size = layout_children(&self.layout, &mut self.children, fonts, max_viewport)?;
        Ok(self.size)
    }

    fn render(&mut self, fonts: &FontRegistry, sink: &mut dyn DrawSink, now: Instant) -> Result<()> {
        for child in &mut self.children {
            child.render(fonts, sink, now)?;
        }
        Ok(())
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
