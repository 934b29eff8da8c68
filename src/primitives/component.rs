//! Component capability and the node sum type.
//!
//! Every node can measure itself against a viewport, render into a sink,
//! and accept a local position plus the offset its parent pushes down.
//! [`Node`] closes the set of node kinds so a tree can be stored by value
//! with plain downward ownership.

use std::time::Instant;

use taffy::{Point, Size};

use crate::error::Result;
use crate::font::FontRegistry;
use crate::renderer::DrawSink;

use super::box_primitive::BoxNode;
use super::container::Container;
use super::input::TextInput;
use super::text::Text;

pub trait Component {
    /// Compute and store this node's size for `max_viewport`.
    fn measure(&mut self, fonts: &FontRegistry, max_viewport: Size<f32>) -> Result<Size<f32>>;

    /// Draw already-computed geometry.
    fn render(&mut self, fonts: &FontRegistry, sink: &mut dyn DrawSink, now: Instant) -> Result<()>;

    /// Set the position relative to the parent, then push offsets down.
    fn set_position(&mut self, position: Point<f32>);

    /// Set the parent's absolute position, then push offsets down.
    fn set_position_offset(&mut self, offset: Point<f32>);

    /// Absolute position.
    fn position(&self) -> Point<f32>;

    /// Size from the last measurement pass.
    fn size(&self) -> Size<f32>;
}

/// Any node in the tree.
pub enum Node {
    Container(Container),
    Box(BoxNode),
    Text(Text),
    TextInput(TextInput),
}

macro_rules! delegate {
    ($self:ident, $node:ident => $body:expr) => {
        match $self {
            Node::Container($node) => $body,
            Node::Box($node) => $body,
            Node::Text($node) => $body,
            Node::TextInput($node) => $body,
        }
    };
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Container(_) => "container",
            Node::Box(_) => "box",
            Node::Text(_) => "text",
            Node::TextInput(_) => "input",
        }
    }
}

impl Component for Node {
    fn measure(&mut self, fonts: &FontRegistry, max_viewport: Size<f32>) -> Result<Size<f32>> {
        delegate!(self, node => node.measure(fonts, max_viewport))
    }

    fn render(&mut self, fonts: &FontRegistry, sink: &mut dyn DrawSink, now: Instant) -> Result<()> {
        delegate!(self, node => node.render(fonts, sink, now))
    }

    fn set_position(&mut self, position: Point<f32>) {
        delegate!(self, node => node.set_position(position))
    }

    fn set_position_offset(&mut self, offset: Point<f32>) {
        delegate!(self, node => node.set_position_offset(offset))
    }

    fn position(&self) -> Point<f32> {
        delegate!(self, node => node.position())
    }

    fn size(&self) -> Size<f32> {
        delegate!(self, node => node.size())
    }
}

impl From<Container> for Node {
    fn from(node: Container) -> Self {
        Node::Container(node)
    }
}

impl From<BoxNode> for Node {
    fn from(node: BoxNode) -> Self {
        Node::Box(node)
    }
}

impl From<Text> for Node {
    fn from(node: Text) -> Self {
        Node::Text(node)
    }
}

impl From<TextInput> for Node {
    fn from(node: TextInput) -> Self {
        Node::TextInput(node)
    }
}
