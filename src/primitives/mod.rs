//! Primitives - The node kinds a UI tree is built from.
//!
//! - [`Container`] - Lays out children along a direction with alignment
//! - [`BoxNode`] - Padding and a background around one child
//! - [`Text`] - Wrapped or line-broken text
//! - [`TextInput`] - Single-line editable text driven by key actions
//!
//! All of them implement [`Component`] and are stored in a tree as [`Node`].
//!
//! # Reactivity
//!
//! Text content is a [`PropValue`], so it can be bound to a signal:
//!
//! ```ignore
//! let input = TextInput::new(ui.bus(), ui.fonts(), input_props)?;
//! let echo = Text::new(TextProps {
//!     content: PropValue::Signal(input.value()),
//!     font: "mono".into(),
//!     ..Default::default()
//! });
//! ```

mod box_primitive;
mod component;
mod container;
mod input;
mod text;
mod types;

pub use box_primitive::BoxNode;
pub use component::{Component, Node};
pub use container::Container;
pub use input::TextInput;
pub use text::Text;
pub use types::*;

#[cfg(test)]
pub(crate) use component::testing;
