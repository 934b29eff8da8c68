//! # ember-ui
//!
//! Retained-mode UI component tree for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! values that flow between nodes, such as a text input's content.
//!
//! ## Architecture
//!
//! The UI is a tree of nodes owned top down. Each frame runs one pass:
//! ```text
//! KeyAction → EventBus → TextInput edits → measure → place → render → DrawSink
//! ```
//!
//! Measurement is two-pass flex layout: children are sized against the
//! budget left along the main axis, then placed by alignment. Text wraps
//! greedily and rewinds to the last whitespace before an overflow.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Direction, Alignment, ClockValues, etc.)
//! - [`font`] - Font metrics capability and the font registry
//! - [`layout`] - Flex placement and text wrapping
//! - [`primitives`] - Container, Box, Text and TextInput nodes
//! - [`state`] - Event bus, keyboard, key repeat and the input editor
//! - [`renderer`] - Draw sinks (recording, terminal diff output)
//! - [`pipeline`] - Ui root, frame tick and terminal mount

pub mod error;
pub mod font;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{ConfigError, Error, Result, WrapError};

pub use font::{string_width, FontMetrics, FontRegistry, MonospaceFont, TerminalCellFont};

pub use layout::{
    layout_children, measure_lines, wrap_text, FlexLayout, UnbreakablePolicy, WrapOptions,
    WrapResult,
};

pub use renderer::{DrawCommand, DrawSink, RecordingSink, TerminalSink};

pub use pipeline::{mount, FrameInput, MountHandle, Ui, UiBuilder};

pub use primitives::{
    BoxNode, BoxProps, Component, Container, ContainerProps, EditorConfig, InputProps, Node,
    PropValue, Text, TextInput, TextProps,
};

pub use state::{
    // Events
    Event, EventBus, SubscriptionId, WindowResize, KEY_ACTION_EVENT, WINDOW_RESIZE_EVENT,
    // Keyboard
    Key, KeyAction, KeyFrameCollector, Modifiers,
    // Editing
    InputEditor,
};
