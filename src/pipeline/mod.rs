//! Frame Pipeline
//!
//! This module connects the node tree to a host: a [`Ui`] root that runs one
//! frame at a time, and a terminal mount that drives it.
//!
//! # Pipeline Architecture
//!
//! ```text
//! crossterm events → KeyFrameCollector → KeyAction → EventBus → TextInput edits
//!                                                                   ↓
//!                         DrawSink ← render ← place ← measure ← Ui::tick
//! ```
//!
//! ## Data Flow
//!
//! 1. **dispatch** - The frame's key action and any resize go out on the bus
//! 2. **measure** - The root sizes itself against the viewport, top down
//! 3. **place** - The root sits at the origin and pushes offsets to children
//! 4. **render** - Every node draws its stored geometry into the sink

pub mod mount;
pub mod ui;

pub use mount::{mount, terminal_viewport, MountHandle};
pub use ui::{FrameInput, Ui, UiBuilder};
