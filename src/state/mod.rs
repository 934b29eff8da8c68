//! State Module - Runtime state behind interactive nodes.
//!
//! - **Event bus** - Typed publish/subscribe keyed by event name
//! - **Keyboard** - Key codes, modifiers and the per-frame [`KeyAction`]
//! - **Input** - Folds crossterm events into key actions
//! - **Repeat** - Two-tier auto-repeat for held keys
//! - **Cursor** - Caret index, pixel offset and blink
//! - **Editor** - The editing state machine a text input drives

pub mod cursor;
pub mod editor;
pub mod event_bus;
pub mod input;
pub mod keyboard;
pub mod repeat;

pub use cursor::CursorState;
pub use editor::InputEditor;
pub use event_bus::{
    Event, EventBus, EventCallback, SubscriptionId, WindowResize, KEY_ACTION_EVENT,
    WINDOW_RESIZE_EVENT,
};
pub use input::KeyFrameCollector;
pub use keyboard::{Key, KeyAction, Modifiers};
pub use repeat::{CooldownTier, HoldDecision, KeyRepeatState, RepeatAction};
