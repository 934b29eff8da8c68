//! Keyboard Module - Key codes and the per-frame key action.
//!
//! Input is aggregated per frame rather than per key event. A frame's
//! [`KeyAction`] says which characters were typed, which keys went down
//! this frame, which came up, and which are still held. The editor and the
//! key-repeat state machine both work on that snapshot.
//!
//! # Example
//!
//! ```ignore
//! use ember_ui::state::keyboard::{Key, KeyAction};
//!
//! let action = KeyAction::new(now)
//!     .with_pressed(Key::Char('a'))
//!     .with_chars("a");
//! assert!(action.is_pressed(Key::Char('a')));
//! ```

use std::time::Instant;

use bitflags::bitflags;

// =============================================================================
// KEYS
// =============================================================================

/// A physical key the UI cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Home,
    End,
    LeftControl,
    RightControl,
    LeftAlt,
    /// AltGr on layouts that have one.
    RightAlt,
    LeftShift,
    RightShift,
    /// A key that produces a character, identified by its base character.
    Char(char),
    F(u8),
}

impl Key {
    pub const fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::LeftControl
                | Self::RightControl
                | Self::LeftAlt
                | Self::RightAlt
                | Self::LeftShift
                | Self::RightShift
        )
    }

    /// Character keys that are letters (the ones AltGr combines with).
    pub fn is_letter(&self) -> bool {
        matches!(self, Self::Char(c) if c.is_alphabetic())
    }
}

bitflags! {
    /// Modifier keys held during a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const ALT = 1 << 1;
        const ALT_GR = 1 << 2;
        const SHIFT = 1 << 3;
    }
}

impl Modifiers {
    /// Modifiers implied by a set of held keys.
    pub fn from_keys(keys: &[Key]) -> Self {
        keys.iter().fold(Self::empty(), |mods, key| {
            mods | match key {
                Key::LeftControl | Key::RightControl => Self::CTRL,
                Key::LeftAlt => Self::ALT,
                Key::RightAlt => Self::ALT_GR,
                Key::LeftShift | Key::RightShift => Self::SHIFT,
                _ => Self::empty(),
            }
        })
    }

    /// Ctrl or plain Alt turns keys into shortcuts instead of text.
    pub fn is_shortcut(&self) -> bool {
        self.intersects(Self::CTRL | Self::ALT)
    }
}

// =============================================================================
// KEY ACTION
// =============================================================================

/// Aggregated key state for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyAction {
    /// Characters typed this frame, in order.
    pub pressed_chars: Vec<char>,
    /// Keys held down at the end of the frame.
    pub down_keys: Vec<Key>,
    /// Keys that went down this frame.
    pub pressed_keys: Vec<Key>,
    /// Keys that came up this frame.
    pub released_keys: Vec<Key>,
    /// When the frame was collected. Drives repeat timing.
    pub at: Instant,
}

impl KeyAction {
    pub fn new(at: Instant) -> Self {
        Self {
            pressed_chars: Vec::new(),
            down_keys: Vec::new(),
            pressed_keys: Vec::new(),
            released_keys: Vec::new(),
            at,
        }
    }

    /// A key going down this frame and staying held.
    pub fn with_pressed(mut self, key: Key) -> Self {
        self.pressed_keys.push(key);
        if !self.down_keys.contains(&key) {
            self.down_keys.push(key);
        }
        self
    }

    /// A key held since an earlier frame.
    pub fn with_down(mut self, key: Key) -> Self {
        if !self.down_keys.contains(&key) {
            self.down_keys.push(key);
        }
        self
    }

    pub fn with_released(mut self, key: Key) -> Self {
        self.released_keys.push(key);
        self.down_keys.retain(|k| *k != key);
        self
    }

    pub fn with_chars(mut self, chars: &str) -> Self {
        self.pressed_chars.extend(chars.chars());
        self
    }

    /// No field carries anything. Empty actions are never published.
    pub fn is_empty(&self) -> bool {
        self.pressed_chars.is_empty()
            && self.down_keys.is_empty()
            && self.pressed_keys.is_empty()
            && self.released_keys.is_empty()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down_keys.contains(&key)
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_keys(&self.down_keys)
    }

    /// Held keys that are not modifiers.
    pub fn held_non_modifiers(&self) -> impl Iterator<Item = Key> + '_ {
        self.down_keys.iter().copied().filter(|k| !k.is_modifier())
    }
}
