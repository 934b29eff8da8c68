//! Input Module - Crossterm events folded into per-frame key actions.
//!
//! Terminals deliver one event per key transition. The UI wants one
//! snapshot per frame, so [`KeyFrameCollector`] accumulates events between
//! frames and hands out a [`KeyAction`] at the end of each.
//!
//! Held keys are only known when the terminal reports releases (the kitty
//! keyboard protocol, enabled with [`enable_key_release_events`]). Without
//! it every key is treated as released at the end of the frame it was
//! pressed in. That release is reported in the next frame's action, unless
//! the key was pressed again, and repeats come from the terminal's own
//! auto-repeat.
//!
//! # Example
//!
//! ```ignore
//! use ember_ui::state::input::KeyFrameCollector;
//! use std::time::{Duration, Instant};
//!
//! let mut collector = KeyFrameCollector::new(false);
//! collector.poll(Duration::from_millis(16))?;
//! if let Some(action) = collector.finish_frame(Instant::now()) {
//!     // publish it
//! }
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers, KeyboardEnhancementFlags, ModifierKeyCode,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use super::keyboard::{Key, KeyAction};

// =============================================================================
// KEY CONVERSION
// =============================================================================

/// Convert a crossterm key code to our key, if it is one we track.
pub fn convert_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c.to_lowercase().next().unwrap_or(c)),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::F(n) => Key::F(n),
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftControl => Key::LeftControl,
            ModifierKeyCode::RightControl => Key::RightControl,
            ModifierKeyCode::LeftAlt => Key::LeftAlt,
            ModifierKeyCode::RightAlt | ModifierKeyCode::IsoLevel3Shift => Key::RightAlt,
            ModifierKeyCode::LeftShift => Key::LeftShift,
            ModifierKeyCode::RightShift => Key::RightShift,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

/// Modifier keys implied by the event's modifier flags.
///
/// Terminals without the kitty protocol never send modifier keys on their
/// own, only these flags.
fn implied_modifiers(mods: KeyModifiers) -> impl Iterator<Item = Key> {
    [
        (KeyModifiers::CONTROL, Key::LeftControl),
        (KeyModifiers::ALT, Key::LeftAlt),
        (KeyModifiers::SHIFT, Key::LeftShift),
    ]
    .into_iter()
    .filter(move |(flag, _)| mods.contains(*flag))
    .map(|(_, key)| key)
}

// =============================================================================
// FRAME COLLECTOR
// =============================================================================

pub struct KeyFrameCollector {
    reports_releases: bool,
    pressed_chars: Vec<char>,
    down_keys: Vec<Key>,
    pressed_keys: Vec<Key>,
    released_keys: Vec<Key>,
    /// Flags-only modifiers for this frame, when releases are not reported.
    frame_modifiers: Vec<Key>,
    /// Keys dropped at the end of the last frame, when releases are not reported.
    pending_releases: Vec<Key>,
    resize: Option<(u16, u16)>,
}

impl KeyFrameCollector {
    pub fn new(reports_releases: bool) -> Self {
        Self {
            reports_releases,
            pressed_chars: Vec::new(),
            down_keys: Vec::new(),
            pressed_keys: Vec::new(),
            released_keys: Vec::new(),
            frame_modifiers: Vec::new(),
            pending_releases: Vec::new(),
            resize: None,
        }
    }

    /// Fold one crossterm event into the current frame.
    pub fn push_event(&mut self, event: &CrosstermEvent) {
        match event {
            CrosstermEvent::Key(key) => self.push_key(key),
            CrosstermEvent::Resize(w, h) => self.resize = Some((*w, *h)),
            _ => {}
        }
    }

    fn push_key(&mut self, event: &CrosstermKeyEvent) {
        if !self.reports_releases {
            for key in implied_modifiers(event.modifiers) {
                if !self.frame_modifiers.contains(&key) {
                    self.frame_modifiers.push(key);
                }
            }
        }

        let Some(key) = convert_key_code(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if event.kind == KeyEventKind::Press {
                    self.pressed_keys.push(key);
                }
                if !self.down_keys.contains(&key) {
                    self.down_keys.push(key);
                }
                if let KeyCode::Char(c) = event.code {
                    self.pressed_chars.push(c);
                }
            }
            KeyEventKind::Release => {
                self.released_keys.push(key);
                self.down_keys.retain(|k| *k != key);
            }
        }
    }

    /// Poll crossterm for up to `timeout`, folding every pending event.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !poll(remaining)? {
                return Ok(());
            }
            self.push_event(&read()?);
            if remaining.is_zero() {
                return Ok(());
            }
        }
    }

    /// Latest terminal size reported since the last call.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resize.take()
    }

    /// Close the frame.
    ///
    /// # Returns
    ///
    /// The frame's key action, or `None` if nothing happened.
    pub fn finish_frame(&mut self, now: Instant) -> Option<KeyAction> {
        let mut down_keys = self.down_keys.clone();
        for key in self.frame_modifiers.drain(..) {
            if !down_keys.contains(&key) {
                down_keys.push(key);
            }
        }

        let mut released_keys = std::mem::take(&mut self.released_keys);
        for key in self.pending_releases.drain(..) {
            if !down_keys.contains(&key) && !released_keys.contains(&key) {
                released_keys.push(key);
            }
        }

        let action = KeyAction {
            pressed_chars: std::mem::take(&mut self.pressed_chars),
            down_keys,
            pressed_keys: std::mem::take(&mut self.pressed_keys),
            released_keys,
            at: now,
        };

        if !self.reports_releases {
            self.pending_releases = action.down_keys.clone();
            self.down_keys.clear();
        }

        (!action.is_empty()).then_some(action)
    }
}

// =============================================================================
// KEYBOARD PROTOCOL
// =============================================================================

/// Ask the terminal to report key releases and modifier keys.
///
/// Returns false when the terminal does not support it.
pub fn enable_key_release_events<W: Write>(out: &mut W) -> io::Result<bool> {
    if !crossterm::terminal::supports_keyboard_enhancement()? {
        return Ok(false);
    }
    execute!(
        out,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    )?;
    Ok(true)
}

pub fn disable_key_release_events<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, PopKeyboardEnhancementFlags)
}
