//! Input Editor - Editing state machine behind a text input.
//!
//! The editor owns a code-point buffer and a parallel list of glyph
//! hitboxes, one per code point. Moving the caret back or deleting reuses
//! the cached widths instead of re-measuring. Outside of a single edit,
//! `hitboxes.len() == text.len()` and `cursor.rune_index <= text.len()`.
//!
//! Each frame's [`KeyAction`] is handled in a fixed order:
//!
//! 1. Ctrl or left Alt held: it is a shortcut, nothing is edited.
//! 2. The caret is shown and its blink restarted.
//! 3. Held-key repeat decides first and may consume the frame.
//! 4. Otherwise one discrete edit runs, by priority: Left, Right,
//!    Backspace, Delete, then insertion of every typed character.
//!
//! The buffer is mirrored into a [`Signal<String>`] after every change so
//! other nodes can bind to the input's value.

use std::time::Instant;

use spark_signals::{signal, Signal};
use taffy::Size;

use super::cursor::CursorState;
use super::keyboard::{Key, KeyAction};
use super::repeat::{HoldDecision, KeyRepeatState, RepeatAction};
use crate::error::Result;
use crate::font::{FontMetrics, FontRegistry};
use crate::primitives::EditorConfig;
use crate::types::GlyphHitbox;

pub struct InputEditor {
    text: Vec<char>,
    hitboxes: Vec<GlyphHitbox>,
    cursor: CursorState,
    repeat: KeyRepeatState,
    font: String,
    config: EditorConfig,
    value: Signal<String>,
}

impl InputEditor {
    pub fn new(font: impl Into<String>, config: EditorConfig, now: Instant) -> Self {
        Self {
            text: Vec::new(),
            hitboxes: Vec::new(),
            cursor: CursorState::new(now),
            repeat: KeyRepeatState::new(),
            font: font.into(),
            config,
            value: signal(String::new()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.text
    }

    pub fn hitboxes(&self) -> &[GlyphHitbox] {
        &self.hitboxes
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn repeat(&self) -> &KeyRepeatState {
        &self.repeat
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Signal mirroring the buffer.
    pub fn value(&self) -> Signal<String> {
        self.value.clone()
    }

    // =========================================================================
    // Frame handling
    // =========================================================================

    /// Apply one frame of key input.
    ///
    /// # Returns
    ///
    /// `Error::MissingFont` if characters had to be inserted and the
    /// editor's font is not registered. The buffer is left untouched.
    pub fn handle_key_action(&mut self, action: &KeyAction, fonts: &FontRegistry) -> Result<()> {
        if action.modifiers().is_shortcut() {
            tracing::trace!("shortcut frame, no edit");
            return Ok(());
        }

        self.cursor.reset_blink(action.at);

        let decision = self.repeat.process(action, &self.config);
        if let HoldDecision::Fire(repeat) = decision {
            return self.apply_repeat(repeat, fonts);
        }
        if decision.consumes_frame() {
            return Ok(());
        }

        let edited = if action.is_pressed(Key::Left) {
            self.move_left()
        } else if action.is_pressed(Key::Right) {
            self.move_right()
        } else if action.is_pressed(Key::Backspace) {
            self.backspace()
        } else if action.is_pressed(Key::Delete) {
            self.delete()
        } else if !action.pressed_chars.is_empty() {
            let font = fonts.get(&self.font)?;
            self.insert(&action.pressed_chars, font)
        } else {
            false
        };

        if edited {
            self.sync_value();
        }
        Ok(())
    }

    fn apply_repeat(&mut self, repeat: RepeatAction, fonts: &FontRegistry) -> Result<()> {
        let edited = match repeat {
            RepeatAction::MoveLeft => self.move_left(),
            RepeatAction::MoveRight => self.move_right(),
            RepeatAction::Backspace => self.backspace(),
            RepeatAction::Delete => self.delete(),
            RepeatAction::Insert(c) => {
                let font = fonts.get(&self.font)?;
                self.insert(&[c], font)
            }
        };
        if edited {
            self.sync_value();
        }
        Ok(())
    }

    /// Flip caret visibility when the blink interval has passed.
    pub fn tick_blink(&mut self, now: Instant) -> bool {
        self.cursor.tick_blink(now, self.config.blink_interval)
    }

    fn sync_value(&self) {
        self.value.set(self.text());
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Move the caret one code point left.
    pub fn move_left(&mut self) -> bool {
        if self.cursor.rune_index == 0 {
            return false;
        }
        self.cursor.rune_index -= 1;
        self.cursor.x_offset -= self.hitboxes[self.cursor.rune_index].advance;
        true
    }

    /// Move the caret one code point right.
    pub fn move_right(&mut self) -> bool {
        if self.cursor.rune_index >= self.text.len() {
            return false;
        }
        self.cursor.x_offset += self.hitboxes[self.cursor.rune_index].advance;
        self.cursor.rune_index += 1;
        true
    }

    /// Remove the code point before the caret.
    pub fn backspace(&mut self) -> bool {
        if self.cursor.rune_index == 0 {
            return false;
        }
        let index = self.cursor.rune_index - 1;
        self.text.remove(index);
        let removed = self.hitboxes.remove(index);
        self.cursor.x_offset -= removed.advance;
        self.cursor.rune_index = index;
        true
    }

    /// Remove the code point under the caret. The caret stays put.
    pub fn delete(&mut self) -> bool {
        let index = self.cursor.rune_index;
        if index >= self.text.len() {
            return false;
        }
        self.text.remove(index);
        self.hitboxes.remove(index);
        true
    }

    /// Insert `chars` at the caret, measuring each with `font`.
    pub fn insert(&mut self, chars: &[char], font: &dyn FontMetrics) -> bool {
        for &c in chars {
            let advance = font.advance(c);
            let hitbox = GlyphHitbox {
                advance,
                bounds: Size {
                    width: advance,
                    height: font.line_height(),
                },
            };

            let index = self.cursor.rune_index;
            self.text.insert(index, c);
            self.hitboxes.insert(index, hitbox);
            self.cursor.rune_index += 1;
            self.cursor.x_offset += advance;
        }
        !chars.is_empty()
    }

    /// Replace the buffer, leaving the caret at the end.
    pub fn set_text(&mut self, text: &str, fonts: &FontRegistry) -> Result<()> {
        let font = fonts.get(&self.font)?;
        self.text.clear();
        self.hitboxes.clear();
        self.cursor.rune_index = 0;
        self.cursor.x_offset = 0.0;

        let chars: Vec<char> = text.chars().collect();
        self.insert(&chars, font);
        self.sync_value();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::font::MonospaceFont;
    use proptest::prelude::*;
    use std::time::Duration;

    fn setup() -> (InputEditor, FontRegistry, Instant) {
        let mut fonts = FontRegistry::new();
        fonts.register("mono", MonospaceFont::new(32.0));
        let now = Instant::now();
        (InputEditor::new("mono", EditorConfig::default(), now), fonts, now)
    }

    fn at(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    fn typed(at: Instant, s: &str) -> KeyAction {
        KeyAction::new(at).with_chars(s)
    }

    fn press(at: Instant, key: Key) -> KeyAction {
        KeyAction::new(at).with_pressed(key)
    }

    #[test]
    fn test_insert_advances_cursor() {
        let (mut editor, fonts, t0) = setup();
        editor.handle_key_action(&typed(t0, "héllo"), &fonts).unwrap();

        assert_eq!(editor.text(), "héllo");
        assert_eq!(editor.cursor().rune_index, 5);
        assert_eq!(editor.cursor().x_offset, 160.0);
        assert_eq!(editor.hitboxes().len(), 5);
        assert_eq!(editor.value().get(), "héllo");
    }

    #[test]
    fn test_left_right_clamp() {
        let (mut editor, fonts, t0) = setup();
        editor.handle_key_action(&typed(t0, "ab"), &fonts).unwrap();

        for i in 1..=3 {
            editor.handle_key_action(&press(at(t0, i * 1000), Key::Left), &fonts).unwrap();
        }
        assert_eq!(editor.cursor().rune_index, 0);
        assert_eq!(editor.cursor().x_offset, 0.0);

        editor.handle_key_action(&press(at(t0, 5000), Key::Right), &fonts).unwrap();
        assert_eq!(editor.cursor().rune_index, 1);
        assert_eq!(editor.cursor().x_offset, 32.0);
    }

    #[test]
    fn test_insert_in_middle() {
        let (mut editor, fonts, t0) = setup();
        editor.handle_key_action(&typed(t0, "ac"), &fonts).unwrap();
        editor.handle_key_action(&press(at(t0, 1000), Key::Left), &fonts).unwrap();
        editor.handle_key_action(&typed(at(t0, 2000), "b"), &fonts).unwrap();

        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.cursor().rune_index, 2);
        assert_eq!(editor.cursor().x_offset, 64.0);
    }

    #[test]
    fn test_backspace_and_delete() {
        let (mut editor, fonts, t0) = setup();
        editor.handle_key_action(&typed(t0, "abcd"), &fonts).unwrap();
        editor.handle_key_action(&press(at(t0, 1000), Key::Left), &fonts).unwrap();
        editor.handle_key_action(&press(at(t0, 2000), Key::Left), &fonts).unwrap();

        editor.handle_key_action(&press(at(t0, 3000), Key::Backspace), &fonts).unwrap();
        assert_eq!(editor.text(), "acd");
        assert_eq!(editor.cursor().rune_index, 1);
        assert_eq!(editor.cursor().x_offset, 32.0);

        editor.handle_key_action(&press(at(t0, 4000), Key::Delete), &fonts).unwrap();
        assert_eq!(editor.text(), "ad");
        assert_eq!(editor.cursor().rune_index, 1);
        assert_eq!(editor.value().get(), "ad");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let (mut editor, fonts, t0) = setup();
        editor.handle_key_action(&press(t0, Key::Backspace), &fonts).unwrap();
        editor.handle_key_action(&press(at(t0, 1000), Key::Delete), &fonts).unwrap();
        assert!(editor.chars().is_empty());
        assert_eq!(editor.cursor().rune_index, 0);
    }

    #[test]
    fn test_shortcut_does_not_edit() {
        let (mut editor, fonts, t0) = setup();
        let ctrl_a = KeyAction::new(t0)
            .with_down(Key::LeftControl)
            .with_pressed(Key::Char('a'))
            .with_chars("a");
        editor.handle_key_action(&ctrl_a, &fonts).unwrap();

        let alt_b = KeyAction::new(t0)
            .with_down(Key::LeftAlt)
            .with_pressed(Key::Char('b'))
            .with_chars("b");
        editor.handle_key_action(&alt_b, &fonts).unwrap();
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_altgr_inserts_text() {
        let (mut editor, fonts, t0) = setup();
        let altgr = KeyAction::new(t0)
            .with_down(Key::RightAlt)
            .with_pressed(Key::Char('e'))
            .with_chars("ę");
        editor.handle_key_action(&altgr, &fonts).unwrap();
        assert_eq!(editor.text(), "ę");
    }

    #[test]
    fn test_missing_font_leaves_buffer() {
        let (mut editor, _, t0) = setup();
        let empty = FontRegistry::new();
        let err = editor.handle_key_action(&typed(t0, "x"), &empty).unwrap_err();
        assert_eq!(err, Error::MissingFont("mono".into()));
        assert!(editor.chars().is_empty());
        assert!(editor.hitboxes().is_empty());
    }

    #[test]
    fn test_held_backspace_repeats() {
        let (mut editor, fonts, t0) = setup();
        editor.set_text("abcdef", &fonts).unwrap();

        editor.handle_key_action(&press(t0, Key::Backspace), &fonts).unwrap();
        assert_eq!(editor.text(), "abcde");

        let hold = |ms| KeyAction::new(at(t0, ms)).with_down(Key::Backspace);
        editor.handle_key_action(&hold(100), &fonts).unwrap();
        editor.handle_key_action(&hold(299), &fonts).unwrap();
        assert_eq!(editor.text(), "abcde");

        editor.handle_key_action(&hold(300), &fonts).unwrap();
        assert_eq!(editor.text(), "abcd");
        editor.handle_key_action(&hold(320), &fonts).unwrap();
        assert_eq!(editor.text(), "abcd");
        editor.handle_key_action(&hold(330), &fonts).unwrap();
        assert_eq!(editor.text(), "abc");
    }

    #[test]
    fn test_held_char_repeats_after_long_delay() {
        let (mut editor, fonts, t0) = setup();
        let first = KeyAction::new(t0).with_pressed(Key::Char('z')).with_chars("z");
        editor.handle_key_action(&first, &fonts).unwrap();

        // Platform repeat chars arriving while the cooldown runs are swallowed.
        let os_repeat = KeyAction::new(at(t0, 50)).with_down(Key::Char('z')).with_chars("z");
        editor.handle_key_action(&os_repeat, &fonts).unwrap();
        assert_eq!(editor.text(), "z");

        let hold = KeyAction::new(at(t0, 300)).with_down(Key::Char('z'));
        editor.handle_key_action(&hold, &fonts).unwrap();
        assert_eq!(editor.text(), "zz");
    }

    #[test]
    fn test_input_resets_blink() {
        let (mut editor, fonts, t0) = setup();
        assert!(editor.tick_blink(at(t0, 600)));
        assert!(!editor.cursor().blink_visible);

        editor.handle_key_action(&typed(at(t0, 700), "a"), &fonts).unwrap();
        assert!(editor.cursor().blink_visible);
        assert!(!editor.tick_blink(at(t0, 1100)));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(String),
        Left,
        Right,
        Backspace,
        Delete,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-zA-Z ]{0,3}".prop_map(Op::Insert),
            Just(Op::Left),
            Just(Op::Right),
            Just(Op::Backspace),
            Just(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn test_cursor_and_hitboxes_stay_in_sync(ops in prop::collection::vec(op(), 0..40)) {
            let (mut editor, fonts, _) = setup();
            let font = fonts.get("mono").unwrap();

            for op in ops {
                match op {
                    Op::Insert(s) => {
                        let chars: Vec<char> = s.chars().collect();
                        editor.insert(&chars, font);
                    }
                    Op::Left => { editor.move_left(); }
                    Op::Right => { editor.move_right(); }
                    Op::Backspace => { editor.backspace(); }
                    Op::Delete => { editor.delete(); }
                }

                let cursor = editor.cursor();
                prop_assert!(cursor.rune_index <= editor.chars().len());
                prop_assert_eq!(editor.hitboxes().len(), editor.chars().len());
                prop_assert_eq!(cursor.x_offset, 32.0 * cursor.rune_index as f32);
            }
        }
    }
}
