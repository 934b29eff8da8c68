//! Key Repeat - Two-tier auto-repeat for held keys.
//!
//! A held key first repeats after a long delay, then keeps repeating at a
//! short interval until it is released. This runs on frame snapshots, so it
//! works the same whether or not the platform sends its own repeat events.
//!
//! AltGr plus a letter (used for diacritics on many layouts) is tracked as a
//! combo: the character it produced on the first frame is what repeats.
//!
//! # States
//!
//! ```text
//! nothing held ──press──▶ Started (Long) ──held ≥ long──▶ Fire, tier Short
//!      ▲                        │                              │
//!      └──────release───────────┴──────held ≥ short──▶ Fire ◀──┘
//! ```

use std::time::{Duration, Instant};

use super::keyboard::{Key, KeyAction};
use crate::primitives::EditorConfig;

/// Which delay applies before the next repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CooldownTier {
    #[default]
    Long,
    Short,
}

/// Logical edit a repeat re-dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatAction {
    MoveLeft,
    MoveRight,
    Backspace,
    Delete,
    Insert(char),
}

/// Outcome of looking at one frame's held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldDecision {
    /// Nothing repeatable is held. Discrete handling runs.
    Idle,
    /// A new key or combo started being held. Discrete handling runs.
    Started,
    /// Same key still held, cooldown not elapsed. Frame is consumed.
    Waiting,
    /// Cooldown elapsed. Frame is consumed and this action runs instead.
    Fire(RepeatAction),
}

impl HoldDecision {
    /// Whether discrete per-press handling must be skipped for this frame.
    pub fn consumes_frame(&self) -> bool {
        matches!(self, Self::Waiting | Self::Fire(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyRepeatState {
    last_held_key: Option<Key>,
    /// Letter held together with AltGr.
    last_combo: Option<Key>,
    combo_char: Option<char>,
    last_char: Option<char>,
    cooldown_start: Option<Instant>,
    tier: CooldownTier,
}

impl KeyRepeatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self) -> CooldownTier {
        self.tier
    }

    pub fn last_held_key(&self) -> Option<Key> {
        self.last_held_key
    }

    pub fn is_idle(&self) -> bool {
        self.last_held_key.is_none()
    }

    /// Forget everything. Called when no key is held.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn restart(&mut self, key: Key, now: Instant) {
        self.last_held_key = Some(key);
        self.cooldown_start = Some(now);
        self.tier = CooldownTier::Long;
    }

    fn delay(&self, config: &EditorConfig) -> Duration {
        match self.tier {
            CooldownTier::Long => config.long_repeat_delay,
            CooldownTier::Short => config.short_repeat_delay,
        }
    }

    /// True once the current tier's delay has passed. Moves to the short tier.
    fn cooldown_elapsed(&mut self, now: Instant, config: &EditorConfig) -> bool {
        let Some(start) = self.cooldown_start else {
            return false;
        };
        if now.saturating_duration_since(start) < self.delay(config) {
            return false;
        }
        self.cooldown_start = Some(now);
        self.tier = CooldownTier::Short;
        true
    }

    /// Decide what the held keys in `action` mean for this frame.
    pub fn process(&mut self, action: &KeyAction, config: &EditorConfig) -> HoldDecision {
        let now = action.at;
        let mut held = action.held_non_modifiers();
        let (Some(key), None) = (held.next(), held.next()) else {
            // Nothing held, or a chord of several keys: neither repeats.
            self.reset();
            return HoldDecision::Idle;
        };

        if action.is_down(Key::RightAlt) && key.is_letter() {
            return self.process_combo(key, action, config);
        }
        self.last_combo = None;
        self.combo_char = None;

        // A fresh press of the held key starts a new hold. Terminals without
        // release reports never show the release in between.
        if self.last_held_key != Some(key) || action.is_pressed(key) {
            self.restart(key, now);
            if let Some(&c) = action.pressed_chars.last() {
                self.last_char = Some(c);
            }
            return HoldDecision::Started;
        }

        let repeat = match key {
            Key::Left => Some(RepeatAction::MoveLeft),
            Key::Right => Some(RepeatAction::MoveRight),
            Key::Backspace => Some(RepeatAction::Backspace),
            Key::Delete => Some(RepeatAction::Delete),
            Key::Char(_) => self.last_char.map(RepeatAction::Insert),
            _ => None,
        };

        match repeat {
            Some(repeat) if self.cooldown_elapsed(now, config) => {
                tracing::trace!(?key, ?repeat, "key repeat");
                HoldDecision::Fire(repeat)
            }
            _ => HoldDecision::Waiting,
        }
    }

    fn process_combo(&mut self, letter: Key, action: &KeyAction, config: &EditorConfig) -> HoldDecision {
        if self.last_combo == Some(letter) && !action.is_pressed(letter) {
            let combo_char = self.combo_char;
            return match combo_char {
                Some(c) if self.cooldown_elapsed(action.at, config) => {
                    HoldDecision::Fire(RepeatAction::Insert(c))
                }
                _ => HoldDecision::Waiting,
            };
        }

        self.restart(letter, action.at);
        self.last_combo = Some(letter);
        self.combo_char = action.pressed_chars.first().copied();
        if let Some(c) = self.combo_char {
            self.last_char = Some(c);
        }
        HoldDecision::Started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (KeyRepeatState, EditorConfig, Instant) {
        (KeyRepeatState::new(), EditorConfig::default(), Instant::now())
    }

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn held(at: Instant, key: Key) -> KeyAction {
        KeyAction::new(at).with_down(key)
    }

    #[test]
    fn test_idle_when_nothing_held() {
        let (mut state, config, t0) = setup();
        assert_eq!(state.process(&KeyAction::new(t0), &config), HoldDecision::Idle);
        assert!(state.is_idle());
    }

    #[test]
    fn test_long_then_short_cooldown() {
        let (mut state, config, t0) = setup();
        let press = KeyAction::new(t0).with_pressed(Key::Backspace);
        assert_eq!(state.process(&press, &config), HoldDecision::Started);
        assert_eq!(state.tier(), CooldownTier::Long);

        assert_eq!(state.process(&held(ms(t0, 299), Key::Backspace), &config), HoldDecision::Waiting);
        assert_eq!(
            state.process(&held(ms(t0, 300), Key::Backspace), &config),
            HoldDecision::Fire(RepeatAction::Backspace)
        );
        assert_eq!(state.tier(), CooldownTier::Short);

        assert_eq!(state.process(&held(ms(t0, 329), Key::Backspace), &config), HoldDecision::Waiting);
        assert_eq!(
            state.process(&held(ms(t0, 330), Key::Backspace), &config),
            HoldDecision::Fire(RepeatAction::Backspace)
        );
    }

    #[test]
    fn test_release_resets() {
        let (mut state, config, t0) = setup();
        state.process(&KeyAction::new(t0).with_pressed(Key::Left), &config);
        state.process(&held(ms(t0, 400), Key::Left), &config);
        assert_eq!(state.tier(), CooldownTier::Short);

        let release = KeyAction::new(ms(t0, 410)).with_released(Key::Left);
        assert_eq!(state.process(&release, &config), HoldDecision::Idle);
        assert_eq!(state.tier(), CooldownTier::Long);
        assert_eq!(state.last_held_key(), None);
    }

    #[test]
    fn test_switching_keys_restarts_long_tier() {
        let (mut state, config, t0) = setup();
        state.process(&KeyAction::new(t0).with_pressed(Key::Left), &config);
        state.process(&held(ms(t0, 300), Key::Left), &config);

        let switch = KeyAction::new(ms(t0, 310)).with_pressed(Key::Right);
        assert_eq!(state.process(&switch, &config), HoldDecision::Started);
        assert_eq!(state.tier(), CooldownTier::Long);
        assert_eq!(state.process(&held(ms(t0, 400), Key::Right), &config), HoldDecision::Waiting);
        assert_eq!(
            state.process(&held(ms(t0, 610), Key::Right), &config),
            HoldDecision::Fire(RepeatAction::MoveRight)
        );
    }

    #[test]
    fn test_char_repeat_uses_typed_char() {
        let (mut state, config, t0) = setup();
        let press = KeyAction::new(t0)
            .with_down(Key::LeftShift)
            .with_pressed(Key::Char('a'))
            .with_chars("A");
        assert_eq!(state.process(&press, &config), HoldDecision::Started);

        let still = KeyAction::new(ms(t0, 300))
            .with_down(Key::LeftShift)
            .with_down(Key::Char('a'));
        assert_eq!(state.process(&still, &config), HoldDecision::Fire(RepeatAction::Insert('A')));
    }

    #[test]
    fn test_altgr_combo_repeats_first_char() {
        let (mut state, config, t0) = setup();
        let press = KeyAction::new(t0)
            .with_down(Key::RightAlt)
            .with_pressed(Key::Char('e'))
            .with_chars("ę");
        assert_eq!(state.process(&press, &config), HoldDecision::Started);

        let hold = |at| KeyAction::new(at).with_down(Key::RightAlt).with_down(Key::Char('e'));
        assert_eq!(state.process(&hold(ms(t0, 100)), &config), HoldDecision::Waiting);
        assert_eq!(
            state.process(&hold(ms(t0, 300)), &config),
            HoldDecision::Fire(RepeatAction::Insert('ę'))
        );

        let other = KeyAction::new(ms(t0, 320))
            .with_down(Key::RightAlt)
            .with_pressed(Key::Char('a'))
            .with_chars("ą");
        assert_eq!(state.process(&other, &config), HoldDecision::Started);
        assert_eq!(state.tier(), CooldownTier::Long);
    }

    #[test]
    fn test_chord_is_not_repeated() {
        let (mut state, config, t0) = setup();
        let chord = KeyAction::new(t0)
            .with_pressed(Key::Char('a'))
            .with_pressed(Key::Char('s'));
        assert_eq!(state.process(&chord, &config), HoldDecision::Idle);
    }

    #[test]
    fn test_repress_without_release_restarts_hold() {
        let (mut state, config, t0) = setup();
        let press = |at| KeyAction::new(at).with_pressed(Key::Char('l')).with_chars("l");
        assert_eq!(state.process(&press(t0), &config), HoldDecision::Started);
        assert_eq!(
            state.process(&held(ms(t0, 400), Key::Char('l')), &config),
            HoldDecision::Fire(RepeatAction::Insert('l'))
        );
        assert_eq!(state.tier(), CooldownTier::Short);

        // Pressed again within the cooldown, with no release seen in between.
        assert_eq!(state.process(&press(ms(t0, 410)), &config), HoldDecision::Started);
        assert_eq!(state.tier(), CooldownTier::Long);
        assert_eq!(state.last_held_key(), Some(Key::Char('l')));
        assert_eq!(state.process(&held(ms(t0, 420), Key::Char('l')), &config), HoldDecision::Waiting);
    }

    #[test]
    fn test_consumes_frame() {
        assert!(!HoldDecision::Idle.consumes_frame());
        assert!(!HoldDecision::Started.consumes_frame());
        assert!(HoldDecision::Waiting.consumes_frame());
        assert!(HoldDecision::Fire(RepeatAction::Delete).consumes_frame());
    }
}
