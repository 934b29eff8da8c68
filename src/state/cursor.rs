//! Cursor Module - Caret position and blink state for text inputs.
//!
//! The caret is tracked twice: as an index into the code-point buffer and as
//! a pixel offset from the start of the text. The pixel offset is kept in
//! step with the index by adding or subtracting cached glyph widths, so the
//! font never has to be asked again when the caret moves back.
//!
//! Blinking flips visibility once per interval. Any edit makes the caret
//! visible again and restarts the interval.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    /// Position in code points, `0..=len`.
    pub rune_index: usize,
    /// Pixel offset of the caret from the start of the text.
    pub x_offset: f32,
    pub blink_visible: bool,
    pub last_blink_toggle: Instant,
}

impl CursorState {
    pub fn new(now: Instant) -> Self {
        Self {
            rune_index: 0,
            x_offset: 0.0,
            blink_visible: true,
            last_blink_toggle: now,
        }
    }

    /// Show the caret and restart the blink interval.
    pub fn reset_blink(&mut self, now: Instant) {
        self.blink_visible = true;
        self.last_blink_toggle = now;
    }

    /// Flip visibility if more than `interval` passed since the last flip.
    ///
    /// # Returns
    ///
    /// True if visibility changed.
    pub fn tick_blink(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last_blink_toggle) <= interval {
            return false;
        }
        self.blink_visible = !self.blink_visible;
        self.last_blink_toggle = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn test_blink_toggles_after_interval() {
        let t0 = Instant::now();
        let mut cursor = CursorState::new(t0);
        assert!(cursor.blink_visible);

        assert!(!cursor.tick_blink(t0 + Duration::from_millis(500), INTERVAL));
        assert!(cursor.tick_blink(t0 + Duration::from_millis(501), INTERVAL));
        assert!(!cursor.blink_visible);

        assert!(!cursor.tick_blink(t0 + Duration::from_millis(900), INTERVAL));
        assert!(cursor.tick_blink(t0 + Duration::from_millis(1002), INTERVAL));
        assert!(cursor.blink_visible);
    }

    #[test]
    fn test_reset_blink_shows_caret() {
        let t0 = Instant::now();
        let mut cursor = CursorState::new(t0);
        cursor.tick_blink(t0 + Duration::from_secs(1), INTERVAL);
        assert!(!cursor.blink_visible);

        let t1 = t0 + Duration::from_millis(1100);
        cursor.reset_blink(t1);
        assert!(cursor.blink_visible);
        assert_eq!(cursor.last_blink_toggle, t1);
    }
}
