//! Mount API - Terminal lifecycle and the frame loop.
//!
//! [`mount`] puts the terminal into raw mode on the alternate screen and
//! returns a [`MountHandle`]. The handle collects key events into one
//! [`KeyAction`] per frame, ticks the [`Ui`] and presents the changed cells.
//! Dropping the handle restores the terminal.
//!
//! Layout runs in cells here, so the `Ui` should be built with
//! [`TerminalCellFont`](crate::font::TerminalCellFont) fonts.
//!
//! # Example
//!
//! ```ignore
//! use ember_ui::pipeline::mount;
//!
//! let mut handle = mount::mount()?;
//!
//! // Option 1: Run until Ctrl+C
//! handle.run(&mut ui)?;
//!
//! // Option 2: Tick manually in your own loop
//! while handle.tick(&mut ui)? {
//!     // Your logic here
//! }
//! ```

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, EnterAlternateScreen, LeaveAlternateScreen,
};
use taffy::Size;

use super::ui::{FrameInput, Ui};
use crate::error::Result;
use crate::renderer::TerminalSink;
use crate::state::input::{disable_key_release_events, enable_key_release_events, KeyFrameCollector};
use crate::state::keyboard::{Key, KeyAction, Modifiers};

/// Frame budget, about 60 frames per second.
const FRAME_TIME: Duration = Duration::from_millis(16);

fn cells_to_viewport((width, height): (u16, u16)) -> Size<f32> {
    Size {
        width: width as f32,
        height: height as f32,
    }
}

/// Ctrl+C stops the loop. It never reaches the tree.
fn is_quit(action: &KeyAction) -> bool {
    action.modifiers().contains(Modifiers::CTRL) && action.is_pressed(Key::Char('c'))
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Owns the terminal while mounted.
pub struct MountHandle {
    out: Stdout,
    sink: TerminalSink,
    collector: KeyFrameCollector,
    reports_releases: bool,
    running: bool,
    restored: bool,
}

impl MountHandle {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop after the current frame.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the terminal reports key releases, so held keys are tracked.
    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    /// Run one frame.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Continue running
    /// * `Ok(false)` - Stop requested (Ctrl+C or `stop()`)
    pub fn tick(&mut self, ui: &mut Ui) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }

        self.collector.poll(FRAME_TIME)?;
        let now = Instant::now();

        if let Some((width, height)) = self.collector.take_resize() {
            self.sink.resize(width, height);
        }
        let viewport = cells_to_viewport((self.sink.width(), self.sink.height()));

        let mut input = FrameInput::new(viewport, now);
        if let Some(action) = self.collector.finish_frame(now) {
            if is_quit(&action) {
                tracing::debug!("quit requested");
                self.running = false;
                return Ok(false);
            }
            input = input.with_key_action(action);
        }

        self.sink.clear();
        ui.tick(input, &mut self.sink)?;
        self.sink.present(&mut self.out)?;
        Ok(self.running)
    }

    /// Tick until Ctrl+C or `stop()`, then restore the terminal.
    pub fn run(&mut self, ui: &mut Ui) -> Result<()> {
        while self.tick(ui)? {}
        self.unmount()
    }

    /// Restore the terminal. Called again on drop, where errors are ignored.
    pub fn unmount(&mut self) -> Result<()> {
        self.running = false;
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        if self.reports_releases {
            disable_key_release_events(&mut self.out)?;
        }
        execute!(self.out, Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Err(err) = self.unmount() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Take over the terminal.
///
/// This sets up:
/// 1. Raw mode and the alternate screen
/// 2. Key release reporting, when the terminal supports it
/// 3. A cell grid sized to the terminal
pub fn mount() -> Result<MountHandle> {
    let mut out = io::stdout();
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, Hide)?;
    let reports_releases = enable_key_release_events(&mut out)?;
    out.flush()?;

    let (width, height) = size()?;
    tracing::debug!(width, height, reports_releases, "terminal mounted");

    Ok(MountHandle {
        out,
        sink: TerminalSink::new(width, height),
        collector: KeyFrameCollector::new(reports_releases),
        reports_releases,
        running: true,
        restored: false,
    })
}

/// Terminal size as a viewport in cells.
pub fn terminal_viewport() -> Result<Size<f32>> {
    Ok(cells_to_viewport(size()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_quits() {
        let now = Instant::now();
        let ctrl_c = KeyAction::new(now)
            .with_down(Key::LeftControl)
            .with_pressed(Key::Char('c'));
        assert!(is_quit(&ctrl_c));

        let plain_c = KeyAction::new(now).with_pressed(Key::Char('c')).with_chars("c");
        assert!(!is_quit(&plain_c));
    }

    #[test]
    fn test_cells_to_viewport() {
        assert_eq!(cells_to_viewport((80, 24)), Size { width: 80.0, height: 24.0 });
    }
}
