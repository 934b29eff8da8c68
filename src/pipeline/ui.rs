//! Ui Root - Owns the shared services and runs one frame at a time.
//!
//! The root holds the event bus, the font registry and the mounted node
//! tree. Every frame goes through [`Ui::tick`]:
//!
//! ```text
//! key action ─▶ bus ─▶ inputs edit ─┐
//! resize     ─▶ bus ────────────────┤
//!                                   ▼
//!                  measure root ─▶ place at origin ─▶ render into sink
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut ui = UiBuilder::new()
//!     .with_viewport(800.0, 600.0)
//!     .with_font("mono", MonospaceFont::new(32.0))
//!     .build();
//! let input = TextInput::new(ui.bus(), ui.fonts(), props)?;
//! ui.mount(input);
//! ui.tick(FrameInput::new(viewport, Instant::now()), &mut sink)?;
//! ```

use std::rc::Rc;
use std::time::Instant;

use taffy::{Point, Size};

use crate::error::Result;
use crate::font::{FontMetrics, FontRegistry};
use crate::primitives::{Component, Node};
use crate::renderer::DrawSink;
use crate::state::event_bus::{Event, EventBus, WindowResize, KEY_ACTION_EVENT, WINDOW_RESIZE_EVENT};
use crate::state::keyboard::KeyAction;

/// Everything the host collected for one frame.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub key_action: Option<KeyAction>,
    pub viewport: Size<f32>,
    pub now: Instant,
}

impl FrameInput {
    pub fn new(viewport: Size<f32>, now: Instant) -> Self {
        Self {
            key_action: None,
            viewport,
            now,
        }
    }

    pub fn with_key_action(mut self, action: KeyAction) -> Self {
        self.key_action = Some(action);
        self
    }
}

// =============================================================================
// Ui
// =============================================================================

pub struct Ui {
    bus: EventBus,
    fonts: Rc<FontRegistry>,
    viewport: Size<f32>,
    root: Option<Node>,
}

impl Ui {
    pub fn new(fonts: FontRegistry, viewport: Size<f32>) -> Self {
        Self {
            bus: EventBus::new(),
            fonts: Rc::new(fonts),
            viewport,
            root: None,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Shared font registry, for nodes that measure outside the frame pass.
    pub fn fonts(&self) -> Rc<FontRegistry> {
        Rc::clone(&self.fonts)
    }

    pub fn viewport(&self) -> Size<f32> {
        self.viewport
    }

    /// Replace the root node. The previous root is dropped.
    pub fn mount(&mut self, root: impl Into<Node>) {
        self.root = Some(root.into());
    }

    /// Remove and return the root node.
    pub fn unmount(&mut self) -> Option<Node> {
        self.root.take()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Node> {
        self.root.as_mut()
    }

    /// Run one frame: dispatch input, lay out, then render into `sink`.
    ///
    /// # Arguments
    ///
    /// * `input` - Key action, current viewport and frame time
    /// * `sink` - Where the frame is drawn
    pub fn tick(&mut self, input: FrameInput, sink: &mut dyn DrawSink) -> Result<()> {
        if let Some(action) = input.key_action.filter(|action| !action.is_empty()) {
            let delivered = self.bus.publish(KEY_ACTION_EVENT, &Event::KeyAction(action));
            tracing::debug!(delivered, "key action dispatched");
        }

        self.layout(input.viewport)?;

        if let Some(root) = self.root.as_mut() {
            root.render(&self.fonts, sink, input.now)?;
        }
        Ok(())
    }

    /// Publish a resize if `viewport` changed, then measure and place the
    /// root at the origin.
    ///
    /// # Returns
    ///
    /// The root's measured size, or zero when nothing is mounted.
    pub fn layout(&mut self, viewport: Size<f32>) -> Result<Size<f32>> {
        if viewport != self.viewport {
            let resize = WindowResize {
                old_size: self.viewport,
                new_size: viewport,
            };
            self.viewport = viewport;
            tracing::debug!(old = ?resize.old_size, new = ?resize.new_size, "viewport resized");
            self.bus.publish(WINDOW_RESIZE_EVENT, &Event::WindowResize(resize));
        }

        let Some(root) = self.root.as_mut() else {
            return Ok(Size::ZERO);
        };
        let size = root.measure(&self.fonts, self.viewport)?;
        root.set_position_offset(Point::ZERO);
        root.set_position(Point::ZERO);
        tracing::debug!(root = root.kind(), ?size, "layout done");
        Ok(size)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects fonts and the initial viewport before the registry is shared.
pub struct UiBuilder {
    fonts: FontRegistry,
    viewport: Size<f32>,
}

impl Default for UiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UiBuilder {
    pub fn new() -> Self {
        Self {
            fonts: FontRegistry::new(),
            viewport: Size {
                width: 800.0,
                height: 600.0,
            },
        }
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size { width, height };
        self
    }

    pub fn with_font(mut self, name: impl Into<String>, font: impl FontMetrics + 'static) -> Self {
        self.fonts.register(name, font);
        self
    }

    pub fn build(self) -> Ui {
        Ui::new(self.fonts, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::MonospaceFont;
    use crate::primitives::{Text, TextProps};
    use crate::renderer::RecordingSink;
    use std::cell::RefCell;

    fn setup() -> Ui {
        UiBuilder::new()
            .with_viewport(800.0, 600.0)
            .with_font("mono", MonospaceFont::new(32.0))
            .build()
    }

    fn text(content: &str) -> Text {
        Text::new(TextProps {
            content: content.into(),
            font: "mono".into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_tick_without_root() {
        let mut ui = setup();
        let mut sink = RecordingSink::new();
        let viewport = ui.viewport();
        ui.tick(FrameInput::new(viewport, Instant::now()), &mut sink).unwrap();
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn test_tick_renders_root() {
        let mut ui = setup();
        ui.mount(text("hi"));
        let mut sink = RecordingSink::new();
        let viewport = ui.viewport();
        ui.tick(FrameInput::new(viewport, Instant::now()), &mut sink).unwrap();

        assert_eq!(sink.texts(), vec![("hi", Point::ZERO)]);
        assert_eq!(ui.root().map(|root| root.size()), Some(Size { width: 64.0, height: 32.0 }));
        assert_eq!(ui.root().map(Node::kind), Some("text"));
    }

    #[test]
    fn test_resize_published_once() {
        let mut ui = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        ui.bus().subscribe(WINDOW_RESIZE_EVENT, move |event| {
            if let Event::WindowResize(resize) = event {
                log.borrow_mut().push(*resize);
            }
        });

        let bigger = Size { width: 1024.0, height: 768.0 };
        ui.layout(bigger).unwrap();
        ui.layout(bigger).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].old_size, Size { width: 800.0, height: 600.0 });
        assert_eq!(seen[0].new_size, bigger);
        assert_eq!(ui.viewport(), bigger);
    }

    #[test]
    fn test_empty_key_action_not_published() {
        let mut ui = setup();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        ui.bus().subscribe(KEY_ACTION_EVENT, move |_| *counter.borrow_mut() += 1);

        let now = Instant::now();
        let viewport = ui.viewport();
        let mut sink = RecordingSink::new();
        ui.tick(FrameInput::new(viewport, now).with_key_action(KeyAction::new(now)), &mut sink)
            .unwrap();
        assert_eq!(*count.borrow(), 0);

        let typed = KeyAction::new(now).with_chars("a");
        ui.tick(FrameInput::new(viewport, now).with_key_action(typed), &mut sink).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_missing_font_fails_layout() {
        let mut ui = Ui::new(FontRegistry::new(), Size { width: 100.0, height: 100.0 });
        ui.mount(text("x"));
        let err = ui.layout(Size { width: 100.0, height: 100.0 }).unwrap_err();
        assert_eq!(err, crate::error::Error::MissingFont("mono".into()));
        assert!(ui.unmount().is_some());
        assert!(ui.root().is_none());
    }
}
