//! Input Primitive - Single-line text input driven by the event bus.
//!
//! The input subscribes to key actions when it is built and unsubscribes
//! when dropped. Edits happen inside the bus callback, before the frame's
//! measurement pass, so layout always sees the updated buffer.
//!
//! Bus callbacks cannot return errors. A failed edit (unregistered font) is
//! logged, kept, and returned by the input's next `measure`.
//!
//! # Example
//!
//! ```ignore
//! let input = TextInput::new(ui.bus(), ui.fonts(), InputProps {
//!     font: "mono".into(),
//!     max_width: 40.0,
//!     ..Default::default()
//! })?;
//! let value = input.value(); // Signal<String>
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use spark_signals::Signal;
use taffy::{Point, Size};

use crate::error::{ConfigError, Error, Result};
use crate::font::FontRegistry;
use crate::renderer::DrawSink;
use crate::state::editor::InputEditor;
use crate::state::event_bus::{Event, EventBus, SubscriptionId, KEY_ACTION_EVENT};
use crate::types::{PositionState, Rgba};

use super::component::Component;
use super::types::InputProps;

pub struct TextInput {
    editor: Rc<RefCell<InputEditor>>,
    pending_error: Rc<RefCell<Option<Error>>>,
    bus: EventBus,
    subscription: SubscriptionId,
    max_width: f32,
    background: Rgba,
    text_color: Rgba,
    state: PositionState,
    size: Size<f32>,
}

impl TextInput {
    /// Build an input and subscribe it to `bus`.
    ///
    /// # Arguments
    ///
    /// * `bus` - Bus key actions are published on
    /// * `fonts` - Registry used when typed characters are measured
    /// * `props` - Font, width, colors and editor timing
    pub fn new(bus: &EventBus, fonts: Rc<FontRegistry>, props: InputProps) -> Result<Self> {
        if props.max_width < 0.0 {
            return Err(ConfigError::NegativeMaxWidth(props.max_width).into());
        }

        let mut editor = InputEditor::new(props.font, props.editor, Instant::now());
        if !props.initial_value.is_empty() {
            editor.set_text(&props.initial_value, &fonts)?;
        }
        let editor = Rc::new(RefCell::new(editor));
        let pending_error = Rc::new(RefCell::new(None));

        let subscription = {
            let editor = Rc::clone(&editor);
            let pending_error = Rc::clone(&pending_error);
            bus.subscribe(KEY_ACTION_EVENT, move |event| {
                let Event::KeyAction(action) = event else {
                    return;
                };
                if let Err(err) = editor.borrow_mut().handle_key_action(action, &fonts) {
                    tracing::warn!(%err, "text input edit failed");
                    *pending_error.borrow_mut() = Some(err);
                }
            })
        };

        Ok(Self {
            editor,
            pending_error,
            bus: bus.clone(),
            subscription,
            max_width: props.max_width,
            background: props.background,
            text_color: props.text_color,
            state: PositionState::default(),
            size: Size::ZERO,
        })
    }

    pub fn text(&self) -> String {
        self.editor.borrow().text()
    }

    /// Signal mirroring the input's text.
    pub fn value(&self) -> Signal<String> {
        self.editor.borrow().value()
    }

    /// Shared handle to the editor state.
    pub fn editor(&self) -> Rc<RefCell<InputEditor>> {
        Rc::clone(&self.editor)
    }
}

impl Drop for TextInput {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}

impl Component for TextInput {
    fn measure(&mut self, fonts: &FontRegistry, max_viewport: Size<f32>) -> Result<Size<f32>> {
        if let Some(err) = self.pending_error.borrow_mut().take() {
            return Err(err);
        }

        let editor = self.editor.borrow();
        let font = fonts.get(editor.font())?;

        self.size = Size {
            width: max_viewport.width.min(self.max_width),
            height: font.line_height(),
        };
        Ok(self.size)
    }

    fn render(&mut self, fonts: &FontRegistry, sink: &mut dyn DrawSink, now: Instant) -> Result<()> {
        let mut editor = self.editor.borrow_mut();
        let font = fonts.get(editor.font())?;
        editor.tick_blink(now);

        let origin = self.state.absolute();
        sink.fill_rect(origin, self.size, self.background);
        sink.draw_text(&editor.text(), origin, font, self.text_color);

        let cursor = editor.cursor();
        if cursor.blink_visible {
            let caret = Point {
                x: origin.x + cursor.x_offset,
                y: origin.y,
            };
            let caret_size = Size {
                width: editor.config().caret_width,
                height: font.line_height(),
            };
            sink.fill_rect(caret, caret_size, self.text_color);
        }
        Ok(())
    }

    fn set_position(&mut self, position: Point<f32>) {
        self.state.position = position;
    }

    fn set_position_offset(&mut self, offset: Point<f32>) {
        self.state.offset = offset;
    }

    fn position(&self) -> Point<f32> {
        self.state.absolute()
    }

    fn size(&self) -> Size<f32> {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::MonospaceFont;
    use crate::renderer::{DrawCommand, RecordingSink};
    use crate::state::keyboard::{Key, KeyAction};
    use std::time::Duration;

    fn setup() -> (EventBus, Rc<FontRegistry>) {
        let mut fonts = FontRegistry::new();
        fonts.register("mono", MonospaceFont::new(32.0));
        (EventBus::new(), Rc::new(fonts))
    }

    fn props() -> InputProps {
        InputProps {
            font: "mono".into(),
            max_width: 300.0,
            ..Default::default()
        }
    }

    fn typed(s: &str) -> Event {
        Event::KeyAction(KeyAction::new(Instant::now()).with_chars(s))
    }

    #[test]
    fn test_typing_through_bus() {
        let (bus, fonts) = setup();
        let input = TextInput::new(&bus, fonts, props()).unwrap();

        bus.publish(KEY_ACTION_EVENT, &typed("hi"));
        assert_eq!(input.text(), "hi");
        assert_eq!(input.value().get(), "hi");
    }

    #[test]
    fn test_measure_clamps_to_viewport() {
        let (bus, fonts) = setup();
        let mut input = TextInput::new(&bus, fonts.clone(), props()).unwrap();

        let wide = input.measure(&fonts, Size { width: 800.0, height: 600.0 }).unwrap();
        assert_eq!(wide, Size { width: 300.0, height: 32.0 });
        let narrow = input.measure(&fonts, Size { width: 120.0, height: 600.0 }).unwrap();
        assert_eq!(narrow, Size { width: 120.0, height: 32.0 });
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (bus, fonts) = setup();
        let input = TextInput::new(&bus, fonts, props()).unwrap();
        assert_eq!(bus.subscriber_count(KEY_ACTION_EVENT), 1);
        drop(input);
        assert_eq!(bus.subscriber_count(KEY_ACTION_EVENT), 0);
    }

    #[test]
    fn test_initial_value_and_negative_width() {
        let (bus, fonts) = setup();
        let input = TextInput::new(
            &bus,
            fonts.clone(),
            InputProps {
                initial_value: "abc".into(),
                ..props()
            },
        )
        .unwrap();
        assert_eq!(input.editor().borrow().cursor().rune_index, 3);

        let err = TextInput::new(
            &bus,
            fonts,
            InputProps {
                max_width: -1.0,
                ..props()
            },
        )
        .err();
        assert_eq!(err, Some(Error::Config(ConfigError::NegativeMaxWidth(-1.0))));
    }

    #[test]
    fn test_missing_font_error_surfaces_on_measure() {
        let bus = EventBus::new();
        let empty = Rc::new(FontRegistry::new());
        let mut input = TextInput::new(&bus, empty.clone(), props()).unwrap();

        bus.publish(KEY_ACTION_EVENT, &typed("x"));
        assert_eq!(input.text(), "");
        let err = input.measure(&empty, Size { width: 10.0, height: 10.0 }).unwrap_err();
        assert_eq!(err, Error::MissingFont("mono".into()));
    }

    #[test]
    fn test_render_caret_follows_blink() {
        let (bus, fonts) = setup();
        let mut input = TextInput::new(&bus, fonts.clone(), props()).unwrap();
        let t0 = Instant::now();
        let action = KeyAction::new(t0).with_pressed(Key::Char('a')).with_chars("a");
        bus.publish(KEY_ACTION_EVENT, &Event::KeyAction(action));

        input.measure(&fonts, Size { width: 800.0, height: 600.0 }).unwrap();
        input.set_position_offset(Point { x: 10.0, y: 20.0 });

        let mut sink = RecordingSink::new();
        input.render(&fonts, &mut sink, t0).unwrap();
        assert_eq!(sink.commands.len(), 3);
        assert_eq!(
            sink.commands[2],
            DrawCommand::Rect {
                origin: Point { x: 42.0, y: 20.0 },
                size: Size { width: 2.0, height: 32.0 },
                color: Rgba::WHITE,
            }
        );

        sink.clear();
        input.render(&fonts, &mut sink, t0 + Duration::from_millis(600)).unwrap();
        assert_eq!(sink.commands.len(), 2);
    }
}
