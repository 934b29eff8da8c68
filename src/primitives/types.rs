//! Primitive types - Props for every node kind.
//!
//! Props are plain structs with sensible defaults, so call sites only name
//! what they change:
//!
//! ```ignore
//! let props = TextProps {
//!     content: "Hello".into(),
//!     font: "mono".into(),
//!     ..Default::default()
//! };
//! ```

use std::rc::Rc;
use std::time::Duration;

use spark_signals::Signal;

use crate::layout::WrapOptions;
use crate::types::{Alignment, ClockValues, Direction, Rgba};

use super::Node;

// =============================================================================
// Prop Value
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Read once per pass with [`PropValue::get`], so a signal bound here is
/// picked up on the next measurement without rebuilding the node.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal, read on every pass.
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// Container Props
// =============================================================================

#[derive(Default)]
pub struct ContainerProps {
    /// Main axis direction (default: column).
    pub direction: Direction,
    /// Alignment along the main axis (default: start).
    pub main_axis: Alignment,
    /// Alignment along the cross axis (default: start).
    pub cross_axis: Alignment,
    pub children: Vec<Node>,
}

// =============================================================================
// Box Props
// =============================================================================

/// Properties for a filled rectangle around one optional child.
pub struct BoxProps {
    pub child: Option<Node>,
    pub padding: ClockValues,
    pub background: Rgba,
    /// Corner roundness, 0 for square corners. Must not be negative.
    pub roundness: f32,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            child: None,
            padding: ClockValues::ZERO,
            background: Rgba::TRANSPARENT,
            roundness: 0.0,
        }
    }
}

// =============================================================================
// Text Props
// =============================================================================

pub struct TextProps {
    pub content: PropValue<String>,
    /// Name of a font in the registry.
    pub font: String,
    pub color: Rgba,
    /// Wrap against the viewport width. Off means only `'\n'` breaks lines.
    pub wrap: bool,
    pub wrap_options: WrapOptions,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: PropValue::default(),
            font: String::new(),
            color: Rgba::WHITE,
            wrap: true,
            wrap_options: WrapOptions::default(),
        }
    }
}

// =============================================================================
// Input Props
// =============================================================================

/// Timing and caret settings for the input editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Delay before a held key first repeats.
    pub long_repeat_delay: Duration,
    /// Delay between repeats once repeating.
    pub short_repeat_delay: Duration,
    /// Caret visibility flips after this much time without input.
    pub blink_interval: Duration,
    pub caret_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            long_repeat_delay: Duration::from_millis(300),
            short_repeat_delay: Duration::from_millis(30),
            blink_interval: Duration::from_millis(500),
            caret_width: 2.0,
        }
    }
}

pub struct InputProps {
    pub font: String,
    /// Widest the input gets; narrower viewports shrink it.
    pub max_width: f32,
    pub background: Rgba,
    pub text_color: Rgba,
    pub initial_value: String,
    pub editor: EditorConfig,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            font: String::new(),
            max_width: f32::INFINITY,
            background: Rgba::DARK_GRAY,
            text_color: Rgba::WHITE,
            initial_value: String::new(),
            editor: EditorConfig::default(),
        }
    }
}
