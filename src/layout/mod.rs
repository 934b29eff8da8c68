//! Layout Module - Measurement and placement.
//!
//! Two engines feed the measurement pass:
//!
//! - [`flex`] sizes children against a shrinking budget along the main axis
//!   and places them by alignment on both axes.
//! - Text measurement wraps code points greedily, rewinding to the last
//!   whitespace before an overflow.
//!
//! # Example
//!
//! ```ignore
//! use ember_ui::layout::{wrap_text, WrapOptions};
//!
//! let chars: Vec<char> = "Hello world".chars().collect();
//! let result = wrap_text(&chars, font, 160.0, &WrapOptions::default())?;
//! assert_eq!(result.lines, vec!["Hello", "world"]);
//! ```

pub mod flex;
mod text_measure;

pub use flex::{
    from_axes, layout_children, measure_children, place_cross_axis, place_main_axis, to_axes,
    AxisPlacement, FlexLayout,
};
pub use text_measure::*;
