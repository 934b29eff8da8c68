//! Font Metrics - Glyph advances and line heights for layout and editing.
//!
//! Layout, wrapping and the input editor never rasterize anything. They only
//! need a linear advance model: how wide each code point is and how tall a
//! line is. Fonts are looked up by name in a [`FontRegistry`] owned by the
//! tree root, so nodes hold a name rather than a handle.
//!
//! # Example
//!
//! ```ignore
//! use ember_ui::font::{FontRegistry, MonospaceFont};
//!
//! let mut fonts = FontRegistry::new();
//! fonts.register("mono", MonospaceFont::new(32.0));
//!
//! let font = fonts.get("mono")?;
//! assert_eq!(font.glyph_advance('W'), 32.0);
//! ```

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

use crate::error::{Error, Result};

// =============================================================================
// FONT METRICS
// =============================================================================

/// Metrics for one font at one size and spacing.
///
/// Must be deterministic: the same code point always yields the same advance
/// within a measurement pass.
pub trait FontMetrics {
    /// Horizontal advance of one code point.
    fn glyph_advance(&self, codepoint: char) -> f32;

    /// Height of one line of text.
    fn line_height(&self) -> f32;

    /// Size the font was loaded at.
    fn nominal_size(&self) -> f32;

    /// Extra horizontal spacing between glyphs.
    fn letter_spacing(&self) -> f32 {
        0.0
    }

    /// Advance used by layout and editing: glyph advance plus letter spacing.
    fn advance(&self, codepoint: char) -> f32 {
        self.glyph_advance(codepoint) + self.letter_spacing()
    }
}

// =============================================================================
// BUILT-IN FONTS
// =============================================================================

/// Every glyph is a square of `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFont {
    size: f32,
    spacing: f32,
}

impl MonospaceFont {
    pub fn new(size: f32) -> Self {
        Self { size, spacing: 0.0 }
    }

    pub fn with_spacing(size: f32, spacing: f32) -> Self {
        Self { size, spacing }
    }
}

impl FontMetrics for MonospaceFont {
    fn glyph_advance(&self, _codepoint: char) -> f32 {
        self.size
    }

    fn line_height(&self) -> f32 {
        self.size
    }

    fn nominal_size(&self) -> f32 {
        self.size
    }

    fn letter_spacing(&self) -> f32 {
        self.spacing
    }
}

/// Terminal cells as a font: advances are display widths in cells.
///
/// ASCII takes one cell, CJK and most emoji take two, control and
/// zero-width characters take none. Lines are one cell tall.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TerminalCellFont;

impl FontMetrics for TerminalCellFont {
    fn glyph_advance(&self, codepoint: char) -> f32 {
        codepoint.width().unwrap_or(0) as f32
    }

    fn line_height(&self) -> f32 {
        1.0
    }

    fn nominal_size(&self) -> f32 {
        1.0
    }
}

/// Width of a string in cells.
pub fn string_width(s: &str) -> u16 {
    s.chars()
        .map(|c| c.width().unwrap_or(0) as u16)
        .fold(0u16, u16::saturating_add)
}

// =============================================================================
// FONT REGISTRY
// =============================================================================

/// Fonts by name. Owned by the tree root and lent to every pass.
#[derive(Default)]
pub struct FontRegistry {
    fonts: HashMap<String, Box<dyn FontMetrics>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font, replacing any font previously stored under `name`.
    pub fn register(&mut self, name: impl Into<String>, font: impl FontMetrics + 'static) {
        let name = name.into();
        tracing::debug!(font = %name, "registered font");
        self.fonts.insert(name, Box::new(font));
    }

    /// Look up a font.
    ///
    /// # Returns
    ///
    /// `Error::MissingFont` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&dyn FontMetrics> {
        self.fonts
            .get(name)
            .map(|font| font.as_ref())
            .ok_or_else(|| Error::MissingFont(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
