//! Core types for ember-ui.
//!
//! Value types shared by layout, wrapping, editing and rendering. Geometry is
//! expressed with taffy's `Point`, `Size` and `Rect` so every pass speaks the
//! same units (f32 pixels, or cells for terminal fonts).

use std::str::FromStr;

use taffy::{Point, Rect, Size};

use crate::error::ConfigError;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const DARK_GRAY: Self = Self::rgb(48, 48, 48);

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

// =============================================================================
// Layout Enums
// =============================================================================

/// Direction children are laid out in. The main axis follows this direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Direction {
    #[default]
    Column = 0,
    Row = 1,
}

impl Direction {
    /// Check if this is the horizontal direction.
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }
}

impl TryFrom<u8> for Direction {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Column),
            1 => Ok(Self::Row),
            other => Err(ConfigError::UnknownDirection(other)),
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column" => Ok(Self::Column),
            "row" => Ok(Self::Row),
            other => Err(ConfigError::UnknownDirectionName(other.to_string())),
        }
    }
}

/// Alignment along one axis. Applied independently to main and cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Alignment {
    #[default]
    Start = 0,
    Center = 1,
    End = 2,
}

impl TryFrom<u8> for Alignment {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Start),
            1 => Ok(Self::Center),
            2 => Ok(Self::End),
            other => Err(ConfigError::UnknownAlignment(other)),
        }
    }
}

impl FromStr for Alignment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => Err(ConfigError::UnknownAlignmentName(other.to_string())),
        }
    }
}

// =============================================================================
// Clock Values
// =============================================================================

/// Four-sided padding box, named for its top/right/bottom/left ordering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockValues(pub Rect<f32>);

impl ClockValues {
    pub const ZERO: Self = Self(Rect {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    });

    /// Clock order: top, right, bottom, left.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self(Rect { left, right, top, bottom })
    }

    /// Same value on every side.
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `vertical` applies to top and bottom, `horizontal` to left and right.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn top(&self) -> f32 {
        self.0.top
    }

    pub fn right(&self) -> f32 {
        self.0.right
    }

    pub fn bottom(&self) -> f32 {
        self.0.bottom
    }

    pub fn left(&self) -> f32 {
        self.0.left
    }

    /// left + right
    pub fn horizontal_sum(&self) -> f32 {
        self.0.left + self.0.right
    }

    /// top + bottom
    pub fn vertical_sum(&self) -> f32 {
        self.0.top + self.0.bottom
    }

    /// Both sums as a size.
    pub fn sum(&self) -> Size<f32> {
        Size {
            width: self.horizontal_sum(),
            height: self.vertical_sum(),
        }
    }
}

// =============================================================================
// Position State
// =============================================================================

/// Local position plus the offset pushed down by the parent.
///
/// The absolute position is `offset + position`. Parents never get pulled
/// from; placement writes offsets top-down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionState {
    pub offset: Point<f32>,
    pub position: Point<f32>,
}

impl PositionState {
    /// Absolute position on screen.
    pub fn absolute(&self) -> Point<f32> {
        Point {
            x: self.offset.x + self.position.x,
            y: self.offset.y + self.position.y,
        }
    }
}

// =============================================================================
// Glyph Hitbox
// =============================================================================

/// Cached metrics for one inserted code point.
///
/// Lets the editor move the cursor back and delete without asking the font
/// again. `bounds` is origin-zeroed: `(advance, line_height)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphHitbox {
    pub advance: f32,
    pub bounds: Size<f32>,
}
