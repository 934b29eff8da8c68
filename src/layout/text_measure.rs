//! Text Measurement - Greedy wrapping against a pixel width budget.
//!
//! Text is scanned left to right, one code point at a time, accumulating the
//! advance of each glyph. When the next glyph would push the line past the
//! budget, the line is broken at the most recent whitespace seen on it, or
//! right before the overflowing glyph when there is none.
//!
//! A glyph that is wider than the whole budget on its own cannot be placed
//! by either rule. That is reported as [`WrapError::UnbreakableToken`]
//! unless the caller opts into [`UnbreakablePolicy::ForceBreak`], in which
//! case the break is still reported through [`WrapResult::forced_breaks`].
//!
//! # Example
//!
//! ```ignore
//! use ember_ui::font::MonospaceFont;
//! use ember_ui::layout::{wrap_text, WrapOptions};
//!
//! let font = MonospaceFont::new(32.0);
//! let chars: Vec<char> = "Hello world".chars().collect();
//! let wrapped = wrap_text(&chars, &font, 160.0, &WrapOptions::default())?;
//! assert_eq!(wrapped.lines, vec!["Hello", "world"]);
//! ```

use taffy::Size;

use crate::error::WrapError;
use crate::font::FontMetrics;

// =============================================================================
// OPTIONS
// =============================================================================

/// What to do with a glyph wider than the whole width budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnbreakablePolicy {
    /// Return `WrapError::UnbreakableToken`.
    #[default]
    Fail,
    /// Put the glyph on a line of its own and record its index.
    ForceBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WrapOptions {
    /// Gap added between consecutive lines.
    pub line_spacing: f32,
    pub unbreakable: UnbreakablePolicy,
}

// =============================================================================
// RESULT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrapResult {
    /// Lines with leading and trailing whitespace trimmed.
    pub lines: Vec<String>,
    /// Widest trimmed line by total line height.
    pub size: Size<f32>,
    /// Indices of glyphs that were split off on their own line.
    pub forced_breaks: Vec<usize>,
}

impl WrapResult {
    /// Lines joined back together with `'\n'`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Accumulates finished lines and the bounding size.
struct LineSink<'a> {
    text: &'a [char],
    metrics: &'a dyn FontMetrics,
    lines: Vec<String>,
    max_width: f32,
}

impl<'a> LineSink<'a> {
    fn new(text: &'a [char], metrics: &'a dyn FontMetrics) -> Self {
        Self {
            text,
            metrics,
            lines: Vec::new(),
            max_width: 0.0,
        }
    }

    /// Trim `text[start..end]` and emit it as a line.
    fn push(&mut self, start: usize, end: usize) {
        let text = self.text;
        let slice = trim_whitespace(&text[start..end]);
        let width: f32 = slice.iter().map(|&c| self.metrics.advance(c)).sum();
        self.max_width = self.max_width.max(width);
        self.lines.push(slice.iter().collect());
    }

    fn finish(self, line_spacing: f32, forced_breaks: Vec<usize>) -> WrapResult {
        let size = Size {
            width: self.max_width,
            height: block_height(self.lines.len(), self.metrics.line_height(), line_spacing),
        };
        WrapResult {
            lines: self.lines,
            size,
            forced_breaks,
        }
    }
}

// =============================================================================
// WRAPPING
// =============================================================================

/// Wrap text to fit within `max_width`.
///
/// # Arguments
///
/// * `text` - Code points to wrap
/// * `metrics` - Font used to measure each glyph
/// * `max_width` - Width budget for every line
/// * `options` - Line spacing and the unbreakable-glyph policy
///
/// # Returns
///
/// The wrapped lines and their bounding size. Empty text yields no lines
/// and a zero size.
pub fn wrap_text(
    text: &[char],
    metrics: &dyn FontMetrics,
    max_width: f32,
    options: &WrapOptions,
) -> Result<WrapResult, WrapError> {
    let mut sink = LineSink::new(text, metrics);
    let mut forced_breaks = Vec::new();

    let mut line_start = 0;
    let mut line_width = 0.0f32;
    // Index just after the last whitespace on the current line.
    let mut rewind_point: Option<usize> = None;
    let mut after_newline = false;

    let mut i = 0;
    while i < text.len() {
        let c = text[i];

        if c == '\n' {
            sink.push(line_start, i);
            i += 1;
            line_start = i;
            line_width = 0.0;
            rewind_point = None;
            after_newline = true;
            continue;
        }
        after_newline = false;

        let advance = metrics.advance(c);
        if line_width + advance > max_width {
            let break_at = if i == line_start {
                match options.unbreakable {
                    UnbreakablePolicy::Fail => {
                        return Err(WrapError::UnbreakableToken {
                            index: i,
                            codepoint: c,
                            advance,
                            max_width,
                        });
                    }
                    UnbreakablePolicy::ForceBreak => {
                        tracing::trace!(index = i, advance, max_width, "forced break");
                        forced_breaks.push(i);
                        i + 1
                    }
                }
            } else {
                match rewind_point {
                    Some(point) if point > line_start => point,
                    _ => i,
                }
            };

            sink.push(line_start, break_at);
            i = skip_break_whitespace(text, break_at);
            line_start = i;
            line_width = 0.0;
            rewind_point = None;
            continue;
        }

        line_width += advance;
        if c.is_whitespace() {
            rewind_point = Some(i + 1);
        }
        i += 1;
    }

    if line_start < text.len() || after_newline {
        sink.push(line_start, text.len());
    }

    Ok(sink.finish(options.line_spacing, forced_breaks))
}

/// Measure text without wrapping. Only `'\n'` starts a new line.
pub fn measure_lines(text: &str, metrics: &dyn FontMetrics, line_spacing: f32) -> WrapResult {
    if text.is_empty() {
        return WrapResult::default();
    }

    let mut width = 0.0f32;
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            width = width.max(line.chars().map(|c| metrics.advance(c)).sum());
            line.to_string()
        })
        .collect();

    WrapResult {
        size: Size {
            width,
            height: block_height(lines.len(), metrics.line_height(), line_spacing),
        },
        lines,
        forced_breaks: Vec::new(),
    }
}

/// Height of `count` lines with `spacing` between each pair.
pub fn block_height(count: usize, line_height: f32, spacing: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * line_height + (count - 1) as f32 * spacing
}

/// Skip the blanks a wrap break lands on, plus one newline right after them.
fn skip_break_whitespace(text: &[char], mut i: usize) -> usize {
    while i < text.len() && text[i] != '\n' && text[i].is_whitespace() {
        i += 1;
    }
    if i < text.len() && text[i] == '\n' {
        i += 1;
    }
    i
}

fn trim_whitespace(mut slice: &[char]) -> &[char] {
    while let [first, rest @ ..] = slice {
        if !first.is_whitespace() {
            break;
        }
        slice = rest;
    }
    while let [rest @ .., last] = slice {
        if !last.is_whitespace() {
            break;
        }
        slice = rest;
    }
    slice
}
