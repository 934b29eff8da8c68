//! Error types.
//!
//! Configuration problems are caught when a node is built. Missing fonts and
//! unbreakable tokens depend on runtime data, so they come back out of
//! measure, render and edit calls as values the host can recover from.
//! Terminal I/O failures only come from the run loop.

use thiserror::Error;

/// Invalid value supplied while building a node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown direction value {0}")]
    UnknownDirection(u8),
    #[error("unknown direction {0:?}")]
    UnknownDirectionName(String),
    #[error("unknown alignment value {0}")]
    UnknownAlignment(u8),
    #[error("unknown alignment {0:?}")]
    UnknownAlignmentName(String),
    #[error("roundness must be non-negative, got {0}")]
    NegativeRoundness(f32),
    #[error("max width must be non-negative, got {0}")]
    NegativeMaxWidth(f32),
}

/// Wrapping could not fit the text into the width budget.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WrapError {
    #[error(
        "glyph {codepoint:?} at index {index} is {advance} wide, exceeding max width {max_width}"
    )]
    UnbreakableToken {
        index: usize,
        codepoint: char,
        advance: f32,
        max_width: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("font {0:?} is not registered")]
    MissingFont(String),
    #[error(transparent)]
    Wrap(#[from] WrapError),
    /// Terminal I/O failed. Kept as text so errors stay comparable.
    #[error("terminal i/o: {0}")]
    Terminal(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Terminal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
