//! Errors: contradictions raised during solving and problems loading a puzzle.

use std::borrow::Cow;

use thiserror::Error;

/// The board, as deduced so far, admits no solution.
///
/// This is the only error the engine ever handles: rules and domain operations raise it and the search turns it into a
/// [`CompletionStatus::Contradiction`](crate::engine::CompletionStatus::Contradiction).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("contradiction: {reason}")]
pub struct Contradiction {
    reason: Cow<'static, str>,
}

impl Contradiction {
    /// A contradiction explained by `reason`.
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self { reason: reason.into() }
    }

    /// Why the board admits no solution.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Outcome of a deduction step: whether anything changed (or some other value), unless the board turned out contradictory.
pub type Deduction<T = bool> = Result<T, Contradiction>;

/// Reasons a textual puzzle could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No rows at all, or rows of no squares.
    #[error("the puzzle has no rows")]
    Empty,
    /// Rows of different widths.
    #[error("row {row} is {found} characters wide, expected {expected}")]
    RaggedRow {
        /// Index of the first offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A full grid whose width or height is even or below 3.
    #[error("a full grid must have odd width and height of at least 3, got {width}x{height}")]
    BadGridSize {
        /// Width in characters.
        width: usize,
        /// Height in rows.
        height: usize,
    },
    /// A character that cannot appear at its position.
    #[error("unexpected character {found:?} at row {row}, column {col}; expected {expected}")]
    UnexpectedChar {
        /// The character read.
        found: char,
        /// Row of the character.
        row: usize,
        /// Column of the character.
        col: usize,
        /// What the position admits.
        expected: &'static str,
    },
    /// The puzzle was read but the builder rejected it.
    #[error("the puzzle could not be built: {0:?}")]
    Invalid(Vec<crate::builder::BuilderInvalidReason>),
}
