//! The cells of the physical grid: squares, dots and the lines between them.

use strum::Display;

use crate::location::Location;

/// What sits at a physical grid position, decided purely by coordinate parity.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum CellKind {
    /// Even `x`, even `y`: a square that may carry a clue.
    Number,
    /// Odd `x`, even `y`.
    VLine,
    /// Even `x`, odd `y`.
    HLine,
    /// Odd `x`, odd `y`: a lattice point where lines meet.
    Dot,
}

impl CellKind {
    /// The kind of cell at the physical `location`.
    pub fn at(location: Location) -> Self {
        match (location.0 & 1, location.1 & 1) {
            (0, 0) => Self::Number,
            (1, 0) => Self::VLine,
            (0, 1) => Self::HLine,
            _ => Self::Dot,
        }
    }

    pub(crate) fn is_line(&self) -> bool {
        matches!(self, Self::VLine | Self::HLine)
    }

    /// Smallest physical `(x, y)` holding a cell of this kind.
    pub(crate) fn origin(&self) -> (usize, usize) {
        match self {
            Self::Number => (0, 0),
            Self::VLine => (1, 0),
            Self::HLine => (0, 1),
            Self::Dot => (1, 1),
        }
    }
}

/// What is known about a line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LineState {
    /// Not decided yet.
    #[default]
    Unknown,
    /// Part of the loop.
    Exists,
    /// Ruled out.
    Forbidden,
}

/// A segment between two adjacent dots.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Line {
    pub(crate) state: LineState,
    /// Drawn as a search hypothesis rather than deduced; only affects rendering.
    pub(crate) assumed: bool,
}

impl Line {
    /// The current [`LineState`].
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Whether the line is drawn.
    pub fn exists(&self) -> bool {
        self.state == LineState::Exists
    }

    /// Whether the line is ruled out.
    pub fn forbidden(&self) -> bool {
        self.state == LineState::Forbidden
    }

    /// Whether the line is decided either way.
    pub fn fixed(&self) -> bool {
        self.state != LineState::Unknown
    }

    /// Whether the line was drawn by a search hypothesis.
    pub fn assumed(&self) -> bool {
        self.assumed
    }
}

/// Line counts around a number or dot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Surrounding {
    /// Drawn lines.
    pub exists: u8,
    /// Forbidden lines.
    pub forbidden: u8,
}

impl Surrounding {
    /// Decided lines of either kind.
    pub fn fixed(&self) -> u8 {
        self.exists + self.forbidden
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cell {
    Number { clue: Option<u8>, around: Surrounding },
    Dot { around: Surrounding },
    HLine(Line),
    VLine(Line),
}

impl Cell {
    pub(crate) fn empty(kind: CellKind) -> Self {
        match kind {
            CellKind::Number => Self::Number { clue: None, around: Surrounding::default() },
            CellKind::Dot => Self::Dot { around: Surrounding::default() },
            CellKind::HLine => Self::HLine(Line::default()),
            CellKind::VLine => Self::VLine(Line::default()),
        }
    }

    pub(crate) fn line(&self) -> Option<&Line> {
        match self {
            Self::HLine(line) | Self::VLine(line) => Some(line),
            _ => None,
        }
    }

    pub(crate) fn line_mut(&mut self) -> Option<&mut Line> {
        match self {
            Self::HLine(line) | Self::VLine(line) => Some(line),
            _ => None,
        }
    }

    pub(crate) fn around_mut(&mut self) -> Option<&mut Surrounding> {
        match self {
            Self::Number { around, .. } | Self::Dot { around } => Some(around),
            _ => None,
        }
    }
}
