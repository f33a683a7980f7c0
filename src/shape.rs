//! Directions on the square grid.

use strum::VariantArray;

use crate::location::{Location, Offset};

/// The four orthogonal steps on a square grid, listed clockwise starting from north.
///
/// Several rules walk around a cell in this order and rely on it, e.g. pairing direction `i` with direction `i - 1`.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Up, towards smaller `y`.
    North,
    /// Right, towards larger `x`.
    East,
    /// Down, towards larger `y`.
    South,
    /// Left, towards smaller `x`.
    West,
}

impl Direction {
    /// The "backward" directions: stepping along them from one location reaches a location indexed lower in row-major order.
    ///
    /// A single row-major pass only ever needs to look backwards.
    pub const BACKWARD_VARIANTS: [Self; 2] = [Self::North, Self::West];

    /// The unit displacement of one step in this direction.
    pub const fn offset(&self) -> Offset {
        match self {
            Self::North => Offset(0, -1),
            Self::East => Offset(1, 0),
            Self::South => Offset(0, 1),
            Self::West => Offset(-1, 0),
        }
    }

    /// Attempt the step from `location` in the direction specified by `self`.
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, which any bounds check rejects.
    pub fn attempt_from(&self, location: Location) -> Location {
        location + self.offset()
    }

    /// Index of this direction in [`Self::VARIANTS`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// Diagonal step towards the top right.
pub(crate) const NORTH_EAST: Offset = Offset(1, -1);
/// Diagonal step towards the bottom right.
pub(crate) const SOUTH_EAST: Offset = Offset(1, 1);

/// All four neighbors of `location`, in [`Direction`] order.
pub(crate) fn adjacent4(location: Location) -> [Location; 4] {
    [Direction::North, Direction::East, Direction::South, Direction::West].map(|direction| direction.attempt_from(location))
}
