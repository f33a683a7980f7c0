//! Grid coordinates and displacements.

use std::num::NonZero;
use std::ops::{Add, Mul, Neg, Sub};

use ndarray::Ix;

type Coord = usize;
/// A board dimension; boards are never zero-sized.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a grid. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Manhattan distance between two locations.
    pub fn distance_to(&self, other: Location) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

/// A signed displacement `(dx, dy)` between two [`Location`]s, with `y` growing downwards.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Offset(pub isize, pub isize);

impl Offset {
    /// Rotate a quarter turn counterclockwise on screen.
    pub const fn lrot(self) -> Self {
        Self(self.1, -self.0)
    }

    /// Rotate a quarter turn clockwise on screen.
    pub const fn rrot(self) -> Self {
        Self(-self.1, self.0)
    }

    pub(crate) const fn x_only(self) -> Self {
        Self(self.0, 0)
    }

    pub(crate) const fn y_only(self) -> Self {
        Self(0, self.1)
    }

    /// The displacement from `from` to `to`.
    pub fn between(from: Location, to: Location) -> Self {
        Self(to.0 as isize - from.0 as isize, to.1 as isize - from.1 as isize)
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0, -self.1)
    }
}

impl Mul<isize> for Offset {
    type Output = Self;

    fn mul(self, rhs: isize) -> Self {
        Self(self.0 * rhs, self.1 * rhs)
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Add<Offset> for Location {
    type Output = Self;

    fn add(self, rhs: Offset) -> Self {
        self.offset_by((rhs.0, rhs.1))
    }
}

impl Sub<Offset> for Location {
    type Output = Self;

    fn sub(self, rhs: Offset) -> Self {
        self + -rhs
    }
}
