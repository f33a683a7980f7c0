//! Slither Link deductions.
//!
//! Most rules look at a single cell and its immediate surroundings; they implement [`CellRule`] and are driven over the
//! board by a [`CellRuleRunner`]. The topological rules consult the tracks of drawn lines instead.

use strum::VariantArray;

pub use avoid_loop::AvoidLoopRule;
pub use basic::{BasicNumberRule, DotRule};
pub use corner::{IncomingCornerRule, NumberCornerRule};
pub use segment_parity::SegmentParityRule;
pub use three_pair::ThreePairRule;

use crate::board::Board;
use crate::cell::CellKind;
use crate::engine::Rule;
use crate::error::Deduction;
use crate::location::{Location, Offset};
use crate::shape::Direction;

mod avoid_loop;
mod basic;
mod corner;
mod segment_parity;
mod three_pair;

/// A deduction anchored at one cell of a fixed [`CellKind`].
pub trait CellRule {
    /// The kind of cell the rule is anchored at.
    const KIND: CellKind;
    /// Skip cells in the sentinel ring.
    const SKIP_OUTSIDE: bool;
    /// Only visit cells near a line that changed since the last snapshot.
    const SKIP_UNMODIFIED: bool;
    /// Short human readable name, used in diagnostics.
    const NAME: &'static str;

    /// Deduce around the cell at the physical `location`, reporting whether anything changed.
    fn apply(&self, board: &mut Board, location: Location) -> Deduction;
}

/// Drives a [`CellRule`] over every matching cell of a board, as one whole-board [`Rule`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CellRuleRunner<R>(pub R);

impl<R: CellRule> CellRuleRunner<R> {
    /// Physical `x` and `y` ranges visited, each stepping by two.
    fn ranges(board: &Board) -> ((usize, usize), (usize, usize)) {
        let (mut x_max, mut y_max) = board.physical_dims();
        let (mut x_min, mut y_min) = R::KIND.origin();
        if R::SKIP_OUTSIDE {
            // only axes starting on the sentinel ring need trimming
            if x_min == 0 {
                x_min += 2;
                x_max -= 1;
            }
            if y_min == 0 {
                y_min += 2;
                y_max -= 1;
            }
        }
        ((x_min, x_max), (y_min, y_max))
    }
}

impl<R: CellRule> Rule<Board> for CellRuleRunner<R> {
    fn apply(&self, board: &mut Board) -> Deduction {
        let ((x_min, x_max), (y_min, y_max)) = Self::ranges(board);

        let mut changed = false;
        for y in (y_min..y_max).step_by(2) {
            if R::SKIP_UNMODIFIED && !board.is_row_dirty(y) {
                continue;
            }
            for x in (x_min..x_max).step_by(2) {
                let location = Location(x, y);
                if R::SKIP_UNMODIFIED && !board.is_dirty(location) {
                    continue;
                }
                changed |= self.0.apply(board, location)?;
            }
        }

        Ok(changed)
    }

    fn name(&self) -> &'static str {
        R::NAME
    }
}

/// Run `process` once per direction, clockwise from north, and report whether any run changed the board.
///
/// Every direction runs even after one reported a change.
pub(crate) fn each_direction(mut process: impl FnMut(Offset) -> Deduction) -> Deduction {
    Direction::VARIANTS.iter().try_fold(false, |changed, direction| Ok(process(direction.offset())? | changed))
}
