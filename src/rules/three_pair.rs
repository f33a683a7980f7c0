use crate::board::Board;
use crate::cell::CellKind;
use crate::error::Deduction;
use crate::location::{Location, Offset};
use crate::rules::CellRule;
use crate::shape::{Direction, NORTH_EAST, SOUTH_EAST};

/// Pairs of 3s, applied once before anything else is known.
///
/// Side by side, the outer sides of both are drawn and the line between them cannot be extended:
///
/// ```text
/// + + + +    + +x+ +
///  3 3   =>  |3 3|
/// + + + +    + +x+ +
/// ```
///
/// If the clues rule out a loop around just one or two squares, the shared side is drawn as well.
///
/// Diagonally, possibly with a run of 2s in between, the far corners of both are drawn:
///
/// ```text
/// + + +      +-+ +
///  3         |3
/// + + +  =>  + + +
///    3          3|
/// + + +      + +-+
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreePairRule;

impl CellRule for ThreePairRule {
    const KIND: CellKind = CellKind::Number;
    const SKIP_OUTSIDE: bool = true;
    const SKIP_UNMODIFIED: bool = false;
    const NAME: &'static str = "three pair";

    fn apply(&self, board: &mut Board, location: Location) -> Deduction {
        if board.clue(location) != Some(3) {
            return Ok(false);
        }

        Ok(adjacent(board, location, Direction::East.offset())?
            | adjacent(board, location, Direction::South.offset())?
            | diagonal(board, location, NORTH_EAST)?
            | diagonal(board, location, SOUTH_EAST)?)
    }
}

fn adjacent(board: &mut Board, p: Location, v: Offset) -> Deduction {
    if board.clue(p + v * 2) != Some(3) {
        return Ok(false);
    }

    let between = p + v;
    Ok(board.set_exists(p - v)?
        | board.set_exists(between + v * 2)?
        | board.set_forbidden(between + v.lrot() * 2)?
        | board.set_forbidden(between + v.rrot() * 2)?
        | (board.no_small_loops_allowed() && board.set_exists(between)?))
}

fn diagonal(board: &mut Board, p: Location, v: Offset) -> Deduction {
    let mut q = p;
    loop {
        q = q + v * 2;
        match board.clue(q) {
            Some(2) => continue,
            Some(3) => break,
            _ => return Ok(false),
        }
    }

    Ok(board.set_exists(p - v.x_only())?
        | board.set_exists(p - v.y_only())?
        | board.set_exists(q + v.x_only())?
        | board.set_exists(q + v.y_only())?)
}
