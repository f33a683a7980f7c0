use strum::VariantArray;

use crate::board::Board;
use crate::cell::CellKind;
use crate::error::{Contradiction, Deduction};
use crate::location::{Location, Offset};
use crate::rules::{each_direction, CellRule};
use crate::shape::{adjacent4, Direction};

/// Deductions from the two outward lines at one corner dot of a square.
///
/// With both outward lines of the corner (direction `v0` and its left turn `v1`) forbidden:
///
/// ```text
///   x
/// x + - +        a line reaching the corner dot has to turn along the square,
///   |   |        so a 1 cannot use either side at that corner and a 3 must use both
///   + - +
/// ```
///
/// A 3 whose corner already has one outward line drawn uses both opposite sides instead. The corner may also be
/// reached through a diagonal chain of 2s.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberCornerRule;

impl CellRule for NumberCornerRule {
    const KIND: CellKind = CellKind::Number;
    const SKIP_OUTSIDE: bool = true;
    const SKIP_UNMODIFIED: bool = true;
    const NAME: &'static str = "number corner";

    fn apply(&self, board: &mut Board, location: Location) -> Deduction {
        if board.surrounding(location).fixed() == 4 {
            return Ok(false);
        }

        let process: fn(&mut Board, Location, Offset) -> Deduction = match board.clue(location) {
            None => process_empty,
            Some(1) => process_one,
            Some(3) => process_three,
            _ => return Ok(false),
        };
        each_direction(|v0| process(board, location, v0))
    }
}

/// The outward lines at the corner of `p` between `v0` and `v0.lrot()`.
fn outward(p: Location, v0: Offset) -> (Location, Location) {
    let v1 = v0.lrot();
    let corner = p + v0 + v1;
    (corner + v0, corner + v1)
}

fn both_forbidden(board: &Board, (a, b): (Location, Location)) -> bool {
    board.line(a).forbidden() && board.line(b).forbidden()
}

fn process_empty(board: &mut Board, p0: Location, v0: Offset) -> Deduction {
    let v1 = v0.lrot();
    let (p1, p2) = outward(p0, v0);
    if !both_forbidden(board, (p1, p2)) {
        return Ok(false);
    }

    // the lines opposite the corner are both drawn: the corner sides would close a loop
    let closing = if board.line(p0 - v1).exists() && board.line(p0 - v0).exists() {
        board.set_forbidden(p0 + v0)? | board.set_forbidden(p0 + v1)?
    } else {
        false
    };

    // three corners walled off: any line here would be a loop around this square alone
    let isolated = if board.line(p1 - v1 * 2).forbidden()
        && board.line(p2 - v1 * 4).forbidden()
        && board.line(p1 - v0 * 4).forbidden()
        && board.line(p2 - v0 * 2).forbidden()
    {
        board.set_forbidden(p0 + v0)?
            | board.set_forbidden(p0 + v1)?
            | board.set_forbidden(p0 - v0)?
            | board.set_forbidden(p0 - v1)?
    } else {
        false
    };

    Ok(closing | isolated)
}

fn process_one(board: &mut Board, p0: Location, v0: Offset) -> Deduction {
    if !both_forbidden(board, outward(p0, v0)) {
        return Ok(false);
    }

    Ok(board.set_forbidden(p0 + v0)? | board.set_forbidden(p0 + v0.lrot())?)
}

fn process_three(board: &mut Board, p0: Location, v0: Offset) -> Deduction {
    process_three_from(board, p0, p0, v0)
}

/// Look at the corner of `p`, which is `p0` itself or a 2 diagonally beyond it.
fn process_three_from(board: &mut Board, p0: Location, p: Location, v0: Offset) -> Deduction {
    let v1 = v0.lrot();
    let (p1, p2) = outward(p, v0);
    let (l1, l2) = (board.line(p1), board.line(p2));

    if l1.forbidden() && l2.forbidden() {
        Ok(board.set_exists(p0 + v0)? | board.set_exists(p0 + v1)?)
    } else if l1.exists() && l2.exists() {
        Err(Contradiction::new("a 3 is entered twice at one corner"))
    } else if l1.exists() || l2.exists() {
        Ok(board.set_exists(p0 - v0)? | board.set_exists(p0 - v1)?)
    } else {
        let next = p1 + v1;
        if board.clue(next) == Some(2) {
            process_three_from(board, p0, next, v0)
        } else {
            Ok(false)
        }
    }
}

/// A line entering a square at one corner must leave through the diagonally opposite corner's neighborhood.
///
/// When exactly one of the two sides meeting at a corner of a square is drawn, the line passes straight through the
/// corner dot and continues outward. That forces the outward pair of the diagonal neighbor's facing corner, and the
/// diagonal neighbor's clue may push the line on further. Clues of 1, 2 and 3 recognize the same situation from the
/// lines around them.
#[derive(Clone, Copy, Debug, Default)]
pub struct IncomingCornerRule;

impl CellRule for IncomingCornerRule {
    const KIND: CellKind = CellKind::Number;
    const SKIP_OUTSIDE: bool = false;
    const SKIP_UNMODIFIED: bool = true;
    const NAME: &'static str = "incoming corner";

    fn apply(&self, board: &mut Board, location: Location) -> Deduction {
        let general = process_general(board, location)?;

        let process: fn(&mut Board, Location, Offset) -> Deduction = match board.clue(location) {
            Some(1) => process1,
            Some(2) => process2,
            Some(3) => process3,
            _ => return Ok(general),
        };
        Ok(each_direction(|v| process(board, location, v))? | general)
    }
}

fn process_general(board: &mut Board, p0: Location) -> Deduction {
    let sides = adjacent4(p0).map(|line| board.inside_frame(line).then(|| board.line(line)));
    Direction::VARIANTS.iter().try_fold(false, |changed, direction| {
        let i = direction.index();
        let incoming = match (sides[i], sides[(i + 3) % 4]) {
            (Some(c1), Some(c2)) if (c1.forbidden() && c2.exists()) || (c1.exists() && c2.forbidden()) => {
                process_incoming(board, p0, direction.offset())?
            }
            _ => false,
        };
        Ok(incoming | changed)
    })
}

fn process1(board: &mut Board, p0: Location, v: Offset) -> Deduction {
    if board.line(p0 - v).forbidden() && board.line(p0 + v.rrot()).forbidden() {
        process_incoming(board, p0, v)
    } else {
        Ok(false)
    }
}

fn process2(board: &mut Board, p0: Location, v0: Offset) -> Deduction {
    let walled = |v1: Offset, v2: Offset| {
        board.line(p0 + v1 * 2 + v2).forbidden() && board.line(p0 + v2 * 2 + v1).forbidden()
    };

    if walled(-v0, v0.lrot()) || walled(v0, v0.rrot()) {
        process_incoming(board, p0, v0)
    } else {
        Ok(false)
    }
}

fn process3(board: &mut Board, p0: Location, v: Offset) -> Deduction {
    if board.line(p0 - v).exists() && board.line(p0 + v.rrot()).exists() {
        process_incoming(board, p0, v)
    } else {
        Ok(false)
    }
}

/// A line passes through the corner of `p0` between `v` and `v.lrot()` heading outward.
fn process_incoming(board: &mut Board, p0: Location, v: Offset) -> Deduction {
    let p1 = p0 + v * 2 + v.lrot() * 2;
    let (c1, c2) = (p1 - v, p1 + v.rrot());

    // exactly one of the two outward lines is used
    let (l1, l2) = (board.line(c1), board.line(c2));
    let through = if l1.forbidden() {
        board.set_exists(c2)?
    } else if l2.forbidden() {
        board.set_exists(c1)?
    } else if l1.exists() {
        board.set_forbidden(c2)?
    } else if l2.exists() {
        board.set_forbidden(c1)?
    } else {
        false
    };

    let beyond = match board.clue(p1) {
        Some(1) => board.set_forbidden(p1 + v)? | board.set_forbidden(p1 + v.lrot())?,
        Some(2) => process_incoming(board, p1, v)?,
        Some(3) => board.set_exists(p1 + v)? | board.set_exists(p1 + v.lrot())?,
        _ => false,
    };

    Ok(through | beyond)
}
