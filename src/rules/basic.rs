use crate::board::Board;
use crate::cell::CellKind;
use crate::error::{Contradiction, Deduction};
use crate::location::Location;
use crate::rules::CellRule;

fn forbid_all(board: &mut Board, lines: Vec<Location>) -> Deduction {
    lines.into_iter().try_fold(false, |changed, line| Ok(board.set_forbidden(line)? | changed))
}

fn draw_all(board: &mut Board, lines: Vec<Location>) -> Deduction {
    lines.into_iter().try_fold(false, |changed, line| Ok(board.set_exists(line)? | changed))
}

/// A clue counts exactly the lines around its square.
///
/// Once that many lines are drawn the rest are forbidden; once only that many remain possible they are all drawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicNumberRule;

impl CellRule for BasicNumberRule {
    const KIND: CellKind = CellKind::Number;
    const SKIP_OUTSIDE: bool = true;
    const SKIP_UNMODIFIED: bool = true;
    const NAME: &'static str = "basic number";

    fn apply(&self, board: &mut Board, location: Location) -> Deduction {
        let Some(clue) = board.clue(location) else {
            return Ok(false);
        };

        let around = board.surrounding(location);
        if around.fixed() == 4 {
            return Ok(false);
        }

        if around.exists == clue {
            let unfixed = board.unfixed_around(location);
            forbid_all(board, unfixed)
        } else if 4 - around.forbidden == clue {
            let unfixed = board.unfixed_around(location);
            draw_all(board, unfixed)
        } else if around.exists > clue || around.forbidden > 4 - clue {
            Err(Contradiction::new("line count around a clue cannot match it"))
        } else {
            Ok(false)
        }
    }
}

/// A dot has either no line or exactly two.
#[derive(Clone, Copy, Debug, Default)]
pub struct DotRule;

impl CellRule for DotRule {
    const KIND: CellKind = CellKind::Dot;
    const SKIP_OUTSIDE: bool = false;
    const SKIP_UNMODIFIED: bool = true;
    const NAME: &'static str = "dot";

    fn apply(&self, board: &mut Board, location: Location) -> Deduction {
        let around = board.surrounding(location);
        if around.fixed() == 4 {
            return Ok(false);
        }

        if around.forbidden == 3 || around.exists == 2 {
            let unfixed = board.unfixed_around(location);
            forbid_all(board, unfixed)
        } else if around.forbidden == 2 && around.exists == 1 {
            // a line comes in and only one way out is left
            let unfixed = board.unfixed_around(location);
            board.set_exists(unfixed[0])
        } else if around.exists > 2 {
            Err(Contradiction::new("more than two lines meet at a dot"))
        } else {
            Ok(false)
        }
    }
}
