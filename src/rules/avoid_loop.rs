use crate::board::Board;
use crate::engine::TopologicalRule;
use crate::error::Deduction;
use crate::location::{Location, Offset};
use crate::shape::adjacent4;
use crate::topology::{Track, TrackTopology};

/// Keep a track from closing on itself while other tracks remain.
///
/// A loop is only a solution if it is the one and only track, so as long as there are at least two, no track may be
/// closed. Ends one step apart get the line between them forbidden. Ends two steps apart are separated by a dot with no
/// other way out than the two lines towards the ends; both are forbidden.
#[derive(Clone, Copy, Debug, Default)]
pub struct AvoidLoopRule;

impl TopologicalRule<Board, TrackTopology> for AvoidLoopRule {
    fn apply(&self, board: &mut Board, topology: &TrackTopology) -> Deduction {
        if topology.tracks().len() < 2 {
            return Ok(false);
        }

        topology.tracks().iter().try_fold(false, |changed, track| Ok(apply_to_track(board, track)? | changed))
    }

    fn name(&self) -> &'static str {
        "avoid loop"
    }
}

fn apply_to_track(board: &mut Board, track: &Track) -> Deduction {
    let p = track.ends.0;
    let v = Offset::between(track.ends.0, track.ends.1);

    match track.distance() {
        2 if track.legs >= 3 => board.set_forbidden(p + Offset(v.0 / 2, v.1 / 2)),
        4 if v.0 == 0 || v.1 == 0 => {
            let step = Offset(v.0 / 4, v.1 / 4);
            forbid_closing_pair(board, p, step, step)
        }
        4 => {
            let (horizontal, vertical) = (Offset(v.0 / 2, 0), Offset(0, v.1 / 2));
            Ok(forbid_closing_pair(board, p, horizontal, vertical)?
                | forbid_closing_pair(board, p, vertical, horizontal)?)
        }
        _ => Ok(false),
    }
}

/// Leaving `p0` by `v1` reaches a dot whose only other way on is `v2`, which leads to the other end.
fn forbid_closing_pair(board: &mut Board, p0: Location, v1: Offset, v2: Offset) -> Deduction {
    let first = p0 + v1;
    if board.line(first).fixed() {
        return Ok(false);
    }

    let dot = first + v1;
    let second = dot + v2;
    let cornered = adjacent4(dot).into_iter()
        .all(|line| line == first || line == second || board.line(line).forbidden());
    if !cornered || board.line(second).fixed() {
        return Ok(false);
    }

    Ok(board.set_forbidden(first)? | board.set_forbidden(second)?)
}

#[cfg(test)]
mod tests {
    use super::AvoidLoopRule;
    use crate::engine::TopologicalRule;
    use crate::render::Style;
    use crate::rules::tests::full;
    use crate::solver::tracks_of;

    fn after(rows: &[&str]) -> String {
        let mut board = full(rows);
        let topology = tracks_of(&board);
        AvoidLoopRule.apply(&mut board, &topology).unwrap();
        board.render(Style::Full)
    }

    #[test]
    fn adjacent_ends_are_kept_apart() {
        assert_eq!(after(&[
            "+-+ + +",
            "|     |",
            "+-+ + +",
            "       ",
            "+ + + +",
        ]), [
            "+-+ + +",
            "| x   |",
            "+-+ + +",
            "       ",
            "+ + + +",
        ].join("\n"));
    }

    #[test]
    fn cornered_dot_between_ends_is_avoided() {
        assert_eq!(after(&[
            "+-+ + +",
            "|     |",
            "+x+x+ +",
            "|      ",
            "+-+ + +",
        ]), [
            "+-+ + +",
            "| x   |",
            "+x+x+ +",
            "| x    ",
            "+-+ + +",
        ].join("\n"));
    }

    #[test]
    fn track_turning_a_corner_is_kept_open() {
        assert_eq!(after(&[
            "+ + +-+",
            "x   | |",
            "+ + + +",
            "  |   |",
            "+-+x+-+",
        ]), [
            "+ + +-+",
            "x   | |",
            "+x+ + +",
            "x | x |",
            "+-+x+-+",
        ].join("\n"));
    }

    #[test]
    fn a_lone_track_may_close() {
        let rows = [
            "+-+ + +",
            "|      ",
            "+-+ + +",
            "       ",
            "+ + + +",
        ];
        assert_eq!(after(&rows), rows.join("\n"));
    }
}
