use std::collections::HashMap;

use crate::board::Board;
use crate::engine::TopologicalRule;
use crate::error::{Contradiction, Deduction};
use crate::location::Location;
use crate::shape::Direction;
use crate::topology::{label_segments, SegmentSubject, TrackTopology};

/// Dots of a board, joined wherever the line between them is still undecided.
struct OpenDots<'a>(&'a Board);

impl OpenDots<'_> {
    fn physical(location: Location) -> Location {
        Location(location.0 * 2 + 1, location.1 * 2 + 1)
    }

    fn of_physical(location: Location) -> Location {
        Location((location.0 - 1) / 2, (location.1 - 1) / 2)
    }
}

impl SegmentSubject for OpenDots<'_> {
    fn dims(&self) -> (usize, usize) {
        let (width, height) = self.0.dims();
        (width.get() + 1, height.get() + 1)
    }

    fn belongs_to_segment(&self, _location: Location) -> bool {
        true
    }

    fn connected(&self, location: Location, direction: Direction) -> bool {
        !self.0.line(direction.attempt_from(Self::physical(location))).fixed()
    }
}

/// Track ends can only meet through undecided lines, so every region of dots joined by undecided lines must hold an
/// even number of ends.
///
/// Never changes the board; it only detects contradictions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentParityRule;

impl TopologicalRule<Board, TrackTopology> for SegmentParityRule {
    fn apply(&self, board: &mut Board, topology: &TrackTopology) -> Deduction {
        let segments = label_segments(&OpenDots(board));

        let mut ends = HashMap::<usize, usize>::new();
        for track in topology.tracks() {
            for end in [track.ends.0, track.ends.1] {
                let label = segments.label_at(OpenDots::of_physical(end)).unwrap_or_default();
                *ends.entry(label).or_default() += 1;
            }
        }

        if ends.values().any(|count| count % 2 == 1) {
            return Err(Contradiction::new("a region holds an odd number of track ends"));
        }

        Ok(false)
    }

    fn name(&self) -> &'static str {
        "segment parity"
    }
}
