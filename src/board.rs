//! The Slither Link board: clues, lines and change tracking on one physical grid.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::{Cell, CellKind, Line, LineState, Surrounding};
use crate::error::{Contradiction, Deduction};
use crate::location::{Dimension, Location};
use crate::render::Style;
use crate::shape::adjacent4;

/// Largest clue total a loop around two cells can satisfy:
///
/// ```text
///   1 1
///  +-+-+
/// 1|3 3|1
///  +-+-+
///   1 1
/// ```
const SMALL_LOOP_CLUE_TOTAL: u32 = 12;

/// Change tracking, one flag per physical cell plus one per physical row.
#[derive(Clone, Debug)]
struct DirtyFlags {
    cells: Array2<bool>,
    rows: Vec<bool>,
}

impl DirtyFlags {
    fn all_dirty(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), true),
            rows: vec![true; height],
        }
    }

    fn clear(&mut self) {
        self.cells.fill(false);
        self.rows.fill(false);
    }
}

/// An exact encoding of every line of a board, two bits per line.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Fingerprint(Box<[u64]>);

/// A Slither Link board.
///
/// Internally the puzzle is laid out on a "physical" grid where numbers, lines and dots all occupy cells, see
/// [`CellKind::at`]. A puzzle of `w` by `h` squares uses `2w + 3` by `2h + 3` physical cells: the outermost ring holds
/// sentinel numbers and line stubs that are forbidden from the start, so rules never need to special case the border.
///
/// Boards are made with a [`BoardBuilder`](crate::builder::BoardBuilder) or parsed with
/// [`load_compact`](crate::builder::load_compact) and [`load_full`](crate::builder::load_full).
#[derive(Clone, Debug)]
pub struct Board {
    // width, height in squares
    dims: (Dimension, Dimension),
    cells: Array2<Cell>,
    dirty: DirtyFlags,
    // accumulates changes for the next generation
    pending: DirtyFlags,
}

impl Board {
    /// An empty board of `dims` squares, specified in `(x, y)` order.
    pub fn new(dims: (Dimension, Dimension)) -> Self {
        let (width, height) = (dims.0.get() * 2 + 3, dims.1.get() * 2 + 3);
        let mut board = Self {
            dims,
            cells: Array2::from_shape_fn((height, width), |index| Cell::empty(CellKind::at(Location::from(index)))),
            dirty: DirtyFlags::all_dirty(width, height),
            pending: DirtyFlags::all_dirty(width, height),
        };

        // sentinel stubs pointing out of the frame; nothing else is set yet so none can conflict
        let stubs = (1..width).step_by(2).flat_map(|x| [Location(x, 0), Location(x, height - 1)])
            .chain((1..height).step_by(2).flat_map(|y| [Location(0, y), Location(width - 1, y)]))
            .collect_vec();
        for stub in stubs {
            let forbidden = board.set_forbidden(stub);
            debug_assert!(forbidden.is_ok(), "sentinel stub {stub:?} conflicts");
        }

        board
    }

    /// A fresh board carrying only the clues of `self`.
    pub fn clues_only(&self) -> Self {
        let mut board = Self::new(self.dims);
        for location in self.locations_of(CellKind::Number) {
            board.set_clue(location, self.clue(location));
        }
        board
    }

    /// Dimensions in squares, `(width, height)`.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Dimensions of the physical grid, `(width, height)`.
    pub fn physical_dims(&self) -> (usize, usize) {
        (self.cells.ncols(), self.cells.nrows())
    }

    /// Physical location of the square `(x, y)`.
    pub fn square(location: Location) -> Location {
        Location(location.0 * 2 + 2, location.1 * 2 + 2)
    }

    /// Whether `location` is on the physical grid.
    pub fn contains(&self, location: Location) -> bool {
        self.cells.get(location.as_index()).is_some()
    }

    /// Whether `location` lies strictly inside the sentinel ring.
    pub fn inside_frame(&self, location: Location) -> bool {
        let (width, height) = self.physical_dims();
        (1..width - 1).contains(&location.0) && (1..height - 1).contains(&location.1)
    }

    /// Every physical location of `kind`, in row-major order.
    pub fn locations_of(&self, kind: CellKind) -> impl Iterator<Item = Location> {
        let (width, height) = self.physical_dims();
        let (x0, y0) = kind.origin();
        (y0..height).step_by(2)
            .cartesian_product((x0..width).step_by(2))
            .map(|(y, x)| Location(x, y))
    }

    /// The clue of the number cell at `location`.
    ///
    /// # Panics
    /// If `location` is not a number cell.
    pub fn clue(&self, location: Location) -> Option<u8> {
        match self.cells[location.as_index()] {
            Cell::Number { clue, .. } => clue,
            other => panic!("{:?} at {:?} carries no clue", other, location),
        }
    }

    pub(crate) fn set_clue(&mut self, location: Location, value: Option<u8>) {
        match &mut self.cells[location.as_index()] {
            Cell::Number { clue, .. } => *clue = value,
            other => panic!("{:?} at {:?} cannot carry a clue", other, location),
        }
    }

    /// # Panics
    /// If `location` is not a line cell.
    pub fn line(&self, location: Location) -> Line {
        match self.cells[location.as_index()].line() {
            Some(line) => *line,
            None => panic!("no line at {:?}", location),
        }
    }

    fn line_mut(&mut self, location: Location) -> &mut Line {
        match self.cells[location.as_index()].line_mut() {
            Some(line) => line,
            None => panic!("no line at {:?}", location),
        }
    }

    /// Line counts around the number or dot at `location`.
    pub fn surrounding(&self, location: Location) -> Surrounding {
        match self.cells[location.as_index()] {
            Cell::Number { around, .. } | Cell::Dot { around } => around,
            other => panic!("{:?} at {:?} is not surrounded by lines", other, location),
        }
    }

    /// The undecided lines around the number or dot at `location`.
    pub fn unfixed_around(&self, location: Location) -> Vec<Location> {
        adjacent4(location).into_iter()
            .filter(|&line| self.contains(line) && !self.line(line).fixed())
            .collect_vec()
    }

    /// Draw the line at `location`. Returns whether anything changed.
    pub fn set_exists(&mut self, location: Location) -> Deduction {
        self.set_line(location, LineState::Exists)
    }

    /// Rule out the line at `location`. Returns whether anything changed.
    pub fn set_forbidden(&mut self, location: Location) -> Deduction {
        self.set_line(location, LineState::Forbidden)
    }

    fn set_line(&mut self, location: Location, target: LineState) -> Deduction {
        let line = self.line_mut(location);
        if line.state == target {
            return Ok(false);
        }
        if line.state != LineState::Unknown {
            return Err(Contradiction::new(match target {
                LineState::Exists => "drawing a forbidden line",
                _ => "forbidding a drawn line",
            }));
        }
        line.state = target;

        for neighbor in adjacent4(location) {
            if let Some(around) = self.cells.get_mut(neighbor.as_index()).and_then(Cell::around_mut) {
                match target {
                    LineState::Exists => around.exists += 1,
                    _ => around.forbidden += 1,
                }
            }
        }
        self.dirtify(location);

        Ok(true)
    }

    pub(crate) fn mark_assumed(&mut self, location: Location) {
        self.line_mut(location).assumed = true;
    }

    /// Mark the 5x5 neighborhood of `location` as changed, in this generation and the next.
    fn dirtify(&mut self, location: Location) {
        let (width, height) = self.physical_dims();
        let xs = location.0.saturating_sub(2)..=(location.0 + 2).min(width - 1);
        let ys = location.1.saturating_sub(2)..=(location.1 + 2).min(height - 1);

        for flags in [&mut self.dirty, &mut self.pending] {
            for y in ys.clone() {
                flags.rows[y] = true;
                for x in xs.clone() {
                    flags.cells[(y, x)] = true;
                }
            }
        }
    }

    /// Start a new change-tracking generation: changes recorded since the last snapshot become the current ones.
    pub fn snapshot_dirty_flags(&mut self) {
        std::mem::swap(&mut self.dirty, &mut self.pending);
        self.pending.clear();
    }

    pub(crate) fn is_row_dirty(&self, y: usize) -> bool {
        self.dirty.rows[y]
    }

    pub(crate) fn is_dirty(&self, location: Location) -> bool {
        self.dirty.cells[location.as_index()]
    }

    /// An exact encoding of every line's state; boards with equal fingerprints differ at most in clues.
    pub fn fingerprint(&self) -> Fingerprint {
        let lines = self.cells.iter().filter_map(Cell::line);
        let mut words = vec![0u64; (self.cells.len() * 2).div_ceil(64)];
        for (i, line) in lines.enumerate() {
            let bits: u64 = match line.state {
                LineState::Unknown => 0b00,
                LineState::Exists => 0b01,
                LineState::Forbidden => 0b10,
            };
            words[i * 2 / 64] |= bits << (i * 2 % 64);
        }
        Fingerprint(words.into_boxed_slice())
    }

    /// Whether the clues are too many for any loop around just one or two squares.
    ///
    /// When this holds, two adjacent 3s must be separated by a line.
    pub fn no_small_loops_allowed(&self) -> bool {
        let total: u32 = self.locations_of(CellKind::Number)
            .filter_map(|location| self.clue(location))
            .map(u32::from)
            .sum();
        total > SMALL_LOOP_CLUE_TOTAL
    }

    pub(crate) fn cell(&self, location: Location) -> Cell {
        self.cells[location.as_index()]
    }

    /// Render in the given [`Style`].
    pub fn render(&self, style: Style) -> String {
        style.render(self)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(Style::Ascii))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use proptest::prelude::*;

    use super::Board;
    use crate::cell::CellKind;
    use crate::location::Location;

    fn board(width: usize, height: usize) -> Board {
        Board::new((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()))
    }

    #[test]
    fn sentinels_are_forbidden() {
        let board = board(2, 1);
        assert_eq!(board.physical_dims(), (7, 5));
        assert!(board.line(Location(1, 0)).forbidden());
        assert!(board.line(Location(5, 4)).forbidden());
        assert!(board.line(Location(0, 3)).forbidden());
        assert!(board.line(Location(6, 1)).forbidden());
        assert!(!board.line(Location(2, 1)).fixed());
        // corner dot of the frame has both outward stubs forbidden
        assert_eq!(board.surrounding(Location(1, 1)).forbidden, 2);
        assert_eq!(board.surrounding(Location(3, 1)).forbidden, 1);
    }

    #[test]
    fn setting_lines_updates_neighbors() {
        let mut board = board(2, 2);
        let square = Board::square(Location(0, 0));
        assert_eq!(square, Location(2, 2));

        assert_eq!(board.set_exists(Location(2, 1)), Ok(true));
        assert_eq!(board.set_exists(Location(2, 1)), Ok(false));
        assert!(board.set_forbidden(Location(2, 1)).is_err());
        assert_eq!(board.surrounding(square).exists, 1);
        assert_eq!(board.surrounding(Location(1, 1)).exists, 1);
        assert_eq!(board.surrounding(Location(3, 1)).exists, 1);

        assert_eq!(board.set_forbidden(Location(3, 2)), Ok(true));
        assert!(board.set_exists(Location(3, 2)).is_err());
        assert_eq!(board.surrounding(square).forbidden, 1);
        assert_eq!(board.unfixed_around(square), vec![Location(2, 3), Location(1, 2)]);
    }

    #[test]
    fn dirty_flags_are_double_buffered() {
        let mut board = board(3, 3);
        board.snapshot_dirty_flags();
        board.snapshot_dirty_flags();
        assert!(!board.is_dirty(Location(4, 4)));

        board.set_exists(Location(4, 3)).unwrap();
        assert!(board.is_dirty(Location(4, 4)));
        assert!(board.is_row_dirty(1));
        assert!(!board.is_dirty(Location(4, 6)));

        board.snapshot_dirty_flags();
        assert!(board.is_dirty(Location(4, 4)));
        board.snapshot_dirty_flags();
        assert!(!board.is_dirty(Location(4, 4)));
    }

    #[test]
    fn small_loops_depend_on_clue_total() {
        let mut board = board(3, 3);
        for x in 0..3 {
            board.set_clue(Board::square(Location(x, 0)), Some(3));
        }
        assert!(!board.no_small_loops_allowed());
        board.set_clue(Board::square(Location(0, 1)), Some(3));
        assert!(!board.no_small_loops_allowed());
        board.set_clue(Board::square(Location(1, 1)), Some(1));
        assert!(board.no_small_loops_allowed());
    }

    #[test]
    fn clues_only_drops_lines() {
        let mut board = board(2, 2);
        board.set_clue(Board::square(Location(1, 1)), Some(2));
        board.set_exists(Location(2, 1)).unwrap();

        let fresh = board.clues_only();
        assert_eq!(fresh.clue(Location(4, 4)), Some(2));
        assert!(!fresh.line(Location(2, 1)).fixed());
    }

    proptest! {
        #[test]
        fn fingerprints_match_exactly_when_lines_match(
            moves in proptest::collection::vec((0usize..16, any::<bool>()), 0..12),
            other in proptest::collection::vec((0usize..16, any::<bool>()), 0..12),
        ) {
            let apply = |moves: &[(usize, bool)]| {
                let mut board = board(2, 2);
                let lines = board.locations_of(CellKind::HLine)
                    .chain(board.locations_of(CellKind::VLine))
                    .filter(|&l| board.inside_frame(l))
                    .collect::<Vec<_>>();
                for &(i, exists) in moves {
                    let line = lines[i % lines.len()];
                    // conflicting moves are simply rejected
                    let _ = if exists { board.set_exists(line) } else { board.set_forbidden(line) };
                }
                board
            };
            let (a, b) = (apply(&moves), apply(&other));

            let same_lines = a.locations_of(CellKind::HLine)
                .chain(a.locations_of(CellKind::VLine))
                .all(|l| a.line(l).state() == b.line(l).state());
            prop_assert_eq!(a.fingerprint() == b.fingerprint(), same_lines);
        }
    }
}
