//! Building boards by hand or from text.

use std::num::NonZero;

use crate::board::Board;
use crate::cell::CellKind;
use crate::error::LoadError;
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A clue was placed on a square outside the bounds specified by `dims`.
    ClueOutOfBounds(Location),
    /// A clue larger than 3 was given; a square only has four sides and a clue of 4 would be a closed loop by itself.
    ClueOutOfRange(Location),
    /// A line was requested at a physical location that is not a line inside the frame.
    NotALine(Location),
    /// A line was both drawn and forbidden.
    ConflictingLine(Location),
}

/// A builder for Slither Link boards.
///
/// Clues are placed on squares, addressed `(x, y)` from the top left square.
/// Lines are addressed by their physical location, see [`Board`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    board: Board,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            board: Board::new(dims),
            invalid_reasons: Default::default(),
        }
    }

    /// Place `clue` on the square at `location`.
    ///
    /// May cause the builder to enter a [`ClueOutOfBounds`](BuilderInvalidReason::ClueOutOfBounds) or
    /// [`ClueOutOfRange`](BuilderInvalidReason::ClueOutOfRange) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn set_clue(&mut self, location: Location, clue: u8) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let (width, height) = self.board.dims();
        if location.0 >= width.get() || location.1 >= height.get() {
            self.invalid_reasons.push(BuilderInvalidReason::ClueOutOfBounds(location));
        } else if clue > 3 {
            self.invalid_reasons.push(BuilderInvalidReason::ClueOutOfRange(location));
        } else {
            self.board.set_clue(Board::square(location), Some(clue));
        }

        self
    }

    /// Draw the line at the physical `location`.
    ///
    /// May cause the builder to enter a [`NotALine`](BuilderInvalidReason::NotALine) or
    /// [`ConflictingLine`](BuilderInvalidReason::ConflictingLine) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_line(&mut self, location: Location) -> &mut Self {
        self.fix_line(location, true)
    }

    /// Rule out the line at the physical `location`, with the same conditions as [`Self::add_line`].
    pub fn forbid_line(&mut self, location: Location) -> &mut Self {
        self.fix_line(location, false)
    }

    fn fix_line(&mut self, location: Location, exists: bool) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.board.inside_frame(location) || !CellKind::at(location).is_line() {
            self.invalid_reasons.push(BuilderInvalidReason::NotALine(location));
            return self;
        }

        let fixed = if exists { self.board.set_exists(location) } else { self.board.set_forbidden(location) };
        if fixed.is_err() {
            self.invalid_reasons.push(BuilderInvalidReason::ConflictingLine(location));
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        match self.is_valid() {
            None => Ok(self.board.clone()),
            Some(reasons) => Err(reasons),
        }
    }
}

/// The rows of a puzzle file: empty lines and lines starting with `#` are skipped, line endings stripped.
///
/// Spaces are significant in both formats, so a line of spaces is a row like any other.
pub fn puzzle_rows(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn dims_of(width: usize, height: usize) -> Result<(Dimension, Dimension), LoadError> {
    match (NonZero::new(width), NonZero::new(height)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(LoadError::Empty),
    }
}

fn check_widths(rows: &[Vec<char>]) -> Result<usize, LoadError> {
    let expected = rows.first().map_or(0, Vec::len);
    match rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(LoadError::RaggedRow { row, expected, found: rows[row].len() }),
        None => Ok(expected),
    }
}

/// Load a puzzle given one row of squares per line: `0` to `3` are clues, any other character an empty square.
///
/// A space is an empty square too; only a trailing `'\r'` is stripped.
pub fn load_compact<S: AsRef<str>>(rows: &[S]) -> Result<Board, LoadError> {
    let rows = rows.iter()
        .map(|row| row.as_ref().trim_end_matches('\r').chars().collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let width = check_widths(&rows)?;

    let mut builder = BoardBuilder::with_dims(dims_of(width, rows.len())?);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.iter().enumerate() {
            if let Some(clue @ 0..=3) = c.to_digit(10) {
                builder.set_clue(Location(x, y), clue as u8);
            }
        }
    }

    builder.build().map_err(|reasons| LoadError::Invalid(reasons.clone()))
}

/// Load a puzzle drawn in full, as produced by rendering with [`Style::Full`](crate::render::Style::Full).
///
/// Dots are `+`, drawn lines `-` or `|`, forbidden lines `x` and undecided lines a space; squares hold a clue digit or
/// a space. Width and height are counted in characters and must be odd and at least 3.
pub fn load_full<S: AsRef<str>>(rows: &[S]) -> Result<Board, LoadError> {
    let rows = rows.iter().map(|row| row.as_ref().chars().collect::<Vec<_>>()).collect::<Vec<_>>();
    let width = check_widths(&rows)?;
    let height = rows.len();
    if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
        return Err(LoadError::BadGridSize { width, height });
    }

    let mut builder = BoardBuilder::with_dims(dims_of((width - 1) / 2, (height - 1) / 2)?);
    for (y, row) in rows.iter().enumerate() {
        for (x, &c) in row.iter().enumerate() {
            let physical = Location(x + 1, y + 1);
            let unexpected = |expected| LoadError::UnexpectedChar { found: c, row: y, col: x, expected };
            match (CellKind::at(physical), c) {
                (CellKind::Number, ' ') => {}
                (CellKind::Number, '0'..='3') => {
                    builder.set_clue(Location(x / 2, y / 2), c as u8 - b'0');
                }
                (CellKind::Number, _) => return Err(unexpected("a clue from 0 to 3 or a space")),
                (CellKind::Dot, '+') => {}
                (CellKind::Dot, _) => return Err(unexpected("a dot '+'")),
                (_, ' ') => {}
                (_, '-' | '|') => {
                    builder.add_line(physical);
                }
                (_, 'x') => {
                    builder.forbid_line(physical);
                }
                _ => return Err(unexpected("a line '-', '|', 'x' or a space")),
            }
        }
    }

    builder.build().map_err(|reasons| LoadError::Invalid(reasons.clone()))
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::{load_compact, load_full, puzzle_rows, BoardBuilder, BuilderInvalidReason};
    use crate::error::LoadError;
    use crate::location::Location;
    use crate::render::Style;

    #[test]
    fn builder_places_clues_and_lines() {
        let board = BoardBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(1).unwrap()))
            .set_clue(Location(0, 0), 3)
            .add_line(Location(2, 1))
            .forbid_line(Location(3, 2))
            .build()
            .unwrap();

        assert_eq!(board.render(Style::Full), "+-+ +\n 3x  \n+ + +");
    }

    #[test]
    fn builder_rejects_bad_input() {
        let dims = (NonZero::new(2).unwrap(), NonZero::new(2).unwrap());
        assert_eq!(
            BoardBuilder::with_dims(dims).set_clue(Location(2, 0), 1).build().unwrap_err(),
            &vec![BuilderInvalidReason::ClueOutOfBounds(Location(2, 0))],
        );
        assert_eq!(
            BoardBuilder::with_dims(dims).set_clue(Location(0, 0), 4).build().unwrap_err(),
            &vec![BuilderInvalidReason::ClueOutOfRange(Location(0, 0))],
        );
        // sentinel stubs and dots are not lines
        assert_eq!(
            BoardBuilder::with_dims(dims).add_line(Location(1, 0)).build().unwrap_err(),
            &vec![BuilderInvalidReason::NotALine(Location(1, 0))],
        );
        assert_eq!(
            BoardBuilder::with_dims(dims).add_line(Location(3, 3)).build().unwrap_err(),
            &vec![BuilderInvalidReason::NotALine(Location(3, 3))],
        );
        // only the first problem is recorded
        assert_eq!(
            BoardBuilder::with_dims(dims).add_line(Location(2, 1)).forbid_line(Location(2, 1)).set_clue(Location(9, 9), 1).build().unwrap_err(),
            &vec![BuilderInvalidReason::ConflictingLine(Location(2, 1))],
        );
    }

    #[test]
    fn compact_rows_become_clues() {
        let err = load_compact(&["3.", "1 2"]).unwrap_err();
        assert!(matches!(err, LoadError::RaggedRow { row: 1, expected: 2, found: 3 }));

        let board = load_compact(&["3.", "12"]).unwrap();
        assert_eq!(format!("{}", board), "+ + +\n 3   \n+ + +\n 1 2 \n+ + +");
    }

    #[test]
    fn full_grid_round_trips() {
        let rows = ["+-+-+", "|3x3|", "+-+-+"];
        let board = load_full(&rows).unwrap();
        assert_eq!(board.render(Style::Full), rows.join("\n"));
    }

    #[test]
    fn full_grid_is_validated() {
        assert!(matches!(load_full(&["+-+", "| |"]), Err(LoadError::BadGridSize { width: 3, height: 2 })));
        assert!(matches!(
            load_full(&["+-+", "|4|", "+-+"]),
            Err(LoadError::UnexpectedChar { found: '4', row: 1, col: 1, .. })
        ));
        assert!(matches!(
            load_full(&["+-*", "| |", "+-+"]),
            Err(LoadError::UnexpectedChar { found: '*', row: 0, col: 2, .. })
        ));
        assert!(matches!(
            load_full(&["+?+", "| |", "+-+"]),
            Err(LoadError::UnexpectedChar { found: '?', row: 0, col: 1, .. })
        ));
        assert!(matches!(load_compact::<&str>(&[]), Err(LoadError::Empty)));
    }

    #[test]
    fn spaces_are_empty_squares() {
        let board = load_compact(&[" 1", "1 "]).unwrap();
        assert_eq!(format!("{}", board), "+ + +\n   1 \n+ + +\n 1   \n+ + +");

        let board = load_compact(&["3..", "   ", ".3."]).unwrap();
        let (width, height) = board.dims();
        assert_eq!((width.get(), height.get()), (3, 3));
        assert_eq!(board.clue(crate::board::Board::square(Location(1, 2))), Some(3));
    }

    #[test]
    fn comments_and_empty_lines_are_skipped() {
        let text = "# sl-0001\n\n3.\r\n# another comment\n12\n";
        assert_eq!(puzzle_rows(text), vec!["3.", "12"]);
    }

    #[test]
    fn rows_of_spaces_are_kept() {
        assert_eq!(puzzle_rows("3..\n   \n.3.\n"), vec!["3..", "   ", ".3."]);

        let text = "+ + +\n     \n+ + +\n";
        let board = load_full(&puzzle_rows(text)).unwrap();
        assert_eq!(board.render(Style::Full), "+ + +\n     \n+ + +");
    }
}
