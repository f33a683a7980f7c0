//! Text renderings of a board.

use itertools::Itertools;
use strum::{Display, EnumString};

use crate::board::Board;
use crate::cell::{Cell, Line};
use crate::location::Location;

/// Text renderings of a [`Board`]. The sentinel ring is never shown.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Style {
    /// Drawn lines only: `+` dots, `-` and `|` lines, clue digits.
    #[default]
    Ascii,
    /// Like [`Ascii`](Self::Ascii), plus `x` for forbidden lines. [`load_full`](crate::builder::load_full) reads it back.
    Full,
    /// Box drawing glyphs; lines drawn by hypothesis are thin, deduced ones heavy.
    Pretty,
}

impl Style {
    fn glyph(&self, cell: Cell) -> char {
        let line = |line: Line, heavy: char, thin: char, plain: char| match self {
            Self::Pretty if line.exists() => if line.assumed() { thin } else { heavy },
            Self::Pretty if line.forbidden() => '×',
            _ if line.exists() => plain,
            Self::Full if line.forbidden() => 'x',
            _ => ' ',
        };

        match cell {
            Cell::Number { clue: Some(clue), .. } => char::from(b'0' + clue),
            Cell::Number { clue: None, .. } => ' ',
            Cell::Dot { .. } => if *self == Self::Pretty { '·' } else { '+' },
            Cell::HLine(l) => line(l, '━', '─', '-'),
            Cell::VLine(l) => line(l, '┃', '│', '|'),
        }
    }

    pub(crate) fn render(&self, board: &Board) -> String {
        let (width, height) = board.physical_dims();
        (1..height - 1)
            .map(|y| (1..width - 1).map(|x| self.glyph(board.cell(Location(x, y)))).collect::<String>())
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::Style;
    use crate::board::Board;
    use crate::location::Location;

    #[test]
    fn renders_each_style() {
        let mut board = Board::new((NonZero::new(2).unwrap(), NonZero::new(1).unwrap()));
        board.set_clue(Board::square(Location(0, 0)), Some(3));
        board.set_exists(Location(2, 1)).unwrap();
        board.set_forbidden(Location(3, 2)).unwrap();
        board.set_exists(Location(1, 2)).unwrap();
        board.mark_assumed(Location(1, 2));

        assert_eq!(board.render(Style::Ascii), "+-+ +\n|3   \n+ + +");
        assert_eq!(board.render(Style::Full), "+-+ +\n|3x  \n+ + +");
        assert_eq!(board.render(Style::Pretty), "·━· ·\n│3×  \n· · ·");
        assert_eq!(format!("{}", board), board.render(Style::Ascii));
    }

    #[test]
    fn styles_parse_from_names() {
        assert_eq!("full".parse::<Style>(), Ok(Style::Full));
        assert_eq!(Style::Pretty.to_string(), "pretty");
    }
}
