use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::definitions::NotationError;

/// Board coordinate. Row 0 is rank 8, column 0 is file a.
///
/// The only ways to build one are range-checked, so every `Square` in the
/// crate indexes the board safely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /** Caller guarantees both coordinates are below 8. */
    pub(crate) const fn at(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row as usize
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col as usize
    }

    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::at(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::at(row, col)))
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(NotationError::InvalidSquare(s.to_owned()));
        }
        let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(NotationError::InvalidSquare(s.to_owned()));
        }
        Ok(Square::at(b'8' - rank, file - b'a'))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// Parses an algebraic `(from, to)` pair such as `("e2", "e4")`.
pub fn parse_pair(from: &str, to: &str) -> Result<(Square, Square), NotationError> {
    Ok((from.parse()?, to.parse()?))
}

pub struct DirectionIterator {
    position: Option<Square>,
    direction: (i8, i8),
}

impl Iterator for DirectionIterator {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (d_row, d_col) = self.direction;
        self.position = self.position?.offset(d_row, d_col);
        self.position
    }
}

/// Squares along a ray, excluding the start, until the board edge.
pub fn in_direction(position: Square, direction: (i8, i8)) -> DirectionIterator {
    DirectionIterator {
        position: Some(position),
        direction,
    }
}

/// Squares strictly between two squares of the same row.
pub fn between_in_row(a: Square, b: Square) -> impl Iterator<Item = Square> {
    debug_assert!(a.row == b.row, "Squares must share a row!");
    let (low, high) = if a.col < b.col {
        (a.col, b.col)
    } else {
        (b.col, a.col)
    };
    let row = a.row;
    (low + 1..high).map(move |col| Square::at(row, col))
}

/** Tables directions for pieces */
pub const BISHOP_DIR: &[(i8, i8)] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ROOK_DIR: &[(i8, i8)] = &[(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const QUEEN_DIR: &[(i8, i8)] = &[
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/** Possible moves for pieces */
pub const KING_MOVES: &[(i8, i8)] = QUEEN_DIR;
pub const KNIGHT_MOVES: &[(i8, i8)] = &[
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
