//! Grid coordinates: a row letter `A`..`E` and a column number `1`..`5`.

use core::fmt;
use core::str::FromStr;

use crate::common::CoordinateError;
use crate::config::BOARD_SIZE;

/// One of the 25 cells of the board. Rows and columns are stored zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// Build a coordinate from zero-based row and column indices.
    pub fn new(row: u8, col: u8) -> Result<Self, CoordinateError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(CoordinateError::OutOfBounds);
        }
        Ok(Self { row, col })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row letter, `'A'` for the first row.
    pub fn row_letter(&self) -> char {
        (b'A' + self.row) as char
    }

    /// One-based column number as printed on the board.
    pub fn col_number(&self) -> u8 {
        self.col + 1
    }

    pub fn same_row(&self, other: &Coordinate) -> bool {
        self.row == other.row
    }

    pub fn same_col(&self, other: &Coordinate) -> bool {
        self.col == other.col
    }

    /// Orthogonal neighbours only; diagonals are not adjacent.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        (self.same_row(other) && self.col.abs_diff(other.col) == 1)
            || (self.same_col(other) && self.row.abs_diff(other.row) == 1)
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { row, col }))
    }

    /// Position of this cell in row-major order.
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.col_number())
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let row_ch = chars
            .next()
            .ok_or(CoordinateError::Empty)?
            .to_ascii_uppercase();
        if !row_ch.is_ascii_uppercase() {
            return Err(CoordinateError::InvalidRow);
        }
        let row = (row_ch as u8) - b'A';
        if row >= BOARD_SIZE {
            return Err(CoordinateError::InvalidRow);
        }
        // Exactly one digit: no sign, no leading zero.
        let col = match (chars.next(), chars.next()) {
            (Some(d), None) if d.is_ascii_digit() => d as u8 - b'0',
            _ => return Err(CoordinateError::InvalidColumn),
        };
        if col == 0 || col > BOARD_SIZE {
            return Err(CoordinateError::InvalidColumn);
        }
        Ok(Self { row, col: col - 1 })
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "std")]
impl<'de> serde::Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = std::string::String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
