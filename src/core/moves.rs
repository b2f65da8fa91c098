//! Move representation
//!
//! A move is a `Location` on the board. Locations travel over the wire as
//! two-character tokens: the first character `'A'..='H'` selects the row and
//! the second `'1'..='8'` selects the column. Note that this puts the letter
//! on the row, the transpose of the usual Othello notation.

use super::board::Color;
use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// A cell on the board, addressed by row and column (both 0-7)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    row: u8,
    col: u8,
}

impl Location {
    /// Create a location; returns `None` when either coordinate is off the board
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Location { row, col })
        } else {
            None
        }
    }

    /// Create a location from a cell index (`row * 8 + col`, 0-63)
    #[inline]
    pub const fn from_index(idx: u8) -> Self {
        debug_assert!(idx < 64);
        Location { row: idx >> 3, col: idx & 7 }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.row * 8 + self.col
    }

    /// Step one cell in direction `(dx, dy)`, where `dx` moves along the
    /// columns and `dy` along the rows. `None` once the edge is crossed.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let col = self.col as i8 + dx;
        let row = self.row as i8 + dy;
        if col < 0 || col >= 8 || row < 0 || row >= 8 {
            None
        } else {
            Some(Location { row: row as u8, col: col as u8 })
        }
    }

    /// Parse a protocol token such as `"C4"` (row C, column 4)
    pub fn from_token(token: &str) -> Result<Self, ParseError> {
        let bytes = token.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseError::Length(token.to_string()));
        }
        let (row_ch, col_ch) = (bytes[0], bytes[1]);
        if !(b'A'..=b'H').contains(&row_ch) {
            return Err(ParseError::Row(row_ch as char));
        }
        if !(b'1'..=b'8').contains(&col_ch) {
            return Err(ParseError::Column(col_ch as char));
        }
        Ok(Location { row: row_ch - b'A', col: col_ch - b'1' })
    }

    /// Encode as a protocol token
    pub fn to_token(self) -> String {
        let row = (b'A' + self.row) as char;
        let col = (b'1' + self.col) as char;
        format!("{}{}", row, col)
    }
}

impl FromStr for Location {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::from_token(s)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_token())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_token())
    }
}

/// A stone of `player` being put down at `location`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub location: Location,
    pub player: Color,
}

impl Placement {
    #[inline]
    pub const fn new(location: Location, player: Color) -> Self {
        Placement { location, player }
    }
}

/// A fixed-capacity list of locations, large enough for every cell
#[derive(Clone)]
pub struct MoveList {
    moves: [Location; 64],
    len: usize,
}

impl MoveList {
    #[inline]
    pub fn new() -> Self {
        MoveList {
            moves: [Location::default(); 64],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, loc: Location) {
        debug_assert!(self.len < 64);
        self.moves[self.len] = loc;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Location> {
        self.as_slice().get(index).copied()
    }

    #[inline]
    pub fn contains(&self, loc: Location) -> bool {
        self.as_slice().contains(&loc)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Location] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.as_slice().iter()
    }

    pub fn to_vec(&self) -> Vec<Location> {
        self.as_slice().to_vec()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Location;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
