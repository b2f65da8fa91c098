//! Bitboard representation and operations
//!
//! A bitboard is a 64-bit integer where each bit represents one cell of the
//! 8x8 Reversi board. Bit `row * 8 + col` is cell (row, col), so iterating
//! set bits from the least significant end visits cells in row-major order.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A 64-bit bitboard representing cells on the Reversi board
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    // Column masks used to stop horizontal shifts wrapping into the next row
    pub const FIRST_COL: Bitboard = Bitboard(0x0101010101010101);
    pub const LAST_COL: Bitboard = Bitboard(0x8080808080808080);

    /// The four centre cells holding the opening stones
    pub const CENTER: Bitboard = Bitboard(0x0000001818000000);

    /// Create a new bitboard from a raw u64 value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Bitboard(value)
    }

    /// Create a bitboard with a single bit set at the given cell index (0-63)
    #[inline]
    pub const fn from_index(idx: u8) -> Self {
        Bitboard(1u64 << idx)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count the number of set bits (population count)
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Index of the least significant set bit
    #[inline]
    pub const fn lsb(self) -> u8 {
        self.0.trailing_zeros() as u8
    }

    /// Pop the least significant bit and return its index
    #[inline]
    pub fn pop_lsb(&mut self) -> u8 {
        let idx = self.lsb();
        self.0 &= self.0 - 1;
        idx
    }

    #[inline]
    pub const fn contains(self, idx: u8) -> bool {
        (self.0 & (1u64 << idx)) != 0
    }

    #[inline]
    pub fn set(&mut self, idx: u8) {
        self.0 |= 1u64 << idx;
    }

    #[inline]
    pub fn clear(&mut self, idx: u8) {
        self.0 &= !(1u64 << idx);
    }

    /// Shift every cell one row down (row + 1)
    #[inline]
    pub const fn down(self) -> Self {
        Bitboard(self.0 << 8)
    }

    /// Shift every cell one row up (row - 1)
    #[inline]
    pub const fn up(self) -> Self {
        Bitboard(self.0 >> 8)
    }

    /// Shift every cell one column right (col + 1)
    #[inline]
    pub const fn right(self) -> Self {
        Bitboard((self.0 << 1) & !Self::FIRST_COL.0)
    }

    /// Shift every cell one column left (col - 1)
    #[inline]
    pub const fn left(self) -> Self {
        Bitboard((self.0 >> 1) & !Self::LAST_COL.0)
    }

    /// All cells 8-adjacent to at least one cell of `self`, excluding `self`
    pub const fn neighbours(self) -> Self {
        let horizontal = Bitboard(self.0 | self.left().0 | self.right().0);
        let spread = horizontal.0 | horizontal.up().0 | horizontal.down().0;
        Bitboard(spread & !self.0)
    }

    /// Iterate over all set bits, lowest index first
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over set bits in a bitboard
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "    1 2 3 4 5 6 7 8")?;
        for row in 0..8u8 {
            write!(f, "  {} ", (b'A' + row) as char)?;
            for col in 0..8u8 {
                if self.contains(row * 8 + col) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
