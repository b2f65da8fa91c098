//! Reversi board representation
//!
//! The position is two bitboards: `occupied` marks cells holding a stone and
//! `colors` marks which of those stones are black. A bit in `colors` is only
//! meaningful where the matching `occupied` bit is set, and is kept clear
//! everywhere else.

use super::bitboard::Bitboard;
use super::moves::{Location, Placement};
use std::fmt;

/// Number of placements after which the board is full
pub const MAX_MOVES: u8 = 60;

/// Stones a colour must hold to win; 32-32 is a draw
pub const WIN_THRESHOLD: u32 = 32;

/// Reward credited to the perspective colour for a won game
pub const WIN_REWARD: f64 = 2.0;

/// Compass directions as (dx, dy) column/row steps
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Stone color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// The Reversi board state
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    occupied: Bitboard,
    colors: Bitboard,
    current_player: Color,
    move_count: u8,
}

impl Board {
    /// The opening position: four centre stones, White to move
    pub fn initial() -> Self {
        let mut board = Board {
            occupied: Bitboard::EMPTY,
            colors: Bitboard::EMPTY,
            current_player: Color::White,
            move_count: 0,
        };
        board.put(Location::from_index(3 * 8 + 3), Color::White);
        board.put(Location::from_index(4 * 8 + 4), Color::White);
        board.put(Location::from_index(4 * 8 + 3), Color::Black);
        board.put(Location::from_index(3 * 8 + 4), Color::Black);
        board
    }

    /// Set a stone without flipping anything or advancing the turn
    fn put(&mut self, loc: Location, color: Color) {
        let idx = loc.index();
        self.occupied.set(idx);
        match color {
            Color::Black => self.colors.set(idx),
            Color::White => self.colors.clear(idx),
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Raw colour bits (set = black); only meaningful under `occupied`
    #[inline]
    pub fn color_bits(&self) -> Bitboard {
        self.colors
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    #[inline]
    pub fn is_occupied(&self, loc: Location) -> bool {
        self.occupied.contains(loc.index())
    }

    /// Colour of the stone at `loc`, or `None` for an empty cell
    #[inline]
    pub fn color_at(&self, loc: Location) -> Option<Color> {
        if !self.is_occupied(loc) {
            None
        } else if self.colors.contains(loc.index()) {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    /// Bitboard of all stones of one colour
    #[inline]
    pub fn stones(&self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.colors & self.occupied,
            Color::White => !self.colors & self.occupied,
        }
    }

    #[inline]
    pub fn stone_count(&self, color: Color) -> u32 {
        self.stones(color).count()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.move_count >= MAX_MOVES
    }

    /// Whether placing here would turn at least one stone over.
    ///
    /// Walks each direction through the contiguous run of stones next to the
    /// placement and succeeds as soon as a stone of the placing colour shows
    /// up after at least one opposing stone.
    pub fn can_capture(&self, placement: Placement) -> bool {
        DIRECTIONS.iter().any(|&(dx, dy)| {
            let mut seen_opponent = false;
            let mut cursor = placement.location.offset(dx, dy);
            while let Some(loc) = cursor {
                match self.color_at(loc) {
                    None => break,
                    Some(c) if c == placement.player => {
                        if seen_opponent {
                            return true;
                        }
                    }
                    Some(_) => seen_opponent = true,
                }
                cursor = loc.offset(dx, dy);
            }
            false
        })
    }

    /// Put a stone down, turn over captured stones and pass the turn.
    ///
    /// In every direction the farthest stone of the placing colour reachable
    /// through an unbroken run of stones is the anchor; everything strictly
    /// between the placement and the anchor takes the placing colour.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already occupied.
    pub fn place(&mut self, placement: Placement) {
        let origin = placement.location;
        assert!(
            !self.is_occupied(origin),
            "place on occupied cell {}",
            origin
        );

        let mut flips = Bitboard::EMPTY;
        for &(dx, dy) in DIRECTIONS.iter() {
            let mut run = Bitboard::EMPTY;
            let mut captured = Bitboard::EMPTY;
            let mut cursor = origin.offset(dx, dy);
            while let Some(loc) = cursor {
                if !self.is_occupied(loc) {
                    break;
                }
                if self.color_at(loc) == Some(placement.player) {
                    captured = run;
                }
                run.set(loc.index());
                cursor = loc.offset(dx, dy);
            }
            flips |= captured;
        }

        self.put(origin, placement.player);
        match placement.player {
            Color::Black => self.colors |= flips,
            Color::White => self.colors &= !flips,
        }
        self.move_count += 1;
        self.current_player = self.current_player.opposite();
    }

    /// Place a stone of the side to move
    #[inline]
    pub fn play(&mut self, loc: Location) {
        self.place(Placement::new(loc, self.current_player));
    }

    /// Winner of a finished (or hypothetically finished) game
    pub fn winner(&self) -> Option<Color> {
        if self.stone_count(Color::Black) > WIN_THRESHOLD {
            Some(Color::Black)
        } else if self.stone_count(Color::White) > WIN_THRESHOLD {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Rollout reward for `perspective`: `WIN_REWARD` for a win, zero for a
    /// loss or a draw
    pub fn reward_for(&self, perspective: Color) -> f64 {
        if self.stone_count(perspective) > WIN_THRESHOLD {
            WIN_REWARD
        } else {
            0.0
        }
    }

    /// Rendering that marks empty capturing cells for the side to move with `#`
    pub fn render_with_hints(&self) -> String {
        self.render(true)
    }

    fn render(&self, hints: bool) -> String {
        let mut out = String::with_capacity(8 * 9);
        for idx in 0..64u8 {
            let loc = Location::from_index(idx);
            let ch = match self.color_at(loc) {
                Some(color) => color.to_char(),
                None if hints && self.can_capture(Placement::new(loc, self.current_player)) => '#',
                None => '.',
            };
            out.push(ch);
            if loc.col() == 7 {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ to_move: {}, moves: {}, black: {}, white: {} }}",
            self.current_player,
            self.move_count,
            self.stone_count(Color::Black),
            self.stone_count(Color::White)
        )?;
        write!(f, "{}", self.render_with_hints())
    }
}
