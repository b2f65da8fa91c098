//! Legal move generation
//!
//! Moves for the side to move are the empty cells where a stone would
//! capture. When no such cell exists the side to move does not pass: it may
//! instead drop a stone on any empty cell touching the existing stones. Both
//! sets are produced in row-major order.

use crate::core::bitboard::Bitboard;
use crate::core::board::{Board, Color};
use crate::core::moves::{Location, MoveList, Placement};

pub struct MoveGen;

impl MoveGen {
    /// Legal moves for `board.current_player()`
    pub fn legal_moves(board: &Board) -> MoveList {
        let mut moves = MoveList::new();
        Self::legal_moves_into(board, &mut moves);
        moves
    }

    /// Same as [`MoveGen::legal_moves`] but reuses the caller's list
    pub fn legal_moves_into(board: &Board, moves: &mut MoveList) {
        moves.clear();
        if board.is_terminal() {
            return;
        }

        let mut targets = Self::capturing_moves(board, board.current_player());
        if targets.is_empty() {
            targets = Self::frontier(board);
        }
        for idx in targets.iter() {
            moves.push(Location::from_index(idx));
        }
    }

    /// Empty cells where `color` would capture, regardless of whose turn it is
    pub fn capturing_moves(board: &Board, color: Color) -> Bitboard {
        let mut captures = Bitboard::EMPTY;
        for idx in Self::empty_cells(board).iter() {
            if board.can_capture(Placement::new(Location::from_index(idx), color)) {
                captures.set(idx);
            }
        }
        captures
    }

    #[inline]
    pub fn empty_cells(board: &Board) -> Bitboard {
        !board.occupied()
    }

    /// Empty cells 8-adjacent to at least one stone
    #[inline]
    pub fn frontier(board: &Board) -> Bitboard {
        board.occupied().neighbours() & !board.occupied()
    }

    /// Count leaf positions `depth` plies ahead, for move generator checks
    pub fn perft(board: &Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = Self::legal_moves(board);
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .iter()
            .map(|&loc| {
                let mut next = *board;
                next.play(loc);
                Self::perft(&next, depth - 1)
            })
            .sum()
    }
}
