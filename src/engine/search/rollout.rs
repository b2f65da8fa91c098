//! Random playouts.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::core::board::Board;
use crate::core::moves::MoveList;
use crate::engine::movegen::MoveGen;

/// Play uniformly random legal moves on `board` until the game is over.
/// Returns the number of plies played.
pub fn random_playout(board: &mut Board, rng: &mut StdRng) -> u32 {
    let mut moves = MoveList::new();
    let mut plies = 0;
    while !board.is_terminal() {
        MoveGen::legal_moves_into(board, &mut moves);
        match moves.as_slice().choose(rng) {
            Some(&mv) => board.play(mv),
            None => break,
        }
        plies += 1;
    }
    plies
}
