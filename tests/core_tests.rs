//! Board and move tests
//!
//! These tests check the board invariants over whole random games.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use reversi_mcts::core::board::{Board, Color, MAX_MOVES};
use reversi_mcts::core::moves::{Location, Placement};
use reversi_mcts::engine::movegen::MoveGen;

fn loc(token: &str) -> Location {
    Location::from_token(token).unwrap()
}

fn random_game(seed: u64) -> Vec<Location> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::initial();
    let mut played = Vec::new();
    while !board.is_terminal() {
        let moves = MoveGen::legal_moves(&board);
        let mv = *moves.as_slice().choose(&mut rng).unwrap();
        board.play(mv);
        played.push(mv);
    }
    played
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_stone_count_tracks_move_count() {
    for seed in 0..20 {
        let mut board = Board::initial();
        assert_eq!(board.occupied().count(), 4);
        for mv in random_game(seed) {
            board.play(mv);
            assert_eq!(board.occupied().count(), board.move_count() as u32 + 4);
            assert!((board.color_bits() & !board.occupied()).is_empty());
            assert_eq!(
                board.stone_count(Color::Black) + board.stone_count(Color::White),
                board.occupied().count()
            );
        }
        assert_eq!(board.move_count(), MAX_MOVES);
        assert!(board.is_terminal());
    }
}

#[test]
fn test_players_alternate_every_placement() {
    let mut board = Board::initial();
    for mv in random_game(3) {
        let before = board.current_player();
        board.play(mv);
        assert_eq!(board.current_player(), before.opposite());
    }
}

#[test]
fn test_clone_replays_identically() {
    let moves = random_game(11);
    let mut original = Board::initial();
    original.play(moves[0]);
    let mut copy = original;

    for &mv in &moves[1..] {
        original.play(mv);
        copy.play(mv);
    }
    assert_eq!(original, copy);
    assert_eq!(original.occupied(), copy.occupied());
    assert_eq!(original.color_bits(), copy.color_bits());
    assert_eq!(original.move_count(), copy.move_count());
    assert_eq!(original.current_player(), copy.current_player());
}

#[test]
fn test_clone_is_independent() {
    let original = Board::initial();
    let mut copy = original;
    copy.play(loc("D6"));
    assert_eq!(original.move_count(), 0);
    assert_eq!(original.color_at(loc("D5")), Some(Color::Black));
    assert_eq!(copy.color_at(loc("D5")), Some(Color::White));
}

#[test]
#[should_panic(expected = "occupied")]
fn test_place_on_occupied_cell_is_rejected() {
    let mut board = Board::initial();
    board.play(loc("E4"));
}

// ============================================================================
// Capture rule
// ============================================================================

#[test]
fn test_capture_flips_whole_run_up_to_farthest_anchor() {
    let mut board = Board::initial();
    board.place(Placement::new(loc("E3"), Color::White)); // E4 turns white
    board.place(Placement::new(loc("E2"), Color::Black)); // E2 black, no capture
    board.place(Placement::new(loc("E6"), Color::Black));
    // E6 looks left along row E: E5 w, E4 w, E3 w, E2 b -> three stones flip
    for token in ["E2", "E3", "E4", "E5", "E6"] {
        assert_eq!(board.color_at(loc(token)), Some(Color::Black), "{}", token);
    }
}

#[test]
fn test_capture_needs_opposing_stone_before_anchor() {
    let mut board = Board::initial();
    board.place(Placement::new(loc("E3"), Color::White));
    // Row E now reads: E3 w, E4 w, E5 w. White at E6 has no black to take
    assert!(!board.can_capture(Placement::new(loc("E6"), Color::White)));
    assert!(!board.can_capture(Placement::new(loc("E6"), Color::Black)));
}

#[test]
fn test_winner_needs_more_than_half() {
    let mut board = Board::initial();
    for mv in random_game(5) {
        board.play(mv);
    }
    let black = board.stone_count(Color::Black);
    let white = board.stone_count(Color::White);
    match board.winner() {
        Some(Color::Black) => assert!(black > 32),
        Some(Color::White) => assert!(white > 32),
        None => assert_eq!((black, white), (32, 32)),
    }
}
