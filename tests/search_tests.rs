use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::cell::Cell;
use std::time::{Duration, Instant};

use reversi_mcts::core::board::{Board, Color};
use reversi_mcts::engine::movegen::MoveGen;
use reversi_mcts::engine::search::{Clock, SearchConfig, Searcher, Strategy};

/// Clock that moves forward by `step` every time it is read
struct StepClock {
    base: Instant,
    step: Duration,
    reads: Cell<u32>,
}

impl StepClock {
    fn new(step: Duration) -> Self {
        StepClock {
            base: Instant::now(),
            step,
            reads: Cell::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Instant {
        let n = self.reads.get();
        self.reads.set(n + 1);
        self.base + self.step * n
    }
}

fn config(seed: u64) -> SearchConfig {
    SearchConfig {
        seed: Some(seed),
        poll_interval: 10,
        ..Default::default()
    }
}

#[test]
fn test_expired_deadline_still_finds_move() {
    let board = Board::initial();
    let mut searcher = Searcher::new(board, Color::White, config(1));
    let stats = searcher.run(Instant::now());
    assert_eq!(stats.iterations, 1);
    let mv = searcher.best_move().unwrap();
    assert!(MoveGen::legal_moves(&board).contains(mv));
}

#[test]
fn test_deadline_polled_once_per_batch() {
    let clock = StepClock::new(Duration::from_millis(1));
    let base = clock.base;
    let mut searcher = Searcher::with_clock(Board::initial(), Color::White, config(2), clock);
    // Read 0 is the start, read 1 follows iteration 1, read 2 follows iteration 11
    let stats = searcher.run(base + Duration::from_millis(2));
    assert_eq!(stats.iterations, 11);
}

#[test]
fn test_deadline_hit_after_first_iteration() {
    let clock = StepClock::new(Duration::from_millis(1));
    let base = clock.base;
    let mut searcher = Searcher::with_clock(Board::initial(), Color::White, config(3), clock);
    let stats = searcher.run(base + Duration::from_millis(1));
    assert_eq!(stats.iterations, 1);
}

#[test]
fn test_best_move_is_root_child_and_legal() {
    let mut searcher = Searcher::new(Board::initial(), Color::White, config(4));
    let mut board = Board::initial();
    for _ in 0..10 {
        searcher.run_iterations(200);
        let mv = searcher.best_move().unwrap();
        let tree = searcher.tree();
        assert!(tree.child_with_move(tree.root(), mv).is_some());
        assert!(MoveGen::legal_moves(&board).contains(mv));
        searcher.advance(mv).unwrap();
        board.play(mv);
    }
}

#[test]
fn test_best_move_is_most_visited() {
    let mut searcher = Searcher::new(Board::initial(), Color::White, config(5));
    searcher.run_iterations(1000);
    let tree = searcher.tree();
    let best = searcher.best_move().unwrap();
    let best_visits = tree.get(tree.child_with_move(tree.root(), best).unwrap()).visits;
    for &child in &tree.get(tree.root()).children {
        assert!(tree.get(child).visits <= best_visits);
    }
}

#[test]
fn test_search_grows_below_root() {
    let mut searcher = Searcher::new(Board::initial(), Color::White, config(6));
    let stats = searcher.run_iterations(2000).clone();
    assert_eq!(stats.iterations, 2000);
    assert_eq!(stats.nodes_created as usize + 1, searcher.tree().len());
    assert!(stats.max_depth > 2);
}

#[test]
fn test_seeded_search_is_reproducible() {
    let mut a = Searcher::new(Board::initial(), Color::White, config(7));
    let mut b = Searcher::new(Board::initial(), Color::White, config(7));
    a.run_iterations(500);
    b.run_iterations(500);
    assert_eq!(a.best_move(), b.best_move());
    assert_eq!(a.tree().len(), b.tree().len());
}

#[test]
fn test_terminal_root_returns_no_move() {
    let mut board = Board::initial();
    while !board.is_terminal() {
        board.play(MoveGen::legal_moves(&board)[0]);
    }
    let mut searcher = Searcher::new(board, Color::White, config(8));
    let stats = searcher.run(Instant::now());
    assert_eq!(stats.iterations, 0);
    assert_eq!(searcher.best_move(), None);
}

#[test]
fn test_last_move_search() {
    let mut board = Board::initial();
    for _ in 0..59 {
        board.play(MoveGen::legal_moves(&board)[0]);
    }
    let mut searcher = Searcher::new(board, board.current_player(), config(9));
    searcher.run_iterations(20);
    let mv = searcher.best_move().unwrap();
    assert_eq!(MoveGen::legal_moves(&board).as_slice(), &[mv]);
}

// ============================================================================
// Reward Perspective
// ============================================================================

/// Random game stopped one ply before the end, whose last move decides a winner
fn decided_last_ply() -> (Board, Board) {
    for seed in 0.. {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::initial();
        for _ in 0..59 {
            let mv = *MoveGen::legal_moves(&board).as_slice().choose(&mut rng).unwrap();
            board.play(mv);
        }
        let mut last = board;
        last.play(MoveGen::legal_moves(&board)[0]);
        if last.winner().is_some() {
            return (board, last);
        }
    }
    unreachable!()
}

#[test]
fn test_backpropagated_reward_belongs_to_perspective() {
    let (board, finished) = decided_last_ply();
    for perspective in [Color::Black, Color::White] {
        let mut searcher = Searcher::new(board, perspective, config(12));
        searcher.run_iterations(8);
        let tree = searcher.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.visits, 8);
        assert_eq!(root.reward, 8.0 * finished.reward_for(perspective), "{}", perspective);
    }
}

#[test]
fn test_search_beats_random_player() {
    let games = 10;
    let mut wins = 0;
    for game in 0..games {
        let engine = if game % 2 == 0 { Color::White } else { Color::Black };
        let mut opponent_rng = StdRng::seed_from_u64(100 + game);
        let mut board = Board::initial();
        let mut searcher = Searcher::new(board, engine, config(200 + game));

        while !board.is_terminal() {
            let mv = if board.current_player() == engine {
                searcher.run_iterations(200);
                searcher.best_move().unwrap()
            } else {
                *MoveGen::legal_moves(&board)
                    .as_slice()
                    .choose(&mut opponent_rng)
                    .unwrap()
            };
            searcher.advance(mv).unwrap();
            board.play(mv);
        }

        if board.winner() == Some(engine) {
            wins += 1;
        }
    }
    assert!(wins >= 8, "engine won {}/{} against random play", wins, games);
}

// ============================================================================
// Flat Monte Carlo
// ============================================================================

#[test]
fn test_flat_strategy_stays_one_ply_deep() {
    let mut searcher = Searcher::new(
        Board::initial(),
        Color::White,
        SearchConfig {
            strategy: Strategy::Flat,
            ..config(10)
        },
    );
    searcher.run_iterations(400);
    let tree = searcher.tree();
    let root = tree.get(tree.root());
    assert_eq!(root.visits, 400);
    assert_eq!(root.children.len(), 4);
    assert_eq!(tree.len(), 5);
    for &child in &root.children {
        assert!(tree.get(child).children.is_empty());
    }
}

#[test]
fn test_flat_strategy_picks_highest_reward() {
    let mut searcher = Searcher::new(
        Board::initial(),
        Color::White,
        SearchConfig {
            strategy: Strategy::Flat,
            ..config(11)
        },
    );
    searcher.run_iterations(400);
    let tree = searcher.tree();
    let best = searcher.best_move().unwrap();
    let best_reward = tree.get(tree.child_with_move(tree.root(), best).unwrap()).reward;
    for &child in &tree.get(tree.root()).children {
        assert!(tree.get(child).reward <= best_reward);
    }
}
