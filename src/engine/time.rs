//! Per-move time allocation.

use std::time::Duration;

use crate::core::board::{Board, MAX_MOVES};

/// Budget for a single move when no game clock is given
pub const DEFAULT_MOVE_TIME: Duration = Duration::from_millis(100);

/// Plies counted as mid-game, where moves get extra time
const MIDGAME: std::ops::Range<u8> = 20..44;

#[derive(Clone, Debug)]
pub struct TimeControl {
    /// Fixed budget per move, used when `total` is not set
    pub move_time: Duration,
    /// Total thinking time for the whole game
    pub total: Option<Duration>,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self {
            move_time: DEFAULT_MOVE_TIME,
            total: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TimeManager {
    control: TimeControl,
    used: Duration,
}

impl TimeManager {
    pub fn new(control: TimeControl) -> Self {
        TimeManager {
            control,
            used: Duration::ZERO,
        }
    }

    /// Time left on the game clock, if there is one
    pub fn remaining(&self) -> Option<Duration> {
        self.control.total.map(|t| t.saturating_sub(self.used))
    }

    pub fn record(&mut self, spent: Duration) {
        self.used += spent;
    }

    /// Budget for the move about to be made from `board`.
    ///
    /// With a game clock the remaining time is split evenly over our moves
    /// still to come, mid-game moves get half as much again, and no move may
    /// take more than half of what is left.
    pub fn allocate(&self, board: &Board) -> Duration {
        let Some(remaining) = self.remaining() else {
            return self.control.move_time;
        };
        let plies_left = MAX_MOVES.saturating_sub(board.move_count()) as u32;
        let own_moves = plies_left.div_ceil(2).max(1);
        let mut budget = remaining / own_moves;
        if MIDGAME.contains(&board.move_count()) {
            budget = budget * 3 / 2;
        }
        budget.min(remaining / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::movegen::MoveGen;

    fn board_after(plies: usize) -> Board {
        let mut board = Board::initial();
        for _ in 0..plies {
            let mv = MoveGen::legal_moves(&board)[0];
            board.play(mv);
        }
        board
    }

    #[test]
    fn test_fixed_move_time_without_clock() {
        let tm = TimeManager::default();
        assert_eq!(tm.allocate(&Board::initial()), DEFAULT_MOVE_TIME);
        assert_eq!(tm.remaining(), None);
    }

    #[test]
    fn test_opening_split_over_own_moves() {
        let tm = TimeManager::new(TimeControl {
            total: Some(Duration::from_secs(30)),
            ..Default::default()
        });
        assert_eq!(tm.allocate(&Board::initial()), Duration::from_secs(1));
    }

    #[test]
    fn test_midgame_gets_more_time() {
        let tm = TimeManager::new(TimeControl {
            total: Some(Duration::from_secs(30)),
            ..Default::default()
        });
        // 30 plies left -> 15 own moves -> 2s, boosted to 3s
        assert_eq!(tm.allocate(&board_after(30)), Duration::from_secs(3));
    }

    #[test]
    fn test_never_more_than_half_remaining() {
        let mut tm = TimeManager::new(TimeControl {
            total: Some(Duration::from_secs(10)),
            ..Default::default()
        });
        tm.record(Duration::from_secs(8));
        let board = board_after(59);
        assert_eq!(tm.allocate(&board), Duration::from_secs(1));
    }
}
