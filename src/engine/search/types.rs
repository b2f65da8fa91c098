//! Search configuration, stats, and constants.

use std::time::Duration;

/// Default clock polling period, in iterations
pub const POLL_INTERVAL: u32 = 500;

/// Default UCT exploration constant
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// How iterations choose the line to simulate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Full tree search with UCT selection
    #[default]
    Uct,
    /// Flat Monte Carlo: a uniformly random root move per playout, the
    /// final choice goes to the root move with the most accumulated reward
    Flat,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Weight of the exploration term in the UCT score
    pub exploration: f64,
    /// Iterations between clock checks
    pub poll_interval: u32,
    pub strategy: Strategy,
    /// Fixed RNG seed for reproducible searches
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: DEFAULT_EXPLORATION,
            poll_interval: POLL_INTERVAL,
            strategy: Strategy::default(),
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub iterations: u64,
    pub nodes_created: u64,
    pub max_depth: u32,
    pub elapsed: Duration,
}
