//! Searcher: iteration driver, deadline polling, and search entry point.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use std::time::{Duration, Instant};

use crate::core::board::{Board, Color};
use crate::core::moves::Location;
use crate::error::SearchError;

use super::clock::{Clock, SystemClock};
use super::node::NodeId;
use super::rollout::random_playout;
use super::tree::SearchTree;
use super::types::{SearchConfig, SearchStats, Strategy};

pub struct Searcher<C: Clock = SystemClock> {
    tree: SearchTree,
    config: SearchConfig,
    rng: StdRng,
    stats: SearchStats,
    clock: C,
}

impl Searcher<SystemClock> {
    pub fn new(root_state: Board, perspective: Color, config: SearchConfig) -> Self {
        Self::with_clock(root_state, perspective, config, SystemClock)
    }
}

impl<C: Clock> Searcher<C> {
    pub fn with_clock(root_state: Board, perspective: Color, config: SearchConfig, clock: C) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Searcher {
            tree: SearchTree::new(root_state, perspective),
            rng: StdRng::seed_from_u64(seed),
            config,
            stats: SearchStats::default(),
            clock,
        }
    }

    /// Drop the whole tree and start over from `root_state`
    pub fn reset(&mut self, root_state: Board, perspective: Color) {
        self.tree = SearchTree::new(root_state, perspective);
        self.stats = SearchStats::default();
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    #[inline]
    pub fn root_state(&self) -> &Board {
        self.tree.root_state()
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Commit a move played in the real game, keeping the matching subtree
    pub fn advance(&mut self, mv: Location) -> Result<(), SearchError> {
        self.tree.advance(mv)
    }

    /// Search until the clock passes `deadline`.
    ///
    /// The clock is read after the first iteration and then once every
    /// `poll_interval` iterations, so at least one iteration always runs and
    /// the deadline may be overrun by up to one batch.
    pub fn run(&mut self, deadline: Instant) -> &SearchStats {
        let start = self.clock.now();
        self.stats = SearchStats::default();
        if self.tree.root_state().is_terminal() {
            return &self.stats;
        }

        let poll = u64::from(self.config.poll_interval.max(1));
        loop {
            self.iterate();
            if (self.stats.iterations - 1) % poll == 0 && self.clock.now() >= deadline {
                break;
            }
        }

        self.stats.elapsed = self.clock.now().saturating_duration_since(start);
        self.log_summary();
        &self.stats
    }

    /// Search for `budget` from now
    pub fn run_for(&mut self, budget: Duration) -> &SearchStats {
        let deadline = self.clock.now() + budget;
        self.run(deadline)
    }

    /// Run exactly `count` iterations, ignoring the clock
    pub fn run_iterations(&mut self, count: u64) -> &SearchStats {
        self.stats = SearchStats::default();
        if self.tree.root_state().is_terminal() {
            return &self.stats;
        }
        for _ in 0..count {
            self.iterate();
        }
        &self.stats
    }

    /// One select / expand / simulate / backpropagate pass
    pub fn iterate(&mut self) {
        match self.config.strategy {
            Strategy::Uct => self.iterate_uct(),
            Strategy::Flat => self.iterate_flat(),
        }
        self.stats.iterations += 1;
    }

    fn iterate_uct(&mut self) {
        let mut board = *self.tree.root_state();
        let mut cursor = self.tree.root();
        let mut depth = 0;

        while self.tree.get(cursor).is_fully_expanded() && !self.tree.get(cursor).is_leaf() {
            let Some(next) = self.tree.select_child(cursor, self.config.exploration) else {
                break;
            };
            if let Some(mv) = self.tree.get(next).mv {
                board.play(mv);
            }
            cursor = next;
            depth += 1;
        }

        if !board.is_terminal() {
            let untried = self.tree.get(cursor).untried.len();
            if let Some(index) = (0..untried).choose(&mut self.rng) {
                cursor = self.tree.expand_at(cursor, index, &mut board);
                self.stats.nodes_created += 1;
                depth += 1;
            }
        }

        self.simulate_and_backpropagate(cursor, board);
        self.stats.max_depth = self.stats.max_depth.max(depth);
    }

    /// Flat Monte Carlo: one uniformly random root move, then a random game
    fn iterate_flat(&mut self) {
        let mut board = *self.tree.root_state();
        let root = self.tree.root();
        let expanded = self.tree.get(root).children.len();
        let untried = self.tree.get(root).untried.len();

        let Some(pick) = (0..expanded + untried).choose(&mut self.rng) else {
            return;
        };
        let child: NodeId = if pick < expanded {
            let id = self.tree.get(root).children[pick];
            if let Some(mv) = self.tree.get(id).mv {
                board.play(mv);
            }
            id
        } else {
            self.stats.nodes_created += 1;
            self.tree.expand_at(root, pick - expanded, &mut board)
        };

        self.simulate_and_backpropagate(child, board);
        self.stats.max_depth = self.stats.max_depth.max(1);
    }

    fn simulate_and_backpropagate(&mut self, leaf: NodeId, mut board: Board) {
        random_playout(&mut board, &mut self.rng);
        let reward = board.reward_for(self.tree.perspective());
        self.tree.backpropagate(leaf, reward);
    }

    /// Move to play after a search: the most visited root child under UCT,
    /// the most rewarded one under flat Monte Carlo.
    pub fn best_move(&self) -> Option<Location> {
        let child = match self.config.strategy {
            Strategy::Uct => self.tree.most_visited_child(),
            Strategy::Flat => self.tree.most_rewarded_child(),
        }?;
        self.tree.get(child).mv
    }

    fn log_summary(&self) {
        let root = self.tree.get(self.tree.root());
        let best = self
            .tree
            .most_visited_child()
            .map(|id| self.tree.get(id));
        match best {
            Some(node) => debug!(
                "{} iterations in {} ms, {} new nodes, depth {}, tree {} nodes, root visits {}, best {:?} ({} visits, win rate {:.3})",
                self.stats.iterations,
                self.stats.elapsed.as_millis(),
                self.stats.nodes_created,
                self.stats.max_depth,
                self.tree.len(),
                root.visits,
                node.mv,
                node.visits,
                node.win_rate()
            ),
            None => debug!(
                "{} iterations in {} ms, root has no children",
                self.stats.iterations,
                self.stats.elapsed.as_millis()
            ),
        }
    }
}
