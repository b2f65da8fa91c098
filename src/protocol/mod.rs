//! Line protocol
//!
//! This module drives a single game over a text stream: the opponent's moves
//! come in as two-character tokens, the engine's replies go out one per line.

pub mod game_loop;

pub use game_loop::{GameConfig, GameLoop, START_TOKEN};
