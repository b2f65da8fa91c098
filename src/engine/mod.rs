//! Engine components
//!
//! - Legal move generation
//! - Monte Carlo tree search
//! - Per-move time allocation

pub mod movegen;
pub mod search;
pub mod time;

pub use movegen::MoveGen;
pub use search::{SearchConfig, SearchStats, SearchTree, Searcher, Strategy};
pub use time::{TimeControl, TimeManager};
