//! Search: Monte Carlo tree search with UCT selection and tree reuse.

mod clock;
mod node;
mod rollout;
mod searcher;
mod tree;
mod types;
mod uct;

pub use clock::{Clock, SystemClock};
pub use node::{Node, NodeId};
pub use rollout::random_playout;
pub use searcher::Searcher;
pub use tree::SearchTree;
pub use types::{SearchConfig, SearchStats, Strategy, DEFAULT_EXPLORATION, POLL_INTERVAL};
pub use uct::uct_score;
