pub mod core;
pub mod engine;
pub mod error;
pub mod logging;
pub mod protocol;

pub use crate::core::{Board, Color, Location, Placement};
pub use crate::engine::search::{SearchConfig, Searcher};
pub use crate::engine::MoveGen;
pub use error::{GameError, ParseError, SearchError};
pub use protocol::GameLoop;
