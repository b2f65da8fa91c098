//! Error types shared across the crate.

use crate::core::moves::Location;
use thiserror::Error;

/// A move token that does not name a board cell
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("move token {0:?} must be exactly two characters")]
    Length(String),

    #[error("row {0:?} is outside 'A'..='H'")]
    Row(char),

    #[error("column {0:?} is outside '1'..='8'")]
    Column(char),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The move is not a successor of the current root position
    #[error("move {0} is not playable from the current root")]
    MoveNotInTree(Location),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed move: {0}")]
    Parse(#[from] ParseError),

    #[error("protocol violation: {0}")]
    Search(#[from] SearchError),

    #[error("input ended before the game was over")]
    UnexpectedEof,

    #[error("game is already over")]
    GameOver,
}
