//! Core Reversi types and representations
//!
//! This module contains the fundamental building blocks of the engine:
//! - Bitboard representation
//! - Board state and the capture rule
//! - Locations, placements and the move-token codec

pub mod bitboard;
pub mod board;
pub mod moves;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, Color, DIRECTIONS, MAX_MOVES, WIN_REWARD, WIN_THRESHOLD};
pub use moves::{Location, MoveList, Placement};
