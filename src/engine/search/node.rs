//! Search tree node representation.

use crate::core::board::Color;
use crate::core::moves::{Location, MoveList};

/// Index into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One explored position.
///
/// `reward` is always accumulated from the tree's perspective colour, no
/// matter whose turn it is at this node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE for the root)
    pub parent: NodeId,
    /// Move that led here from the parent (None for the initial root)
    pub mv: Option<Location>,
    /// Colour that played `mv`
    pub mover: Color,
    /// Legal moves from this position not yet expanded into children
    pub untried: Vec<Location>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    pub reward: f64,
}

impl Node {
    pub fn new_root(legal: &MoveList, to_move: Color) -> Self {
        Self {
            parent: NodeId::NONE,
            mv: None,
            // Nobody moved into the root; the previous mover is the other side
            mover: to_move.opposite(),
            untried: legal.to_vec(),
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
        }
    }

    pub fn new_child(parent: NodeId, mv: Location, mover: Color, legal: &MoveList) -> Self {
        Self {
            parent,
            mv: Some(mv),
            mover,
            untried: legal.to_vec(),
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Average reward scaled to a win rate in [0, 1]
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / (crate::core::board::WIN_REWARD * self.visits as f64)
        }
    }
}
