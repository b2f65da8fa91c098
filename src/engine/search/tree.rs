//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by `NodeId`.
//! The tree tracks the real game position at its root; committing a move
//! promotes the matching child to root and compacts the arena so that only
//! the promoted subtree survives.

use log::debug;

use crate::core::board::{Board, Color};
use crate::core::moves::Location;
use crate::engine::movegen::MoveGen;
use crate::error::SearchError;

use super::node::{Node, NodeId};
use super::uct::uct_score;

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    root: NodeId,
    /// Position at the root, kept in step with `root`
    root_state: Board,
    /// Colour whose results every node's reward is counted for
    perspective: Color,
}

impl SearchTree {
    pub fn new(root_state: Board, perspective: Color) -> Self {
        let legal = MoveGen::legal_moves(&root_state);
        Self {
            nodes: vec![Node::new_root(&legal, root_state.current_player())],
            root: NodeId(0),
            root_state,
            perspective,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn root_state(&self) -> &Board {
        &self.root_state
    }

    #[inline]
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Child of `node_id` with the highest UCT score; ties keep the first.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let child = self.get(child_id);
            let score = uct_score(
                child.reward,
                child.visits,
                node.visits,
                exploration,
                child.mover == self.perspective,
            );
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Expand the untried move at `index` of `parent_id`.
    ///
    /// `board` must hold the parent's position; the move is played on it so
    /// that afterwards it holds the new child's position.
    pub fn expand_at(&mut self, parent_id: NodeId, index: usize, board: &mut Board) -> NodeId {
        let mv = self.get_mut(parent_id).untried.swap_remove(index);
        let mover = board.current_player();
        board.play(mv);
        let legal = MoveGen::legal_moves(board);
        let child_id = self.allocate(Node::new_child(parent_id, mv, mover, &legal));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Add `reward` and one visit to `leaf_id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current = leaf_id;
        while current.is_some() {
            let node = self.get_mut(current);
            node.visits += 1;
            node.reward += reward;
            current = node.parent;
        }
    }

    pub fn child_with_move(&self, parent_id: NodeId, mv: Location) -> Option<NodeId> {
        self.get(parent_id)
            .children
            .iter()
            .copied()
            .find(|&id| self.get(id).mv == Some(mv))
    }

    /// Most visited child of the root; ties keep the first.
    pub fn most_visited_child(&self) -> Option<NodeId> {
        self.best_root_child_by(|node| node.visits as f64)
    }

    /// Root child with the largest accumulated reward; ties keep the first.
    pub fn most_rewarded_child(&self) -> Option<NodeId> {
        self.best_root_child_by(|node| node.reward)
    }

    fn best_root_child_by(&self, key: impl Fn(&Node) -> f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &self.get(self.root).children {
            let value = key(self.get(child_id));
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((child_id, value)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Commit `mv` as played from the root position.
    ///
    /// The matching child becomes the new root with its statistics intact and
    /// every sibling subtree is released. A legal move the search never
    /// expanded is materialised first; anything else is rejected.
    pub fn advance(&mut self, mv: Location) -> Result<(), SearchError> {
        let root = self.root;
        let child = match self.child_with_move(root, mv) {
            Some(id) => id,
            None => {
                let index = self
                    .get(root)
                    .untried
                    .iter()
                    .position(|&m| m == mv)
                    .ok_or(SearchError::MoveNotInTree(mv))?;
                let mut board = self.root_state;
                self.expand_at(root, index, &mut board)
            }
        };

        let before = self.nodes.len();
        self.reanchor(child);
        self.root_state.play(mv);
        debug!(
            "advanced root by {}: kept {} of {} nodes",
            mv,
            self.nodes.len(),
            before
        );
        Ok(())
    }

    /// Rebuild the arena from the subtree under `new_root`, breadth first.
    fn reanchor(&mut self, new_root: NodeId) {
        let mut remap = vec![NodeId::NONE; self.nodes.len()];
        let mut order = vec![new_root];
        let mut next = 0;
        while next < order.len() {
            let id = order[next];
            remap[id.index()] = NodeId(next as u32);
            order.extend(self.nodes[id.index()].children.iter().copied());
            next += 1;
        }

        let mut old: Vec<Option<Node>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();
        let mut nodes = Vec::with_capacity(order.len());
        for id in order {
            if let Some(mut node) = old[id.index()].take() {
                node.parent = if id == new_root {
                    NodeId::NONE
                } else {
                    remap[node.parent.index()]
                };
                for child in node.children.iter_mut() {
                    *child = remap[child.index()];
                }
                nodes.push(node);
            }
        }

        self.nodes = nodes;
        self.root = NodeId(0);
    }

    /// Nodes reachable from `id`, counting `id` itself
    pub fn subtree_size(&self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut count = 0;
        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend(self.get(current).children.iter().copied());
        }
        count
    }
}
