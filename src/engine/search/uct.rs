//! UCT scoring for child selection.

use crate::core::board::WIN_REWARD;

/// UCB1 score of a child as seen by the player choosing between siblings.
///
/// `reward` is accumulated from the tree's perspective colour. When the
/// child's move was played by that colour the exploitation term is its win
/// rate; when the opponent played it the term is `1 - win rate`, so the
/// opponent is modelled as minimising the perspective colour's reward.
///
/// A child with no visits scores zero, and so does the exploration term
/// while `ln(parent_visits)` is not positive.
pub fn uct_score(
    reward: f64,
    visits: u32,
    parent_visits: u32,
    exploration: f64,
    mover_is_perspective: bool,
) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    let n = visits as f64;
    let exploit = if mover_is_perspective {
        reward / (WIN_REWARD * n)
    } else {
        (n - reward / WIN_REWARD) / n
    };
    exploit + exploration * exploration_term(parent_visits, n)
}

fn exploration_term(parent_visits: u32, visits: f64) -> f64 {
    if parent_visits == 0 {
        return 0.0;
    }
    let log = (parent_visits as f64).ln();
    if log <= 0.0 {
        return 0.0;
    }
    (log / visits).sqrt()
}
