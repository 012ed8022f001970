pub mod heuristic;

use crate::game::GameState;
use crate::types::{Color, Position};

pub use heuristic::{HeuristicSelector, HeuristicWeights};

/// Picks a move for a computer-controlled side.
///
/// Implementations must only return pairs from
/// `state.enumerate_all_moves(color)`; the registry re-validates anyway.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, state: &GameState, color: Color) -> Option<(Position, Position)>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, state: &GameState, color: Color) -> Option<(Position, Position)> {
        state.enumerate_all_moves(color).into_iter().next()
    }
}
