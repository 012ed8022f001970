use serde::Deserialize;
use tracing::debug;
use web_time::Instant;

use crate::ai::MoveSelector;
use crate::error::ConfigError;
use crate::game::GameState;
use crate::types::{BOARD_SIZE, Color, Position};

/// Bonuses added by [`HeuristicSelector`] for each candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicWeights {
    /// Flat bonus for a jump.
    pub capture: f64,
    /// Per row gained toward the promotion rank; men only.
    pub advance: f64,
    /// Destination on column 0 or 7.
    pub edge: f64,
    /// Destination diagonally next to a friendly piece.
    pub protected: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            capture: 10.0,
            advance: 0.5,
            edge: 0.5,
            protected: 0.3,
        }
    }
}

impl HeuristicWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("capture", self.capture),
            ("advance", self.advance),
            ("edge", self.edge),
            ("protected", self.protected),
        ];
        match named.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(ConfigError::NonFiniteWeight { name, value }),
            None => Ok(()),
        }
    }
}

/// Greedy one-ply evaluator: scores every legal move on the current board and
/// plays the first one with the highest score. No look-ahead.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSelector {
    weights: HeuristicWeights,
}

impl HeuristicSelector {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Caller contract: `from` holds a piece of `color`.
    pub fn score(&self, state: &GameState, color: Color, from: Position, to: Position) -> f64 {
        let w = &self.weights;
        let mut score = 0.0f64;

        if (to.row - from.row).abs() == 2 {
            score += w.capture;
        }

        let is_king = state.board().get(from).is_some_and(|piece| piece.king);
        if !is_king {
            let rows_gained = match color {
                Color::Black => to.row,
                Color::Red => BOARD_SIZE - 1 - to.row,
            };
            score += w.advance * rows_gained as f64;
        }

        if to.col == 0 || to.col == BOARD_SIZE - 1 {
            score += w.edge;
        }

        // Scored against the pre-move board, so a simple step counts its own
        // origin square as a neighbour.
        if state.board().has_neighbour(to, color) {
            score += w.protected;
        }

        score
    }
}

impl MoveSelector for HeuristicSelector {
    fn select_move(&self, state: &GameState, color: Color) -> Option<(Position, Position)> {
        let started = Instant::now();
        let mut best: Option<((Position, Position), f64)> = None;

        for (from, to) in state.enumerate_all_moves(color) {
            let score = self.score(state, color, from, to);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some(((from, to), score));
            }
        }

        if let Some(((from, to), score)) = best {
            debug!(
                %color,
                %from,
                %to,
                score,
                elapsed_us = started.elapsed().as_micros() as u64,
                "heuristic move selected"
            );
        }
        best.map(|(mv, _)| mv)
    }
}
