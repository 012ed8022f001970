use serde::Serialize;

use crate::types::Position;

/// Why the rules engine refused a move. Nothing is mutated when one of these
/// is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("move {from} -> {to} leaves the board")]
    OutOfBounds { from: Position, to: Position },

    #[error("no piece at {0}")]
    NoPieceAtSource(Position),

    #[error("piece at {0} does not belong to the side to move")]
    WrongOwner(Position),

    #[error("{to} is not a legal destination from {from}")]
    IllegalDestination { from: Position, to: Position },
}

/// Reasons a registry command is refused. Every variant is recoverable and
/// meant to be shown to the requesting client.
///
/// Serializes as the bare variant name, e.g. `"WrongTurn"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum Rejection {
    #[error("unknown session")]
    UnknownSession,

    #[error("not your turn")]
    WrongTurn,

    #[error("illegal move")]
    IllegalMove,

    #[error("game is already over")]
    GameAlreadyOver,

    #[error("seat is already taken")]
    SlotTaken,

    #[error("side to move is not computer-controlled")]
    NotComputerTurn,
}

impl From<MoveError> for Rejection {
    fn from(_: MoveError) -> Self {
        Rejection::IllegalMove
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("heuristic weight `{name}` must be finite, got {value}")]
    NonFiniteWeight { name: &'static str, value: f64 },
}
