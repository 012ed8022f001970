use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Rejection;

pub const BOARD_SIZE: i32 = 8;

/// A board coordinate.
///
/// Coordinates are signed so that out-of-range requests coming off the wire
/// can be represented and rejected instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Only dark squares (`(row + col)` odd) ever hold a piece.
    pub fn is_dark(&self) -> bool {
        (self.row + self.col).rem_euclid(2) == 1
    }

    /// Flat row-major index, `None` when off the board.
    pub fn index(&self) -> Option<usize> {
        if self.in_bounds() {
            Some((self.row * BOARD_SIZE + self.col) as usize)
        } else {
            None
        }
    }

    pub fn offset(&self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    /// Cell between `self` and `other` for a two-step diagonal jump.
    pub fn midpoint(&self, other: Position) -> Self {
        Self::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row direction a man of this color advances in.
    pub fn forward(&self) -> i32 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// Row on which a man of this color is crowned.
    pub fn promotion_row(&self) -> i32 {
        match self {
            Color::Red => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self { color, king: false }
    }

    pub const fn king(color: Color) -> Self {
        Self { color, king: true }
    }
}

/// Public game state handed to the transport layer after every accepted move
/// and to clients that join or spectate a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Row-major 8x8 grid; `None` serializes as `null`.
    pub board: Vec<Vec<Option<Piece>>>,
    pub current_player: Color,
    pub winner: Option<Color>,
    pub red_count: u32,
    pub black_count: u32,
}

/// Wire shape of a move request's result.
///
/// Contract:
/// - Accepted move: the post-move `Snapshot`.
/// - Rejected move: `{"error": "<Rejection>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MoveReply {
    Moved(Snapshot),
    Rejected { error: Rejection },
}

impl From<Result<Snapshot, Rejection>> for MoveReply {
    fn from(result: Result<Snapshot, Rejection>) -> Self {
        match result {
            Ok(snapshot) => MoveReply::Moved(snapshot),
            Err(error) => MoveReply::Rejected { error },
        }
    }
}
