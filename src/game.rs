use crate::board::Board;
use crate::error::MoveError;
use crate::types::{Color, Position};

/// What `GameState::apply_move` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub from: Position,
    pub to: Position,
    /// Cell of the removed opposing piece, for jumps.
    pub captured: Option<Position>,
    pub promoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Winner(Color),
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Winner(color) => Some(*color),
        }
    }
}

/// Board plus turn state. Piece counts always match the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    red_count: u32,
    black_count: u32,
}

impl GameState {
    /// Opening position, Red to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Red)
    }

    /// Arbitrary position with counts derived from the board.
    pub fn from_board(board: Board, current_player: Color) -> Self {
        Self {
            red_count: board.count(Color::Red),
            black_count: board.count(Color::Black),
            board,
            current_player,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn count(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.red_count,
            Color::Black => self.black_count,
        }
    }

    /// Legal destinations for the piece on `pos`. Empty unless that piece
    /// belongs to the side to move.
    pub fn generate_moves(&self, pos: Position) -> Vec<Position> {
        match self.board.get(pos) {
            Some(piece) if piece.color == self.current_player => self.board.piece_moves(pos),
            _ => Vec::new(),
        }
    }

    /// Every legal `(from, to)` pair for `color`: source cells row-major,
    /// then each piece's own destination order.
    pub fn enumerate_all_moves(&self, color: Color) -> Vec<(Position, Position)> {
        self.board
            .pieces(color)
            .flat_map(|(from, _)| self.generate_moves(from).into_iter().map(move |to| (from, to)))
            .collect()
    }

    /// Validates and plays one move. On `Err` the state is untouched.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<AppliedMove, MoveError> {
        if !from.in_bounds() || !to.in_bounds() {
            return Err(MoveError::OutOfBounds { from, to });
        }
        let piece = self.board.get(from).ok_or(MoveError::NoPieceAtSource(from))?;
        if piece.color != self.current_player {
            return Err(MoveError::WrongOwner(from));
        }
        if !self.generate_moves(from).contains(&to) {
            return Err(MoveError::IllegalDestination { from, to });
        }

        let mut moved = self.board.take(from).ok_or(MoveError::NoPieceAtSource(from))?;

        let captured = if (to.row - from.row).abs() == 2 {
            let over = from.midpoint(to);
            if let Some(jumped) = self.board.take(over) {
                match jumped.color {
                    Color::Red => self.red_count -= 1,
                    Color::Black => self.black_count -= 1,
                }
            }
            Some(over)
        } else {
            None
        };

        let promoted = !moved.king && to.row == moved.color.promotion_row();
        if promoted {
            moved.king = true;
        }
        self.board.place(to, moved);
        self.current_player = self.current_player.opponent();

        Ok(AppliedMove {
            from,
            to,
            captured,
            promoted,
        })
    }

    /// A side with no pieces loses; so does a side to move with no legal move.
    pub fn detect_outcome(&self) -> Outcome {
        if self.red_count == 0 {
            return Outcome::Winner(Color::Black);
        }
        if self.black_count == 0 {
            return Outcome::Winner(Color::Red);
        }

        let mover = self.current_player;
        let can_move = self
            .board
            .pieces(mover)
            .any(|(pos, _)| !self.generate_moves(pos).is_empty());
        if can_move {
            Outcome::Ongoing
        } else {
            Outcome::Winner(mover.opponent())
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
