use crate::types::{BOARD_SIZE, Color, Piece, Position};

const NUM_SQUARES: usize = (BOARD_SIZE * BOARD_SIZE) as usize;
const STARTING_ROWS: i32 = 3;
/// Diagonal steps, toward row 0 first. Scan order matters for move ordering.
const DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Checkers board: 64 cells, row-major, each empty or holding a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; NUM_SQUARES],
}

impl Board {
    /// Creates the opening position:
    /// Black men on the dark squares of rows 0-2, Red men on rows 5-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            let color = if row < STARTING_ROWS {
                Color::Black
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                Color::Red
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE {
                board.place(Position::new(row, col), Piece::man(color));
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// Builds a board holding exactly `pieces`. Entries on light or
    /// off-board squares are skipped.
    pub fn from_pieces(pieces: &[(Position, Piece)]) -> Self {
        let mut board = Self::empty();
        for &(pos, piece) in pieces {
            board.place(pos, piece);
        }
        board
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        pos.index().and_then(|idx| self.cells[idx])
    }

    /// Puts `piece` on `pos`. Returns `false` and leaves the board unchanged
    /// when `pos` is off the board or a light square.
    pub fn place(&mut self, pos: Position, piece: Piece) -> bool {
        match pos.index() {
            Some(idx) if pos.is_dark() => {
                self.cells[idx] = Some(piece);
                true
            }
            _ => false,
        }
    }

    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        pos.index().and_then(|idx| self.cells[idx].take())
    }

    /// Destinations for the piece on `pos`, ignoring whose turn it is.
    ///
    /// Capture is mandatory per piece: if this piece can jump, only its jumps
    /// are returned, otherwise its single steps.
    pub fn piece_moves(&self, pos: Position) -> Vec<Position> {
        let Some(piece) = self.get(pos) else {
            return Vec::new();
        };

        let directions = directions_for(piece);
        let jumps: Vec<Position> = directions
            .clone()
            .filter_map(|(dr, dc)| {
                let over = pos.offset(dr, dc);
                let land = over.offset(dr, dc);
                let jumped = self.get(over)?;
                (jumped.color != piece.color && land.in_bounds() && self.get(land).is_none())
                    .then_some(land)
            })
            .collect();
        if !jumps.is_empty() {
            return jumps;
        }

        directions
            .map(|(dr, dc)| pos.offset(dr, dc))
            .filter(|step| step.in_bounds() && self.get(*step).is_none())
            .collect()
    }

    /// Occupied cells of `color`, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let piece = (*cell)?;
            (piece.color == color).then(|| (pos_of(idx), piece))
        })
    }

    pub fn count(&self, color: Color) -> u32 {
        self.pieces(color).count() as u32
    }

    /// True when some diagonal neighbour of `pos` holds a piece of `color`.
    pub fn has_neighbour(&self, pos: Position, color: Color) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.get(pos.offset(dr, dc)).is_some_and(|p| p.color == color))
    }

    /// Converts the board to an 8x8 row-major grid.
    pub fn to_rows(&self) -> Vec<Vec<Option<Piece>>> {
        self.cells
            .chunks(BOARD_SIZE as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn directions_for(piece: Piece) -> impl Iterator<Item = (i32, i32)> + Clone {
    DIRECTIONS
        .into_iter()
        .filter(move |&(dr, _)| piece.king || dr == piece.color.forward())
}

fn pos_of(idx: usize) -> Position {
    let idx = idx as i32;
    Position::new(idx / BOARD_SIZE, idx % BOARD_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn t01_initial_board_has_twelve_men_per_side_on_dark_squares() {
        let board = Board::new();

        assert_eq!(board.count(Color::Red), 12);
        assert_eq!(board.count(Color::Black), 12);
        for (p, piece) in board.pieces(Color::Black) {
            assert!(p.is_dark());
            assert!((0..=2).contains(&p.row));
            assert!(!piece.king);
        }
        for (p, piece) in board.pieces(Color::Red) {
            assert!(p.is_dark());
            assert!((5..=7).contains(&p.row));
            assert!(!piece.king);
        }
    }

    #[test]
    fn edge_man_has_single_step() {
        let board = Board::new();

        assert_eq!(board.piece_moves(pos(5, 0)), vec![pos(4, 1)]);
        assert_eq!(board.piece_moves(pos(2, 1)), vec![pos(3, 0), pos(3, 2)]);
    }

    #[test]
    fn blocked_back_rank_man_has_no_moves() {
        let board = Board::new();

        assert!(board.piece_moves(pos(7, 0)).is_empty());
        assert!(board.piece_moves(pos(0, 1)).is_empty());
    }

    #[test]
    fn available_jump_suppresses_steps() {
        let board = Board::from_pieces(&[
            (pos(3, 4), Piece::man(Color::Red)),
            (pos(2, 3), Piece::man(Color::Black)),
        ]);

        assert_eq!(board.piece_moves(pos(3, 4)), vec![pos(1, 2)]);
    }

    #[test]
    fn jump_needs_empty_on_board_landing() {
        let board = Board::from_pieces(&[
            (pos(2, 1), Piece::man(Color::Red)),
            (pos(1, 0), Piece::man(Color::Black)),
            (pos(1, 2), Piece::man(Color::Black)),
            (pos(0, 3), Piece::man(Color::Black)),
        ]);

        // (1,0) would land off the board, (1,2) would land on an occupied cell.
        assert!(board.piece_moves(pos(2, 1)).is_empty());
    }

    #[test]
    fn men_never_move_backwards_but_kings_do() {
        let man = Board::from_pieces(&[(pos(4, 3), Piece::man(Color::Red))]);
        assert_eq!(man.piece_moves(pos(4, 3)), vec![pos(3, 2), pos(3, 4)]);

        let king = Board::from_pieces(&[(pos(4, 3), Piece::king(Color::Red))]);
        assert_eq!(
            king.piece_moves(pos(4, 3)),
            vec![pos(3, 2), pos(3, 4), pos(5, 2), pos(5, 4)]
        );
    }

    #[test]
    fn king_captures_backwards() {
        let board = Board::from_pieces(&[
            (pos(2, 3), Piece::king(Color::Red)),
            (pos(3, 4), Piece::man(Color::Black)),
        ]);

        assert_eq!(board.piece_moves(pos(2, 3)), vec![pos(4, 5)]);
    }

    #[test]
    fn place_refuses_light_and_off_board_squares() {
        let mut board = Board::empty();

        assert!(!board.place(pos(0, 0), Piece::man(Color::Red)));
        assert!(!board.place(pos(-1, 0), Piece::man(Color::Red)));
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn to_rows_is_row_major() {
        let rows = Board::new().to_rows();

        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.len() == 8));
        assert_eq!(rows[0][1], Some(Piece::man(Color::Black)));
        assert_eq!(rows[5][0], Some(Piece::man(Color::Red)));
        assert_eq!(rows[3][0], None);
    }
}
