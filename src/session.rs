use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ai::MoveSelector;
use crate::error::Rejection;
use crate::game::{AppliedMove, GameState};
use crate::types::{Color, Position, Snapshot};

/// Registry-assigned session id. Allocated from a counter, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Opaque identity issued by the transport layer (cookie, connection, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Who controls a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seat {
    Player(PlayerId),
    Computer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    RedToMove,
    BlackToMove,
    GameOver(Color),
}

/// One game: its rules state plus who may act on it.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    red: Option<Seat>,
    black: Option<Seat>,
    spectators: HashSet<PlayerId>,
    state: GameState,
    winner: Option<Color>,
}

impl GameSession {
    /// Fresh game with `red` seated and the Black seat in `black`
    /// (usually empty until someone joins).
    pub fn new(id: SessionId, red: Seat, black: Option<Seat>) -> Self {
        Self::with_state(id, red, black, GameState::new())
    }

    pub(crate) fn with_state(
        id: SessionId,
        red: Seat,
        black: Option<Seat>,
        state: GameState,
    ) -> Self {
        let winner = state.detect_outcome().winner();
        Self {
            id,
            red: Some(red),
            black,
            spectators: HashSet::new(),
            state,
            winner,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seat(&self, color: Color) -> Option<&Seat> {
        match color {
            Color::Red => self.red.as_ref(),
            Color::Black => self.black.as_ref(),
        }
    }

    pub fn spectators(&self) -> &HashSet<PlayerId> {
        &self.spectators
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.winner, self.state.current_player()) {
            (Some(winner), _) => SessionPhase::GameOver(winner),
            (None, Color::Red) => SessionPhase::RedToMove,
            (None, Color::Black) => SessionPhase::BlackToMove,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.state.board().to_rows(),
            current_player: self.state.current_player(),
            winner: self.winner,
            red_count: self.state.count(Color::Red),
            black_count: self.state.count(Color::Black),
        }
    }

    /// Seats `player` as Black.
    pub fn join(&mut self, player: PlayerId) -> Result<(), Rejection> {
        if self.black.is_some() {
            return Err(Rejection::SlotTaken);
        }
        self.black = Some(Seat::Player(player));
        Ok(())
    }

    pub fn add_spectator(&mut self, spectator: PlayerId) {
        self.spectators.insert(spectator);
    }

    /// Plays a move on behalf of `player`, who must hold the seat of the side
    /// to move.
    pub fn submit_move(
        &mut self,
        player: &PlayerId,
        from: Position,
        to: Position,
    ) -> Result<AppliedMove, Rejection> {
        self.ensure_ongoing()?;
        match self.seat(self.state.current_player()) {
            Some(Seat::Player(seated)) if seated == player => {}
            _ => return Err(Rejection::WrongTurn),
        }
        self.play(from, to)
    }

    /// Asks `selector` for a move for the side to move, which must be
    /// computer-controlled.
    pub fn play_computer_move(
        &mut self,
        selector: &dyn MoveSelector,
    ) -> Result<AppliedMove, Rejection> {
        self.ensure_ongoing()?;
        let mover = self.state.current_player();
        if self.seat(mover) != Some(&Seat::Computer) {
            return Err(Rejection::NotComputerTurn);
        }
        let (from, to) = selector
            .select_move(&self.state, mover)
            .ok_or(Rejection::IllegalMove)?;
        self.play(from, to)
    }

    fn ensure_ongoing(&self) -> Result<(), Rejection> {
        match self.winner {
            Some(_) => Err(Rejection::GameAlreadyOver),
            None => Ok(()),
        }
    }

    fn play(&mut self, from: Position, to: Position) -> Result<AppliedMove, Rejection> {
        let applied = self.state.apply_move(from, to)?;
        self.winner = self.state.detect_outcome().winner();
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{FirstLegalMoveSelector, HeuristicSelector};
    use crate::board::Board;
    use crate::types::Piece;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn two_player_session() -> GameSession {
        let mut session = GameSession::new(SessionId::new(0), Seat::Player("alice".into()), None);
        session.join("bob".into()).unwrap();
        session
    }

    #[test]
    fn session_id_round_trips_through_display() {
        let id = SessionId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<SessionId>().unwrap(), id);
        assert!("abc".parse::<SessionId>().is_err());
    }

    #[test]
    fn second_join_is_rejected() {
        let mut session = two_player_session();

        assert_eq!(session.join("carol".into()), Err(Rejection::SlotTaken));
        assert_eq!(session.seat(Color::Black), Some(&Seat::Player("bob".into())));
    }

    #[test]
    fn phase_follows_turns() {
        let mut session = two_player_session();
        assert_eq!(session.phase(), SessionPhase::RedToMove);

        session.submit_move(&"alice".into(), pos(5, 0), pos(4, 1)).unwrap();

        assert_eq!(session.phase(), SessionPhase::BlackToMove);
    }

    #[test]
    fn wrong_player_cannot_move() {
        let mut session = two_player_session();
        let before = session.state().clone();

        assert_eq!(
            session.submit_move(&"bob".into(), pos(5, 0), pos(4, 1)),
            Err(Rejection::WrongTurn)
        );
        assert_eq!(
            session.submit_move(&"mallory".into(), pos(5, 0), pos(4, 1)),
            Err(Rejection::WrongTurn)
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn cannot_move_against_an_empty_seat() {
        let mut session = GameSession::new(SessionId::new(0), Seat::Player("alice".into()), None);
        session.submit_move(&"alice".into(), pos(5, 0), pos(4, 1)).unwrap();

        assert_eq!(
            session.submit_move(&"alice".into(), pos(2, 1), pos(3, 0)),
            Err(Rejection::WrongTurn)
        );
    }

    #[test]
    fn finished_game_rejects_further_moves() {
        let board = Board::from_pieces(&[
            (pos(3, 4), Piece::man(Color::Red)),
            (pos(2, 3), Piece::man(Color::Black)),
        ]);
        let state = GameState::from_board(board, Color::Red);
        let mut session = GameSession::with_state(
            SessionId::new(0),
            Seat::Player("alice".into()),
            Some(Seat::Player("bob".into())),
            state,
        );

        session.submit_move(&"alice".into(), pos(3, 4), pos(1, 2)).unwrap();
        assert_eq!(session.phase(), SessionPhase::GameOver(Color::Red));

        let after = session.state().clone();
        assert_eq!(
            session.submit_move(&"bob".into(), pos(0, 1), pos(1, 0)),
            Err(Rejection::GameAlreadyOver)
        );
        assert_eq!(session.state(), &after);
    }

    #[test]
    fn computer_moves_only_on_its_own_turn() {
        let mut session =
            GameSession::new(SessionId::new(0), Seat::Player("alice".into()), Some(Seat::Computer));

        assert_eq!(
            session.play_computer_move(&HeuristicSelector::default()),
            Err(Rejection::NotComputerTurn)
        );

        session.submit_move(&"alice".into(), pos(5, 0), pos(4, 1)).unwrap();
        let applied = session.play_computer_move(&FirstLegalMoveSelector).unwrap();

        assert_eq!((applied.from, applied.to), (pos(2, 1), pos(3, 0)));
        assert_eq!(session.phase(), SessionPhase::RedToMove);
    }

    #[test]
    fn snapshot_reports_counts_and_winner() {
        let session = two_player_session();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.current_player, Color::Red);
        assert_eq!(snapshot.winner, None);
        assert_eq!(snapshot.red_count, 12);
        assert_eq!(snapshot.black_count, 12);
        assert_eq!(snapshot.board[7][0], Some(Piece::man(Color::Red)));
    }
}
