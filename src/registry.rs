use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::ai::{HeuristicSelector, MoveSelector};
use crate::config::RegistryConfig;
use crate::error::{ConfigError, Rejection};
use crate::game::AppliedMove;
use crate::session::{GameSession, PlayerId, Seat, SessionId, SessionPhase};
use crate::types::{Position, Snapshot};

type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Default)]
struct SessionTable {
    next_id: u64,
    sessions: HashMap<SessionId, SharedSession>,
}

/// Owns every live game and the player → session mapping.
///
/// Locking: the session table is only written while allocating an id; each
/// session has its own mutex, and a command validates, mutates and snapshots
/// under that one guard. The table lock is never taken while a session
/// mutex is held.
pub struct SessionRegistry {
    sessions: RwLock<SessionTable>,
    player_sessions: RwLock<HashMap<PlayerId, SessionId>>,
    selector: Box<dyn MoveSelector>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_selector(Box::new(HeuristicSelector::default()))
    }

    pub fn with_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_selector(config.build_selector()))
    }

    pub fn with_selector(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            sessions: RwLock::new(SessionTable::default()),
            player_sessions: RwLock::new(HashMap::new()),
            selector,
        }
    }

    /// Opens a game with `player` as Red and the Black seat free.
    pub fn create_session(&self, player: PlayerId) -> SessionId {
        self.open(player, None)
    }

    /// Opens a game with `player` as Red against the computer as Black.
    pub fn create_computer_session(&self, player: PlayerId) -> SessionId {
        self.open(player, Some(Seat::Computer))
    }

    pub fn join_session(&self, id: SessionId, player: PlayerId) -> Result<(), Rejection> {
        let session = self.session(id)?;
        let mut session = session.lock();
        session.join(player.clone()).inspect_err(|reason| {
            debug!(session_id = %id, player_id = %player, %reason, "join rejected");
        })?;
        info!(session_id = %id, player_id = %player, "player joined as black");
        self.player_sessions.write().insert(player, id);
        Ok(())
    }

    pub fn add_spectator(&self, id: SessionId, spectator: PlayerId) -> Result<(), Rejection> {
        let session = self.session(id)?;
        let mut session = session.lock();
        session.add_spectator(spectator.clone());
        debug!(session_id = %id, player_id = %spectator, "spectator added");
        self.player_sessions.write().insert(spectator, id);
        Ok(())
    }

    /// Validates and plays a move for `player`, returning the post-move
    /// snapshot taken under the same lock.
    pub fn submit_move(
        &self,
        id: SessionId,
        player: &PlayerId,
        from: Position,
        to: Position,
    ) -> Result<Snapshot, Rejection> {
        let session = self.session(id)?;
        let mut session = session.lock();
        let result = session.submit_move(player, from, to);
        self.finish(&session, result, player.as_str())
    }

    /// Plays the configured selector's move for a computer-held side.
    pub fn play_computer_move(&self, id: SessionId) -> Result<Snapshot, Rejection> {
        let session = self.session(id)?;
        let mut session = session.lock();
        let result = session.play_computer_move(self.selector.as_ref());
        self.finish(&session, result, "computer")
    }

    pub fn snapshot(&self, id: SessionId) -> Option<Snapshot> {
        let session = self.session(id).ok()?;
        let snapshot = session.lock().snapshot();
        Some(snapshot)
    }

    pub fn phase(&self, id: SessionId) -> Option<SessionPhase> {
        let session = self.session(id).ok()?;
        let phase = session.lock().phase();
        Some(phase)
    }

    /// Legal destinations for the piece on `from` in session `id`.
    pub fn legal_moves(&self, id: SessionId, from: Position) -> Result<Vec<Position>, Rejection> {
        let session = self.session(id)?;
        let moves = session.lock().state().generate_moves(from);
        Ok(moves)
    }

    /// Session most recently created, joined or spectated by `player`.
    pub fn session_of(&self, player: &PlayerId) -> Option<SessionId> {
        self.player_sessions.read().get(player).copied()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn open(&self, player: PlayerId, black: Option<Seat>) -> SessionId {
        let vs_computer = black.is_some();
        let id = {
            let mut table = self.sessions.write();
            let id = SessionId::new(table.next_id);
            table.next_id += 1;
            let session = GameSession::new(id, Seat::Player(player.clone()), black);
            table.sessions.insert(id, Arc::new(Mutex::new(session)));
            id
        };
        info!(session_id = %id, player_id = %player, vs_computer, "session created");
        self.player_sessions.write().insert(player, id);
        id
    }

    fn session(&self, id: SessionId) -> Result<SharedSession, Rejection> {
        self.sessions
            .read()
            .sessions
            .get(&id)
            .cloned()
            .ok_or(Rejection::UnknownSession)
    }

    fn finish(
        &self,
        session: &GameSession,
        result: Result<AppliedMove, Rejection>,
        actor: &str,
    ) -> Result<Snapshot, Rejection> {
        let id = session.id();
        match result {
            Ok(applied) => {
                debug!(
                    session_id = %id,
                    player_id = actor,
                    from = %applied.from,
                    to = %applied.to,
                    capture = applied.captured.is_some(),
                    promoted = applied.promoted,
                    "move applied"
                );
                if let Some(winner) = session.winner() {
                    info!(session_id = %id, %winner, "game over");
                }
                Ok(session.snapshot())
            }
            Err(reason) => {
                debug!(session_id = %id, player_id = actor, %reason, "move rejected");
                Err(reason)
            }
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
