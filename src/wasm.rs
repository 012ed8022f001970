use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::config::RegistryConfig;
use crate::error::Rejection;
use crate::registry::SessionRegistry;
use crate::session::{PlayerId, SessionId};
use crate::types::{MoveReply, Position};

/// JS-facing handle around one [`SessionRegistry`]. The host constructs it
/// once and routes every request through it.
#[wasm_bindgen]
pub struct CheckersServer {
    registry: SessionRegistry,
}

#[wasm_bindgen]
impl CheckersServer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            registry: SessionRegistry::new(),
        }
    }

    /// Builds a server from a plain JS config object; `undefined`/`null`
    /// means defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<CheckersServer, JsError> {
        let config: RegistryConfig = if config.is_undefined() || config.is_null() {
            RegistryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|err| JsError::new(&err.to_string()))?
        };
        Ok(Self {
            registry: SessionRegistry::with_config(&config)?,
        })
    }

    #[wasm_bindgen(js_name = createSession)]
    pub fn create_session(&self, player_id: &str) -> String {
        self.registry.create_session(PlayerId::new(player_id)).to_string()
    }

    #[wasm_bindgen(js_name = createComputerSession)]
    pub fn create_computer_session(&self, player_id: &str) -> String {
        self.registry
            .create_computer_session(PlayerId::new(player_id))
            .to_string()
    }

    #[wasm_bindgen(js_name = joinSession)]
    pub fn join_session(&self, session_id: &str, player_id: &str) -> bool {
        parse_session_id(session_id)
            .and_then(|id| self.registry.join_session(id, PlayerId::new(player_id)))
            .is_ok()
    }

    pub fn spectate(&self, session_id: &str, spectator_id: &str) -> bool {
        parse_session_id(session_id)
            .and_then(|id| self.registry.add_spectator(id, PlayerId::new(spectator_id)))
            .is_ok()
    }

    /// Returns either the post-move snapshot or `{error: "<reason>"}`.
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(
        &self,
        session_id: &str,
        player_id: &str,
        start_row: i32,
        start_col: i32,
        end_row: i32,
        end_col: i32,
    ) -> Result<JsValue, JsError> {
        let player = PlayerId::new(player_id);
        let result = parse_session_id(session_id).and_then(|id| {
            self.registry.submit_move(
                id,
                &player,
                Position::new(start_row, start_col),
                Position::new(end_row, end_col),
            )
        });
        to_js(&MoveReply::from(result))
    }

    #[wasm_bindgen(js_name = playComputerMove)]
    pub fn play_computer_move(&self, session_id: &str) -> Result<JsValue, JsError> {
        let result =
            parse_session_id(session_id).and_then(|id| self.registry.play_computer_move(id));
        to_js(&MoveReply::from(result))
    }

    /// Current snapshot, or `null` for an unknown session.
    pub fn snapshot(&self, session_id: &str) -> Result<JsValue, JsError> {
        let snapshot = parse_session_id(session_id)
            .ok()
            .and_then(|id| self.registry.snapshot(id));
        to_js(&snapshot)
    }

    /// Destinations for the piece at `(row, col)`, or `null` for an unknown
    /// session.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, session_id: &str, row: i32, col: i32) -> Result<JsValue, JsError> {
        let moves = parse_session_id(session_id)
            .and_then(|id| self.registry.legal_moves(id, Position::new(row, col)))
            .ok();
        to_js(&moves)
    }

    #[wasm_bindgen(js_name = sessionOf)]
    pub fn session_of(&self, player_id: &str) -> Option<String> {
        self.registry
            .session_of(&PlayerId::new(player_id))
            .map(|id| id.to_string())
    }
}

impl Default for CheckersServer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Rejection> {
    raw.parse().map_err(|_| Rejection::UnknownSession)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsError::new(&err.to_string()))
}
