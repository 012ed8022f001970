use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod registry;
pub mod session;
pub mod types;
pub mod wasm;

pub use error::{ConfigError, MoveError, Rejection};
pub use registry::SessionRegistry;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
