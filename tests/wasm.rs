#![cfg(target_arch = "wasm32")]

use checkers::wasm::CheckersServer;
use js_sys::{Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn submit_move_returns_snapshot_object() {
    let server = CheckersServer::new();
    let id = server.create_session("alice");
    assert!(server.join_session(&id, "bob"));

    let reply = server.submit_move(&id, "alice", 5, 0, 4, 1).unwrap();

    assert_eq!(field(&reply, "current_player").as_string().as_deref(), Some("black"));
    assert!(field(&reply, "winner").is_null());
    let board = Array::from(&field(&reply, "board"));
    let row4 = Array::from(&board.get(4));
    assert!(Array::from(&board.get(5)).get(0).is_null());
    assert_eq!(field(&row4.get(1), "color").as_string().as_deref(), Some("red"));
    assert_eq!(field(&row4.get(1), "king").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn rejected_move_returns_error_reason() {
    let server = CheckersServer::new();
    let id = server.create_session("alice");
    assert!(server.join_session(&id, "bob"));

    let wrong_turn = server.submit_move(&id, "bob", 2, 1, 3, 0).unwrap();
    let unknown = server.submit_move("404", "alice", 5, 0, 4, 1).unwrap();

    assert_eq!(field(&wrong_turn, "error").as_string().as_deref(), Some("WrongTurn"));
    assert_eq!(field(&unknown, "error").as_string().as_deref(), Some("UnknownSession"));
}

#[wasm_bindgen_test]
fn config_object_selects_strategy() {
    let config = js_sys::Object::new();
    Reflect::set(&config, &"computer".into(), &"first_legal".into()).unwrap();
    let server = CheckersServer::with_config(config.into()).unwrap();
    let id = server.create_computer_session("solo");

    server.submit_move(&id, "solo", 5, 0, 4, 1).unwrap();
    let reply = server.play_computer_move(&id).unwrap();

    let board = Array::from(&field(&reply, "board"));
    let row3 = Array::from(&board.get(3));
    assert_eq!(field(&row3.get(0), "color").as_string().as_deref(), Some("black"));
}

#[wasm_bindgen_test]
fn unknown_session_snapshot_is_null() {
    let server = CheckersServer::new();

    assert!(server.snapshot("9").unwrap().is_null());
    assert!(server.legal_moves("9", 5, 0).unwrap().is_null());
}
