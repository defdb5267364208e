//! Canvas Tetris core crate.
//!
//! The simulation (`game`) is plain Rust and runs natively under `cargo test`.
//! The `web` module binds it to a page: two canvases (board + next-piece
//! preview), score text, a game-over overlay, keyboard input and a
//! `requestAnimationFrame` loop. A host page calls `mount_game()` once it is up
//! and play begins from its start button; `start_game()` mounts and begins in
//! one step.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod input;
mod logging;
mod web;

pub use config::GameConfig;
pub use error::SetupError;
pub use game::board::{Board, COLS, ROWS, SweepResult};
pub use game::matrix::{Cell, Matrix};
pub use game::piece::{Player, Tetromino};
pub use game::spawner::Randomizer;
pub use game::{Game, GameEvent};
pub use input::Command;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::init(level);
}

/// Wires the default page layout and draws an empty board. Play begins when
/// the start button is clicked (or `restart_game` is called).
#[wasm_bindgen]
pub fn mount_game() -> Result<(), JsValue> {
    web::mount(GameConfig::default()).map_err(JsValue::from)
}

/// Like `mount_game` with a JSON config; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn mount_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::mount(config).map_err(JsValue::from)
}

/// Begins a new game with the default page layout (see `GameConfig::default`).
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default()).map_err(JsValue::from)
}

/// Begins a new game with a JSON config; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::start(config).map_err(JsValue::from)
}

/// Same as pressing the restart button.
#[wasm_bindgen]
pub fn restart_game() {
    web::begin_new_game();
}

#[wasm_bindgen]
pub fn toggle_pause() {
    web::toggle_pause();
}

#[wasm_bindgen]
pub fn current_score() -> u32 {
    web::current_score()
}

/// True while a started game has not ended.
#[wasm_bindgen]
pub fn game_running() -> bool {
    web::game_running()
}
