//! Galope runner core crate.
//!
//! A side-scrolling endless runner drawn on a 2d canvas. The rider runs on its
//! own, the player jumps (twice in the air at most) or drops fast to dodge
//! cacti, and mate / empanada pickups are worth bonus points. The best five
//! runs are kept in `localStorage`.
//!
//! Everything under [`sim`], [`session`] and [`game_loop`] is plain Rust and
//! runs on the host under `cargo test`; [`web`] binds it to the browser.

use wasm_bindgen::prelude::*;

pub mod collision;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod highscores;
pub mod logging;
pub mod render;
pub mod session;
pub mod sim;
pub mod web;

pub use config::{GameConfig, Viewport};
pub use error::GameError;
pub use game_loop::{Clock, FrameReport, GameLoop};
pub use highscores::{HighScoreBoard, HighScoreEntry, KeyValueStore, MemoryStore};
pub use session::{GameEvent, Phase, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

// -----------------------------------------------------------------------------
// Page-facing API
// -----------------------------------------------------------------------------

/// Override the tunables with a JSON object. Only valid before `mount`.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    Ok(web::configure(json)?)
}

/// Attach to (or create) the canvas with this id and show the menu.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<(), JsValue> {
    Ok(web::mount(canvas_id)?)
}

/// Menu → Playing. Returns false when the start was deferred (portrait phone).
#[wasm_bindgen]
pub fn start_game() -> Result<bool, JsValue> {
    Ok(web::start_game()?)
}

#[wasm_bindgen]
pub fn play_again() -> Result<bool, JsValue> {
    Ok(web::play_again()?)
}

#[wasm_bindgen]
pub fn back_to_menu() -> Result<(), JsValue> {
    Ok(web::back_to_menu()?)
}

/// Returns whether music is now meant to be playing.
#[wasm_bindgen]
pub fn toggle_music() -> Result<bool, JsValue> {
    Ok(web::toggle_music()?)
}

#[wasm_bindgen]
pub fn music_playing() -> bool {
    web::music_playing()
}

/// The high score table as a JSON array, best first.
#[wasm_bindgen]
pub fn high_scores() -> Result<String, JsValue> {
    Ok(web::high_scores_json()?)
}

/// `"menu"`, `"playing"` or `"gameOver"`.
#[wasm_bindgen]
pub fn session_phase() -> Result<String, JsValue> {
    Ok(web::session_phase()?.to_string())
}

// Scores stay far below 2^53, so a JS number is exact.
#[wasm_bindgen]
pub fn current_score() -> Result<f64, JsValue> {
    Ok(web::current_score()? as f64)
}
