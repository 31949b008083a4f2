//! Browser implementations of the storage and clock seams.

use web_sys::{Storage, window};

use crate::error::GameError;
use crate::game_loop::Clock;
use crate::highscores::KeyValueStore;

/// `window.localStorage`. Every call re-resolves the storage object so a page
/// that disables storage mid-session just produces errors, never a panic.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage(&self) -> Result<Storage, GameError> {
        let w = window().ok_or(GameError::NoWindow)?;
        w.local_storage()?
            .ok_or_else(|| GameError::Storage("localStorage is disabled".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.storage()?.get_item(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), GameError> {
        Ok(self.storage()?.set_item(key, value)?)
    }
}

/// `performance.now()` plus the locale date string.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn today(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED)
            .into()
    }
}
