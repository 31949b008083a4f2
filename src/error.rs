use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element `{0}` is missing or has the wrong type")]
    Element(String),
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("game is already mounted")]
    AlreadyMounted,
    #[error("game is not mounted; call mount() first")]
    NotMounted,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
