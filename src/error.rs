//! Failures while wiring the game into the page. Gameplay itself cannot fail.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("element #{0} is not a {1}")]
    WrongElement(String, &'static str),
    #[error("canvas #{0} has no 2d context")]
    NoContext(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[cfg(feature = "serde_json")]
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SetupError> for JsValue {
    fn from(err: SetupError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SetupError::WrongElement("tetris".into(), "canvas").to_string(),
            "element #tetris is not a canvas"
        );
        assert_eq!(SetupError::NoContext("next".into()).to_string(), "canvas #next has no 2d context");
    }
}
