//! Page wiring and tuning knobs. Every field has a default so a host page
//! only needs to override what differs (see `GameConfig::from_json`).

use crate::game::DEFAULT_DROP_INTERVAL_MS;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub board_canvas_id: String,
    pub preview_canvas_id: String,
    pub score_id: String,
    pub lines_id: String,
    pub overlay_id: String,
    pub final_score_id: String,
    pub start_button_id: String,
    pub restart_button_id: String,
    /// Pixel size of one main board cell.
    pub block_size: f64,
    /// Pixel size of one preview cell.
    pub preview_block_size: f64,
    pub drop_interval_ms: f64,
    /// Fixed randomizer seed; `None` seeds from entropy.
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_canvas_id: "tetris".into(),
            preview_canvas_id: "next".into(),
            score_id: "score".into(),
            lines_id: "lines".into(),
            overlay_id: "game-over".into(),
            final_score_id: "final-score".into(),
            start_button_id: "start-button".into(),
            restart_button_id: "restart-button".into(),
            block_size: 30.0,
            preview_block_size: 20.0,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::SetupError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), crate::error::SetupError> {
        use crate::error::SetupError;
        if !(self.block_size > 0.0) || !(self.preview_block_size > 0.0) {
            return Err(SetupError::InvalidConfig("block sizes must be positive".into()));
        }
        if !(self.drop_interval_ms > 0.0) {
            return Err(SetupError::InvalidConfig("drop_interval_ms must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.drop_interval_ms, 1000.0);
        assert_eq!(cfg.board_canvas_id, "tetris");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let cfg = GameConfig { block_size: 0.0, ..GameConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = GameConfig { drop_interval_ms: f64::NAN, ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"block_size": 24, "seed": 9}"#).unwrap();
        assert_eq!(cfg.block_size, 24.0);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.preview_canvas_id, "next");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_bad_json_is_error() {
        assert!(GameConfig::from_json("{not json").is_err());
        assert!(GameConfig::from_json(r#"{"drop_interval_ms": -5}"#).is_err());
    }
}
