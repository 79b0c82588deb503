use serde::{Deserialize, Serialize};

use super::mode::{PinchMode, TopBotMultz};
use crate::error::PinchError;

/// Configuration of the pinch processor.
///
/// Values normally come from the grid description (`MINPV` and `PINCH`);
/// missing fields fall back to [`PinchConfig::default`] when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Cells with pore volume below this value are pinch candidates.
    pub min_pore_volume: f64,
    /// Cells thinner than this (in m) are pinch candidates.
    pub thickness: f64,
    /// Which half-faces make up a pinch connection's transmissibility.
    pub trans_mode: PinchMode,
    /// Which vertical multipliers scale a pinch connection.
    pub multz_mode: PinchMode,
    /// How the top and bottom multipliers merge when `multz_mode` is TOPBOT.
    pub topbot_multz: TopBotMultz,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            min_pore_volume: 1e-6,
            thickness: 1e-3,
            trans_mode: PinchMode::TopBot,
            multz_mode: PinchMode::Top,
            topbot_multz: TopBotMultz::default(),
        }
    }
}

impl PinchConfig {
    pub fn new(
        min_pore_volume: f64,
        thickness: f64,
        trans_mode: PinchMode,
        multz_mode: PinchMode,
    ) -> Self {
        Self {
            min_pore_volume,
            thickness,
            trans_mode,
            multz_mode,
            topbot_multz: TopBotMultz::default(),
        }
    }

    pub fn with_topbot_multz(mut self, rule: TopBotMultz) -> Self {
        self.topbot_multz = rule;
        self
    }

    /// Rejects negative or non-finite thresholds.
    pub fn validate(&self) -> Result<(), PinchError> {
        for (name, value) in [
            ("min_pore_volume", self.min_pore_volume),
            ("thickness", self.thickness),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PinchError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PinchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trans_mode, PinchMode::TopBot);
        assert_eq!(config.multz_mode, PinchMode::Top);
        assert_eq!(config.topbot_multz, TopBotMultz::GeometricMean);
    }

    #[test]
    fn test_negative_thresholds_rejected() {
        let config = PinchConfig::new(-1.0, 0.001, PinchMode::TopBot, PinchMode::Top);
        assert_eq!(
            config.validate(),
            Err(PinchError::InvalidThreshold {
                name: "min_pore_volume",
                value: -1.0
            })
        );

        let config = PinchConfig::new(0.001, -0.5, PinchMode::TopBot, PinchMode::Top);
        assert!(matches!(
            config.validate(),
            Err(PinchError::InvalidThreshold { name: "thickness", .. })
        ));

        let config = PinchConfig::new(f64::NAN, 0.001, PinchMode::TopBot, PinchMode::Top);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_thresholds_allowed() {
        let config = PinchConfig::new(0.0, 0.0, PinchMode::All, PinchMode::All);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PinchConfig =
            serde_json::from_str(r#"{ "thickness": 0.5, "multz_mode": "ALL" }"#).unwrap();
        assert_eq!(config.thickness, 0.5);
        assert_eq!(config.multz_mode, PinchMode::All);
        assert_eq!(config.min_pore_volume, 1e-6);
        assert_eq!(config.trans_mode, PinchMode::TopBot);
    }
}
