use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pinch option as read from a grid description (`PINCH` items 4 and 5).
///
/// The same enumeration drives two independent policies:
/// - as the *transmissibility mode* it selects which half-faces enter the
///   series sum for a pinch connection,
/// - as the *MULTZ mode* it selects which vertical multipliers scale it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinchMode {
    /// Every cell along the pinched run takes part.
    All,
    /// The active cells bounding the run (top and bottom).
    TopBot,
    /// Only the active cell above the run.
    Top,
}

impl PinchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PinchMode::All => "ALL",
            PinchMode::TopBot => "TOPBOT",
            PinchMode::Top => "TOP",
        }
    }
}

impl fmt::Display for PinchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PinchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(PinchMode::All),
            "TOPBOT" => Ok(PinchMode::TopBot),
            "TOP" => Ok(PinchMode::Top),
            other => anyhow::bail!("unknown pinch mode '{other}' (expected ALL, TOPBOT or TOP)"),
        }
    }
}

/// Rule for merging the top and bottom MULTZ values under
/// [`PinchMode::TopBot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopBotMultz {
    /// `m_top * m_bot`
    Product,
    /// `sqrt(m_top * m_bot)`
    #[default]
    GeometricMean,
    /// `2 / (1/m_top + 1/m_bot)`; zero if either multiplier is zero.
    Harmonic,
}

impl TopBotMultz {
    pub fn combine(self, top: f64, bottom: f64) -> f64 {
        match self {
            TopBotMultz::Product => top * bottom,
            TopBotMultz::GeometricMean => (top * bottom).sqrt(),
            TopBotMultz::Harmonic => {
                if top <= 0.0 || bottom <= 0.0 {
                    0.0
                } else {
                    2.0 / (1.0 / top + 1.0 / bottom)
                }
            }
        }
    }
}

impl FromStr for TopBotMultz {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PRODUCT" => Ok(TopBotMultz::Product),
            "GEOMETRIC_MEAN" | "GEOMETRIC" => Ok(TopBotMultz::GeometricMean),
            "HARMONIC" => Ok(TopBotMultz::Harmonic),
            other => anyhow::bail!("unknown TOPBOT multiplier rule '{other}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deck_keywords() {
        assert_eq!("TOPBOT".parse::<PinchMode>().unwrap(), PinchMode::TopBot);
        assert_eq!("top".parse::<PinchMode>().unwrap(), PinchMode::Top);
        assert_eq!(" All ".parse::<PinchMode>().unwrap(), PinchMode::All);
        assert!("BOTTOM".parse::<PinchMode>().is_err());
    }

    #[test]
    fn test_display_matches_keyword() {
        for mode in [PinchMode::All, PinchMode::TopBot, PinchMode::Top] {
            assert_eq!(mode.to_string().parse::<PinchMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_uses_keywords() {
        assert_eq!(serde_json::to_string(&PinchMode::TopBot).unwrap(), "\"TOPBOT\"");
        assert_eq!(
            serde_json::to_string(&TopBotMultz::GeometricMean).unwrap(),
            "\"GEOMETRIC_MEAN\""
        );
        let mode: PinchMode = serde_json::from_str("\"TOP\"").unwrap();
        assert_eq!(mode, PinchMode::Top);
    }

    #[test]
    fn test_topbot_multz_rules() {
        assert!((TopBotMultz::Product.combine(2.0, 8.0) - 16.0).abs() < 1e-12);
        assert!((TopBotMultz::GeometricMean.combine(2.0, 8.0) - 4.0).abs() < 1e-12);
        assert!((TopBotMultz::Harmonic.combine(2.0, 8.0) - 3.2).abs() < 1e-12);
        assert_eq!(TopBotMultz::Harmonic.combine(0.0, 8.0), 0.0);
        // All rules agree on unit multipliers.
        for rule in [TopBotMultz::Product, TopBotMultz::GeometricMean, TopBotMultz::Harmonic] {
            assert!((rule.combine(1.0, 1.0) - 1.0).abs() < 1e-12);
        }
        assert_eq!("geometric-mean".parse::<TopBotMultz>().unwrap(), TopBotMultz::GeometricMean);
    }
}
