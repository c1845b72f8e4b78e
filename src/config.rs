//! Screen geometry and difficulty tuning
//!
//! Loaded once at startup (JSON) and validated before a session is built.
//! Fixed physics constants live in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// What decorations do while the game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecorPolicy {
    /// Everything stops on the game-over frame
    #[default]
    Frozen,
    /// Clouds, ground, particles, popups and the banner keep animating
    Animate,
}

impl DecorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecorPolicy::Frozen => "frozen",
            DecorPolicy::Animate => "animate",
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f32,
    },

    #[error("level_up_score must be at least 1")]
    ZeroLevelUpScore,

    #[error("min_spacing_ratio ({floor}) must not exceed spacing_ratio ({base})")]
    SpacingFloorAboveBase { floor: f32, base: f32 },

    #[error("no room to place a gap: gap range [{min}, {max}] is empty")]
    NoGapRoom { min: f32, max: f32 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width in pixels
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,
    /// Global size/speed multiplier; `None` derives it from the screen size
    pub scale: Option<f32>,

    // === Obstacles ===
    /// Gap height as a fraction of screen height
    pub gap_ratio: f32,
    /// Ground strip height as a fraction of screen height
    pub ground_ratio: f32,

    // === Difficulty ===
    /// Obstacle speed at level 1 (reference pixels per tick)
    pub initial_speed: f32,
    /// Spacing between obstacles at level 1, as a fraction of screen width
    pub spacing_ratio: f32,
    /// Spacing floor, as a fraction of screen width
    pub min_spacing_ratio: f32,
    /// Points per level
    pub level_up_score: u32,

    /// Decoration behavior while the game is over
    pub decor_policy: DecorPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            scale: None,

            gap_ratio: 0.25,
            ground_ratio: 0.15,

            initial_speed: 3.0,
            spacing_ratio: 0.4,
            min_spacing_ratio: 0.2,
            level_up_score: 5,

            decor_policy: DecorPolicy::Frozen,
        }
    }
}

impl GameConfig {
    /// Default tuning for a given screen size
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Effective scale factor
    pub fn scale(&self) -> f32 {
        self.scale
            .unwrap_or_else(|| (self.width / REFERENCE_WIDTH).min(self.height / REFERENCE_HEIGHT))
    }

    /// Height of the ground strip in pixels
    pub fn ground_height(&self) -> f32 {
        self.height * self.ground_ratio
    }

    /// Y coordinate of the ground line
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height()
    }

    /// Gap height in pixels (independent of level)
    pub fn gap_height(&self) -> f32 {
        self.height * self.gap_ratio
    }

    /// Obstacle speed at level 1
    pub fn base_speed(&self) -> f32 {
        self.initial_speed * self.scale()
    }

    /// Obstacle spacing at level 1
    pub fn base_spacing(&self) -> f32 {
        self.width * self.spacing_ratio
    }

    /// Obstacle spacing for a level, floored at `min_spacing_ratio`
    pub fn spacing_for_level(&self, level: u32) -> f32 {
        let shrink = level.saturating_sub(1) as f32 * SPACING_STEP * self.scale();
        (self.base_spacing() - shrink).max(self.width * self.min_spacing_ratio)
    }

    /// Allowed range for the top of the gap
    pub fn gap_top_range(&self) -> (f32, f32) {
        let margin = GAP_MARGIN * self.scale();
        let min = margin;
        let max = self.ground_line() - self.gap_height() - margin;
        (min, max)
    }

    /// Check preconditions; a session is never built from an invalid config
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("scale", self.scale())?;
        positive("initial_speed", self.initial_speed)?;

        in_range("gap_ratio", "(0, 1)", self.gap_ratio, |v| v > 0.0 && v < 1.0)?;
        in_range("ground_ratio", "[0, 1)", self.ground_ratio, |v| {
            (0.0..1.0).contains(&v)
        })?;
        in_range("spacing_ratio", "(0, 1]", self.spacing_ratio, |v| {
            v > 0.0 && v <= 1.0
        })?;
        in_range("min_spacing_ratio", "(0, 1]", self.min_spacing_ratio, |v| {
            v > 0.0 && v <= 1.0
        })?;

        if self.level_up_score == 0 {
            return Err(ConfigError::ZeroLevelUpScore);
        }

        // Spacing only ever shrinks toward the floor
        if self.min_spacing_ratio > self.spacing_ratio {
            return Err(ConfigError::SpacingFloorAboveBase {
                floor: self.min_spacing_ratio,
                base: self.spacing_ratio,
            });
        }

        let (min, max) = self.gap_top_range();
        if max < min {
            return Err(ConfigError::NoGapRoom { min, max });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn in_range(
    field: &'static str,
    range: &'static str,
    value: f32,
    ok: impl Fn(f32) -> bool,
) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, range, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scale(), 1.0);
        assert_eq!(config.ground_height(), 90.0);
        assert_eq!(config.gap_height(), 150.0);
    }

    #[test]
    fn test_scale_from_screen() {
        // Limited by the narrower axis
        let config = GameConfig::for_screen(1600.0, 900.0);
        assert_eq!(config.scale(), 1.5);

        let config = GameConfig {
            scale: Some(0.5),
            ..GameConfig::for_screen(1600.0, 900.0)
        };
        assert_eq!(config.scale(), 0.5);
    }

    #[test]
    fn test_spacing_floor() {
        let config = GameConfig::default();
        assert_eq!(config.spacing_for_level(1), 320.0);
        assert_eq!(config.spacing_for_level(2), 300.0);
        // 320 - 20 * 9 = 140, floored at 800 * 0.2
        assert_eq!(config.spacing_for_level(10), 160.0);
        assert_eq!(config.spacing_for_level(1000), 160.0);
    }

    #[test]
    fn test_rejects_negative_scale() {
        let config = GameConfig {
            scale: Some(-1.0),
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "scale", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_ratios() {
        let config = GameConfig {
            gap_ratio: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "gap_ratio", .. })
        ));

        let config = GameConfig {
            level_up_score: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroLevelUpScore)));
    }

    #[test]
    fn test_rejects_floor_above_base_spacing() {
        let config = GameConfig {
            spacing_ratio: 0.1,
            min_spacing_ratio: 0.2,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpacingFloorAboveBase { .. })
        ));

        // Equal ratios are allowed: spacing simply stays flat
        let config = GameConfig {
            spacing_ratio: 0.3,
            min_spacing_ratio: 0.3,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.spacing_for_level(1), config.spacing_for_level(5));
    }

    #[test]
    fn test_spacing_never_grows_with_level() {
        let config = GameConfig::default();
        let mut previous = config.base_spacing();
        for level in 1..40 {
            let spacing = config.spacing_for_level(level);
            assert!(spacing <= previous);
            previous = spacing;
        }
    }

    #[test]
    fn test_rejects_screen_too_short_for_gap() {
        let config = GameConfig {
            gap_ratio: 0.8,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoGapRoom { .. })));
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            GameConfig::from_json(r#"{ "width": 400, "height": 300, "decor_policy": "animate" }"#)
                .unwrap();
        assert_eq!(config.width, 400.0);
        assert_eq!(config.scale(), 0.5);
        assert_eq!(config.level_up_score, 5);
        assert_eq!(config.decor_policy, DecorPolicy::Animate);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "width": 0 }"#),
            Err(ConfigError::NotPositive { field: "width", .. })
        ));
    }
}
