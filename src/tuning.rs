//! Data-driven game balance
//!
//! Every reference-layout dimension and every balance constant lives here so
//! a JSON document can re-tune the game without touching the simulation.
//! Distances are in reference pixels (a 600x450 surface) and speeds are in
//! pixels per simulation step.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::palette::Palette;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Surface size the entity dimensions below were authored for
    pub reference_width: f32,
    pub reference_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Paddle top sits this far above the bottom edge
    pub paddle_bottom_offset: f32,

    pub ball_radius: f32,
    /// Per-axis launch speed; the launch vector is (+base, -base)
    pub ball_base_speed: f32,
    /// Ball center sits this far above the bottom edge at launch
    pub ball_bottom_offset: f32,

    pub brick_columns: usize,
    pub brick_rows: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    /// Minimum gap between the surface top and the first brick row
    pub brick_offset_top: f32,
    /// Fraction of the surface height the grid is centered in
    pub brick_region_fraction: f32,

    pub palette: Palette,
    /// Probability that a brick carries a coin
    pub coin_chance: f64,
    pub coin_multiplier: u32,
    /// Awarded when a brick somehow carries no point value
    pub default_brick_points: u32,

    pub starting_lives: u8,
    /// Every time the score passes a multiple of this, the ball speeds up
    pub speedup_every: u64,
    pub speedup_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_width: 600.0,
            reference_height: 450.0,

            paddle_width: 125.0,
            paddle_height: 25.0,
            paddle_speed: 8.0,
            paddle_bottom_offset: 30.0,

            ball_radius: 8.0,
            ball_base_speed: 4.0,
            ball_bottom_offset: 50.0,

            brick_columns: 9,
            brick_rows: 5,
            brick_width: 60.0,
            brick_height: 20.0,
            brick_padding: 5.0,
            brick_offset_top: 60.0,
            brick_region_fraction: 0.3,

            palette: Palette::default(),
            coin_chance: 0.05,
            coin_multiplier: 2,
            default_brick_points: 10,

            starting_lives: 3,
            speedup_every: 100,
            speedup_factor: 1.05,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.reference_width <= 0.0 || self.reference_height <= 0.0 {
            return Err(invalid("reference_width", "reference surface must be non-empty"));
        }
        if self.brick_columns == 0 || self.brick_rows == 0 {
            return Err(invalid("brick_columns", "grid needs at least one column and row"));
        }
        if self.palette.is_empty() {
            return Err(invalid("palette", "palette needs at least one entry"));
        }
        if !(0.0..=1.0).contains(&self.coin_chance) {
            return Err(invalid("coin_chance", "must be a probability in 0..=1"));
        }
        if self.speedup_every == 0 {
            return Err(invalid("speedup_every", "threshold must be positive"));
        }
        if self.speedup_factor < 1.0 {
            return Err(invalid("speedup_factor", "ball must never slow down"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "need at least one life"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5 }"#).unwrap();
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.brick_columns, 9);
        assert_eq!(tuning.palette.len(), 5);
    }

    #[test]
    fn test_rejects_broken_documents() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "brick_rows": 0 }"#),
            Err(ConfigError::Invalid { field: "brick_columns", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "speedup_factor": 0.5 }"#),
            Err(ConfigError::Invalid { field: "speedup_factor", .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_palette_colors() {
        let json = Tuning::default().to_json().unwrap();
        assert!(json.contains("#F0B90B"));
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
