use serde::{Deserialize, Serialize};

use crate::Params;

/// Table configuration errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Table or pocket dimension that must be positive
    #[error("Invalid {name}: {value} (must be positive)")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("Invalid friction: {0} (must be non-negative)")]
    NegativeFriction(f32),

    #[error("Invalid restitution: {0} (must be within 0..=1)")]
    InvalidRestitution(f32),

    /// Balls too large to fit on the table
    #[error("Ball radius {radius} does not fit a {width}x{height} table")]
    BallTooLarge { radius: f32, width: f32, height: f32 },
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table_width: f32,
    pub table_height: f32,
    pub pocket_radius: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_width: Params::TABLE_WIDTH,
            table_height: Params::TABLE_HEIGHT,
            pocket_radius: Params::POCKET_RADIUS,
            ball_radius: Params::BALL_RADIUS,
            ball_mass: Params::BALL_MASS,
            friction: Params::FRICTION,
            restitution: Params::RESTITUTION,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys fall back to `Params`.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> String {
        // Plain struct of floats, serialization cannot fail
        toml::to_string(self).unwrap_or_default()
    }

    /// Check the preconditions the physics engine assumes but never checks itself
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("table_width", self.table_width),
            ("table_height", self.table_height),
            ("pocket_radius", self.pocket_radius),
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
        ];
        for (name, value) in dimensions {
            // Written so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }

        if !(self.friction >= 0.0) {
            return Err(ConfigError::NegativeFriction(self.friction));
        }

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }

        if self.ball_radius * 2.0 >= self.table_width.min(self.table_height) {
            return Err(ConfigError::BallTooLarge {
                radius: self.ball_radius,
                width: self.table_width,
                height: self.table_height,
            });
        }

        Ok(())
    }

    /// Half extents of the area a ball centre may occupy
    pub fn inner_half_extents(&self) -> (f32, f32) {
        (
            self.table_width / 2.0 - self.ball_radius,
            self.table_height / 2.0 - self.ball_radius,
        )
    }
}
