//! Movement configuration constants.
//!
//! All movement parameters are grouped here for easy tuning. Defaults are
//! the classic Source values, in Hammer units (1 unit ≈ 1 inch).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported when validating a tuning.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be in (0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
}

/// Configuration for player movement physics.
///
/// Distances are in units, time in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Speeds
    // ========================================================================
    /// Cap on wish speed (units/second).
    pub max_speed: f32,

    /// Wish speed contributed by the forward/back keys.
    pub forward_speed: f32,

    /// Wish speed contributed by the strafe keys.
    pub side_speed: f32,

    /// Wish speed cap while airborne.
    pub air_speed_cap: f32,

    /// Wish speed multiplier while fully ducked.
    pub duck_speed_multiplier: f32,

    // ========================================================================
    // Physics
    // ========================================================================
    /// Gravity acceleration (units/second²).
    pub gravity: f32,

    /// Upward velocity given by a jump (units/second).
    pub jump_impulse: f32,

    /// Ground friction coefficient.
    pub friction: f32,

    /// Friction scale of the surface being walked on.
    pub surface_friction: f32,

    /// Speeds below this are treated as `stop_speed` when computing friction.
    pub stop_speed: f32,

    /// Friction is skipped entirely below this speed.
    pub friction_threshold: f32,

    pub accelerate: f32,

    pub air_accelerate: f32,

    /// Height under which a non-rising player counts as grounded.
    pub ground_epsilon: f32,

    // ========================================================================
    // Ducking
    // ========================================================================
    /// Seconds for a full grounded duck transition.
    pub duck_time: f32,

    /// Vertical jump of the feet when ducking or unducking in the air.
    pub duck_height_offset: f32,

    // ========================================================================
    // View
    // ========================================================================
    /// Eye height above the feet when standing.
    pub eye_height: f32,

    /// How far the eye drops at full duck.
    pub duck_eye_drop: f32,

    // ========================================================================
    // Diagnostics
    // ========================================================================
    /// Added to the measured jump distance when reporting a landing.
    pub landing_distance_offset: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 250.0,
            forward_speed: 450.0,
            side_speed: 450.0,
            air_speed_cap: 30.0,
            duck_speed_multiplier: 0.34,

            gravity: 800.0,
            jump_impulse: 301.993377, // sqrt(2 * 800 * 57)
            friction: 4.0,
            surface_friction: 1.0,
            stop_speed: 100.0,
            friction_threshold: 0.1,
            accelerate: 5.0,
            air_accelerate: 100.0,
            ground_epsilon: 0.1,

            duck_time: 0.125,
            duck_height_offset: 9.0,

            eye_height: 64.0,
            duck_eye_drop: 18.0,

            landing_distance_offset: 32.0,
        }
    }
}

impl MovementConfig {
    /// Same tuning, but with a jump impulse that reaches `height` units.
    pub fn with_jump_height(height: f32) -> Self {
        let mut config = Self::default();
        config.jump_impulse = (2.0 * config.gravity * height).sqrt();
        config
    }

    /// Apex height reached by a standing jump with this tuning.
    pub fn jump_height(&self) -> f32 {
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity)
    }

    /// Eye height above the feet for a given duck amount.
    pub fn eye_height_at(&self, duck_amount: f32) -> f32 {
        self.eye_height - duck_amount * self.duck_eye_drop
    }

    /// Check that every value is usable by the integrator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_speed", self.max_speed),
            ("gravity", self.gravity),
            ("duck_time", self.duck_time),
            ("eye_height", self.eye_height),
        ];
        let non_negative = [
            ("forward_speed", self.forward_speed),
            ("side_speed", self.side_speed),
            ("air_speed_cap", self.air_speed_cap),
            ("jump_impulse", self.jump_impulse),
            ("friction", self.friction),
            ("surface_friction", self.surface_friction),
            ("stop_speed", self.stop_speed),
            ("friction_threshold", self.friction_threshold),
            ("accelerate", self.accelerate),
            ("air_accelerate", self.air_accelerate),
            ("ground_epsilon", self.ground_epsilon),
            ("duck_height_offset", self.duck_height_offset),
            ("duck_eye_drop", self.duck_eye_drop),
            ("landing_distance_offset", self.landing_distance_offset),
        ];

        for &(name, value) in positive.iter().chain(non_negative.iter()) {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        let multiplier = self.duck_speed_multiplier;
        if !(multiplier > 0.0 && multiplier <= 1.0) {
            return Err(ConfigError::OutOfUnitRange {
                name: "duck_speed_multiplier",
                value: multiplier,
            });
        }

        Ok(())
    }
}
