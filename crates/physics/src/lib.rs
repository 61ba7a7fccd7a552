//! Sourcemove Physics Engine
//!
//! A deterministic first-person movement simulator in the style of the
//! Source engine: ground friction, acceleration and air acceleration,
//! jumping and ducking, against a single flat ground plane at z = 0.
//!
//! # Architecture
//!
//! - **Math**: vector helpers and yaw/pitch/roll to basis conversion
//! - **Movement**: the per-tick integrator driven by input intents
//! - **Camera**: eye position and look target derived from movement state
//!
//! # Design Principles
//!
//! 1. **Determinism**: Same inputs always produce same outputs
//! 2. **No globals**: every tuning value lives in [`MovementConfig`]
//! 3. **Total functions**: degenerate inputs are clamped, never errors

pub mod camera;
pub mod math;
pub mod movement;

// Re-export commonly used types
pub use camera::{derive_camera, CameraView};
pub use math::{angle_vectors, Basis};
pub use movement::{
    ConfigError, InputIntent, MovementConfig, MovementEvent, MovementFlags, MovementState,
    PlayerController,
};
