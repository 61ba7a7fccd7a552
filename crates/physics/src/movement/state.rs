//! Movement state and input structures.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::{self, PITCH, ROLL, YAW};

use super::config::MovementConfig;

/// Latches describing the player's current movement state.
///
/// These are transient bookkeeping bits, re-derived every tick, as opposed
/// to the physical quantities stored alongside them in [`MovementState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlags(pub u8);

impl MovementFlags {
    /// Player is touching the ground plane.
    pub const ON_GROUND: u8 = 1 << 0;

    /// Player is fully ducked.
    pub const DUCKED: u8 = 1 << 1;

    /// Jump was wanted on the previous tick (edge detection).
    pub const JUMP_HELD: u8 = 1 << 2;

    /// Check if a flag is set.
    #[inline]
    pub fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    #[inline]
    pub fn on_ground(self) -> bool {
        self.has(Self::ON_GROUND)
    }

    #[inline]
    pub fn ducked(self) -> bool {
        self.has(Self::DUCKED)
    }

    #[inline]
    pub fn jump_held(self) -> bool {
        self.has(Self::JUMP_HELD)
    }
}

/// Complete movement state for the simulated player.
///
/// Persistent quantities are position, velocity, view angles and duck
/// amount. The flags and `jump_origin` are latches the integrator keeps
/// between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Feet position in world space. Never below the ground plane.
    pub position: Vec3,

    /// Velocity in world space (units/second).
    pub velocity: Vec3,

    /// View angles in degrees: (yaw, pitch, roll).
    ///
    /// - Yaw: wrapped into [-180, 180)
    /// - Pitch: clamped to the configured limit, positive looks down
    /// - Roll: unused
    pub view_angles: Vec3,

    /// Ground/duck/jump latches.
    pub flags: MovementFlags,

    /// Duck progress (0.0 = standing, 1.0 = fully ducked).
    pub duck_amount: f32,

    /// Where the last jump started. Only used for the landing report.
    pub jump_origin: Vec3,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            view_angles: Vec3::ZERO,
            flags: MovementFlags::default(),
            duck_amount: 0.0,
            jump_origin: Vec3::ZERO,
        }
    }
}

impl MovementState {
    /// Create a new movement state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.flags.on_ground()
    }

    #[inline]
    pub fn ducked(&self) -> bool {
        self.flags.ducked()
    }

    #[inline]
    pub fn jump_latched(&self) -> bool {
        self.flags.jump_held()
    }

    pub fn yaw(&self) -> f32 {
        self.view_angles[YAW]
    }

    pub fn pitch(&self) -> f32 {
        self.view_angles[PITCH]
    }

    /// Apply a look delta in degrees, wrapping yaw and clamping pitch.
    ///
    /// Non-finite deltas are dropped so the view angles stay finite.
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32, pitch_limit: f32) {
        if !yaw_delta.is_finite() || !pitch_delta.is_finite() {
            log::debug!("dropping non-finite look delta ({yaw_delta}, {pitch_delta})");
            return;
        }
        self.view_angles[YAW] = math::wrap_yaw(self.view_angles[YAW] + yaw_delta);
        self.view_angles[PITCH] =
            math::clamp(self.view_angles[PITCH] + pitch_delta, -pitch_limit, pitch_limit);
        self.view_angles[ROLL] = 0.0;
    }

    /// Eye position for camera placement.
    pub fn eye_position(&self, config: &MovementConfig) -> Vec3 {
        self.position + Vec3::new(0.0, 0.0, config.eye_height_at(self.duck_amount))
    }

    /// Full look direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        math::angle_vectors(self.view_angles).forward
    }

    /// Current speed along the ground plane.
    pub fn horizontal_speed(&self) -> f32 {
        math::horizontal_length(self.velocity)
    }
}

/// Snapshot of the movement intents for a single tick.
///
/// Held keys stay set for as long as the key is down. The scroll intents
/// are one-shot: they appear in exactly one snapshot per scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub duck: bool,
    pub jump: bool,
    /// Scroll wheel up; acts as a one-tick duck.
    pub scroll_up: bool,
    /// Scroll wheel down; acts as a one-tick jump.
    pub scroll_down: bool,
}

impl InputIntent {
    /// Jump key held or scrolled down this tick.
    #[inline]
    pub fn wants_jump(&self) -> bool {
        self.jump || self.scroll_down
    }

    /// Duck key held or scrolled up this tick.
    #[inline]
    pub fn wants_duck(&self) -> bool {
        self.duck || self.scroll_up
    }

    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Diagnostic events produced by a movement step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementEvent {
    /// A jump started. `prespeed` is the horizontal speed at take-off.
    Jumped { prespeed: f32, origin: Vec3 },

    /// The player touched down. `distance` is the horizontal distance from
    /// the jump origin plus the configured landing offset.
    Landed { distance: f32 },
}
