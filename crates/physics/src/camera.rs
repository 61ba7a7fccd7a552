//! Camera derivation from the movement state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::movement::{MovementConfig, MovementState};

/// Where the eye is and what it looks at, in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    /// Eye position (feet plus eye height).
    pub eye: Vec3,

    /// A point one unit in front of the eye along the view direction.
    pub look_target: Vec3,
}

impl CameraView {
    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.look_target - self.eye
    }
}

/// Compute the eye position and look target for the renderer.
///
/// The eye sits `eye_height - duck_eye_drop * duck_amount` above the feet.
pub fn derive_camera(state: &MovementState, config: &MovementConfig) -> CameraView {
    let eye = state.eye_position(config);
    CameraView {
        eye,
        look_target: eye + state.look_direction(),
    }
}
