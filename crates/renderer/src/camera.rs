//! First-person camera matrices for rendering.
//!
//! The world is Z-up. Matrices use OpenGL clip space (depth in [-1, 1]).

use glam::{Mat4, Vec3};

/// First-person camera state.
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    /// Eye position in world space.
    pub position: Vec3,

    /// Point the camera looks at.
    pub target: Vec3,

    /// Vertical field of view in degrees.
    pub fov: f32,

    /// Near clipping plane.
    pub near: f32,

    /// Far clipping plane.
    pub far: f32,

    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::X,
            fov: 45.0,
            near: 0.1,
            far: 4096.0,
            aspect: 1280.0 / 720.0,
        }
    }
}

impl FirstPersonCamera {
    /// Create a new camera at the given position, looking down +X.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            target: position + Vec3::X,
            ..Default::default()
        }
    }

    /// Get the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Z)
    }

    /// Get the projection matrix for rendering.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit direction from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Update camera from the player's eye and look target.
    pub fn update_from_player(&mut self, eye_position: Vec3, look_target: Vec3) {
        self.position = eye_position;
        self.target = look_target;
    }
}
