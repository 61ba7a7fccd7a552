//! Vector and angle helpers used by the movement code.
//!
//! Angles are in degrees and stored as (yaw, pitch, roll). The world is
//! Z-up: yaw rotates around +Z, positive pitch looks down.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Index of yaw inside an angle vector.
pub const YAW: usize = 0;
/// Index of pitch inside an angle vector.
pub const PITCH: usize = 1;
/// Index of roll inside an angle vector.
pub const ROLL: usize = 2;

/// Orthonormal basis derived from a set of view angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Convert (yaw, pitch, roll) degrees into forward/right/up vectors.
///
/// Forward depends on yaw and pitch only; right and up take roll into
/// account.
pub fn angle_vectors(angles: Vec3) -> Basis {
    let (sy, cy) = angles[YAW].to_radians().sin_cos();
    let (sp, cp) = angles[PITCH].to_radians().sin_cos();
    let (sr, cr) = angles[ROLL].to_radians().sin_cos();

    Basis {
        forward: Vec3::new(cp * cy, cp * sy, -sp),
        right: Vec3::new(
            -sr * sp * cy + cr * sy,
            -sr * sp * sy - cr * cy,
            -sr * cp,
        ),
        up: Vec3::new(
            cr * sp * cy + sr * sy,
            cr * sp * sy - sr * cy,
            cr * cp,
        ),
    }
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

/// Euclidean length.
#[inline]
pub fn norm(v: Vec3) -> f32 {
    v.length()
}

#[inline]
pub fn scale(v: Vec3, s: f32) -> Vec3 {
    v * s
}

/// Clamp a scalar into `[min, max]`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Normalize `v`, or return the zero vector when it has no length.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    if v.length() < f32::EPSILON {
        Vec3::ZERO
    } else {
        v.normalize()
    }
}

/// Length of the XY component (speed along the ground plane).
#[inline]
pub fn horizontal_length(v: Vec3) -> f32 {
    Vec2::new(v.x, v.y).length()
}

/// Wrap a yaw angle into `[-180, 180)`.
///
/// Non-finite input comes back as NaN.
pub fn wrap_yaw(yaw: f32) -> f32 {
    let wrapped = (yaw + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}
