//! Sourcemove Renderer Support
//!
//! Turns the simulator's eye position and look target into the view and
//! projection matrices a graphics backend needs. No GPU code lives here;
//! the backend is expected to upload [`FirstPersonCamera::view_projection_matrix`]
//! once per frame.

pub mod camera;

pub use camera::FirstPersonCamera;
