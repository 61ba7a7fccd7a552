//! Player movement physics system.
//!
//! This module implements Source-style FPS movement with:
//!
//! - Ground friction and acceleration
//! - Air acceleration with a low wish-speed cap (air strafing)
//! - Edge-triggered jumping
//! - Ramped ducking on the ground, instant ducking in the air
//! - Split gravity with a ground-crossing sub-step against the z = 0 plane
//!
//! # Design
//!
//! Movement is controlled by the [`PlayerController`] which takes an
//! [`InputIntent`] snapshot and updates the player's [`MovementState`].
//!
//! A step is a pure function of the state, the intent and the time step:
//! the same sequence of inputs always produces the same trajectory.

mod config;
mod controller;
mod duck;
mod jump;
mod state;

pub use config::{ConfigError, MovementConfig};
pub use controller::PlayerController;
pub use state::{InputIntent, MovementEvent, MovementFlags, MovementState};
