//! Player movement controller.
//!
//! This is the main entry point for player movement. It takes the intent
//! snapshot for a tick and advances the movement state against the ground
//! plane at z = 0.

use glam::Vec3;

use crate::math::{self, angle_vectors, YAW};

use super::config::MovementConfig;
use super::duck::update_duck;
use super::jump::update_jump;
use super::state::{InputIntent, MovementEvent, MovementFlags, MovementState};

/// Player movement controller.
///
/// Handles all player movement physics including:
/// - Ground friction and acceleration
/// - Air acceleration with a capped wish speed
/// - Jumping and ducking
/// - Split gravity with a ground-crossing sub-step
///
/// # Example
///
/// ```ignore
/// let controller = PlayerController::new(MovementConfig::default());
/// let mut state = MovementState::default();
/// controller.spawn_at(&mut state, Vec3::ZERO);
///
/// // Each frame:
/// let events = controller.step(&mut state, &intent, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl PlayerController {
    /// Create a new player controller with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MovementConfig::default())
    }

    /// Place a player at `spawn_pos`, at rest.
    ///
    /// The feet are clamped onto the ground plane and the ground latch is set
    /// when they start within the ground epsilon.
    pub fn spawn_at(&self, state: &mut MovementState, spawn_pos: Vec3) {
        let position = Vec3::new(spawn_pos.x, spawn_pos.y, spawn_pos.z.max(0.0));
        *state = MovementState {
            position,
            view_angles: state.view_angles,
            jump_origin: position,
            ..Default::default()
        };
        state
            .flags
            .set(MovementFlags::ON_GROUND, position.z <= self.config.ground_epsilon);
    }

    /// Advance player movement by one tick.
    ///
    /// The phases run in a fixed order: wish velocity, friction and
    /// acceleration (ground) or air acceleration plus the first half of
    /// gravity (air), jump, duck, then ground collision and integration.
    ///
    /// # Arguments
    ///
    /// * `state` - The player's movement state (will be modified)
    /// * `intent` - The intent snapshot for this tick
    /// * `delta_time` - Time step in seconds
    ///
    /// Returns the jump/landing events produced during the tick.
    pub fn step(
        &self,
        state: &mut MovementState,
        intent: &InputIntent,
        delta_time: f32,
    ) -> Vec<MovementEvent> {
        let delta_time = delta_time.max(0.0);
        let mut events = Vec::new();

        let on_ground = state.on_ground();
        let (wish_direction, wish_speed) = self.wish_velocity(state, intent);

        if on_ground {
            self.apply_friction(state, delta_time);
            self.accelerate(state, wish_direction, wish_speed, self.config.accelerate, delta_time);
            state.velocity.z = 0.0;
        } else {
            self.air_accelerate(state, wish_direction, wish_speed, delta_time);
            state.velocity.z -= self.config.gravity * delta_time / 2.0;
        }

        if let Some(event) = update_jump(state, intent.wants_jump(), on_ground, &self.config) {
            events.push(event);
        }

        update_duck(state, intent.wants_duck(), on_ground, delta_time, &self.config);

        let landed = self.integrate(state, delta_time);
        if !on_ground && landed {
            let distance = math::horizontal_length(state.position - state.jump_origin)
                + self.config.landing_distance_offset;
            log::info!("distance: {:.3}", distance);
            events.push(MovementEvent::Landed { distance });
        }

        events
    }

    // ========================================================================
    // Wish Velocity
    // ========================================================================

    /// Desired horizontal direction and speed from the held movement keys.
    ///
    /// Only yaw matters; pitch and roll never tilt the wish direction.
    pub fn wish_velocity(&self, state: &MovementState, intent: &InputIntent) -> (Vec3, f32) {
        let basis = angle_vectors(Vec3::new(state.view_angles[YAW], 0.0, 0.0));
        let forward = math::normalize_or_zero(Vec3::new(basis.forward.x, basis.forward.y, 0.0));
        let right = math::normalize_or_zero(Vec3::new(basis.right.x, basis.right.y, 0.0));

        let mut wish = Vec3::ZERO;
        if intent.forward {
            wish += forward * self.config.forward_speed;
        }
        if intent.back {
            wish -= forward * self.config.forward_speed;
        }
        if intent.left {
            wish -= right * self.config.side_speed;
        }
        if intent.right {
            wish += right * self.config.side_speed;
        }

        let mut wish_speed = math::clamp(math::norm(wish), 0.0, self.config.max_speed);
        let wish_direction = math::normalize_or_zero(wish);

        if state.ducked() {
            wish_speed *= self.config.duck_speed_multiplier;
        }

        (wish_direction, wish_speed)
    }

    // ========================================================================
    // Ground Movement
    // ========================================================================

    fn apply_friction(&self, state: &mut MovementState, delta_time: f32) {
        let speed = math::norm(state.velocity);
        if speed < self.config.friction_threshold {
            return;
        }

        let control = speed.max(self.config.stop_speed);
        let drop = delta_time * control * self.config.friction * self.config.surface_friction;

        let new_speed = (speed - drop).max(0.0);
        state.velocity = math::scale(state.velocity, new_speed / speed);
    }

    fn accelerate(
        &self,
        state: &mut MovementState,
        wish_direction: Vec3,
        wish_speed: f32,
        acceleration: f32,
        delta_time: f32,
    ) {
        let current_speed = math::dot(state.velocity, wish_direction);
        let add_speed = (wish_speed - current_speed).max(0.0);
        let accel_speed =
            delta_time * wish_speed * acceleration * self.config.surface_friction;

        state.velocity += wish_direction * add_speed.min(accel_speed);
    }

    // ========================================================================
    // Air Movement
    // ========================================================================

    fn air_accelerate(
        &self,
        state: &mut MovementState,
        wish_direction: Vec3,
        wish_speed: f32,
        delta_time: f32,
    ) {
        let wish_speed = math::clamp(wish_speed, 0.0, self.config.air_speed_cap);
        self.accelerate(
            state,
            wish_direction,
            wish_speed,
            self.config.air_accelerate,
            delta_time,
        );
    }

    // ========================================================================
    // Ground Collision
    // ========================================================================

    /// Resolve contact with the ground plane and move the player.
    ///
    /// A fall that would cross z = 0 inside the tick is split: the player
    /// travels to the plane, vertical velocity is dropped, and the rest of
    /// the tick is spent moving horizontally. While airborne the second half
    /// of gravity is applied after moving.
    ///
    /// Returns the new ground state, which is also stored in the flags.
    pub fn integrate(&self, state: &mut MovementState, delta_time: f32) -> bool {
        let mut remaining = delta_time;

        state.position.z = state.position.z.max(0.0);
        let mut on_ground =
            state.position.z <= self.config.ground_epsilon && state.velocity.z <= 0.0;

        if state.velocity.z < 0.0 {
            let time_to_ground = state.position.z / -state.velocity.z;
            if time_to_ground <= remaining {
                on_ground = true;
                state.position += state.velocity * time_to_ground;
                state.position.z = 0.0;
                remaining -= time_to_ground;
                state.velocity.z = 0.0;
            }
        }

        state.position += state.velocity * remaining;
        state.position.z = state.position.z.max(0.0);

        if !on_ground {
            state.velocity.z -= self.config.gravity * remaining / 2.0;
        }

        state.flags.set(MovementFlags::ON_GROUND, on_ground);
        on_ground
    }
}

// ============================================================================
// Tests
// ============================================================================
