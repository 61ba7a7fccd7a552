//! Duck state machine.
//!
//! On the ground ducking is a ramp: `duck_amount` moves toward 1.0 (or back
//! to 0.0) at `1 / duck_time` per second and the ducked latch flips only at
//! the end of the ramp. In the air it is a step: the feet are pulled up by
//! `duck_height_offset` in a single tick, and dropped back down by the same
//! amount when the player unducks with enough room below.

use super::config::MovementConfig;
use super::state::{MovementFlags, MovementState};

/// Advance the duck state for one tick.
///
/// `on_ground` is the ground state at the start of the tick.
pub(crate) fn update_duck(
    state: &mut MovementState,
    wants_duck: bool,
    on_ground: bool,
    delta_time: f32,
    config: &MovementConfig,
) {
    let rate = delta_time / config.duck_time;

    match (wants_duck, on_ground) {
        (true, true) => {
            state.duck_amount = (state.duck_amount + rate).clamp(0.0, 1.0);
            if state.duck_amount == 1.0 {
                state.flags.set(MovementFlags::DUCKED, true);
            }
        }
        (true, false) => {
            if !state.ducked() {
                state.position.z += config.duck_height_offset;
                state.flags.set(MovementFlags::DUCKED, true);
                state.duck_amount = 1.0;
                log::debug!("air duck at z={:.3}", state.position.z);
            }
        }
        (false, true) => {
            state.duck_amount = (state.duck_amount - rate).clamp(0.0, 1.0);
            if state.duck_amount == 0.0 {
                state.flags.set(MovementFlags::DUCKED, false);
            }
        }
        (false, false) => {
            if state.ducked() && state.position.z >= config.duck_height_offset {
                state.position.z -= config.duck_height_offset;
                state.flags.set(MovementFlags::DUCKED, false);
                state.duck_amount = 0.0;
                log::debug!("air unduck at z={:.3}", state.position.z);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const DT: f32 = 1.0 / 64.0;

    #[test]
    fn test_ground_duck_ramps_in_duck_time() {
        let config = MovementConfig::default();
        let mut state = MovementState::new(Vec3::ZERO);
        let ticks = (config.duck_time / DT) as usize;
        assert_eq!(ticks, 8);

        let mut previous = state.duck_amount;
        for tick in 1..=ticks {
            update_duck(&mut state, true, true, DT, &config);
            assert!(state.duck_amount > previous, "duck amount must rise every tick");
            assert!(state.duck_amount <= 1.0);
            assert_eq!(state.ducked(), tick == ticks, "ducked only at the end, tick {tick}");
            previous = state.duck_amount;
        }
        assert_eq!(state.duck_amount, 1.0);

        // Holding longer keeps it saturated.
        update_duck(&mut state, true, true, DT, &config);
        assert_eq!(state.duck_amount, 1.0);
        assert!(state.ducked());
    }

    #[test]
    fn test_ground_unduck_ramps_back() {
        let config = MovementConfig::default();
        let mut state = MovementState::new(Vec3::ZERO);
        state.duck_amount = 1.0;
        state.flags.set(MovementFlags::DUCKED, true);

        let mut previous = state.duck_amount;
        for tick in 1..=8 {
            update_duck(&mut state, false, true, DT, &config);
            assert!(state.duck_amount < previous);
            assert!(state.duck_amount >= 0.0);
            assert_eq!(state.ducked(), tick != 8);
            previous = state.duck_amount;
        }
        assert_eq!(state.duck_amount, 0.0);
    }

    #[test]
    fn test_partial_duck_is_not_ducked() {
        let config = MovementConfig::default();
        let mut state = MovementState::new(Vec3::ZERO);

        update_duck(&mut state, true, true, DT, &config);
        update_duck(&mut state, true, true, DT, &config);
        assert_eq!(state.duck_amount, 0.25);
        assert!(!state.ducked());
    }

    #[test]
    fn test_air_duck_is_a_step() {
        let config = MovementConfig::default();
        let mut state = MovementState::new(Vec3::new(0.0, 0.0, 40.0));

        update_duck(&mut state, true, false, DT, &config);
        assert_eq!(state.position.z, 49.0);
        assert_eq!(state.duck_amount, 1.0);
        assert!(state.ducked());

        // Already ducked: no further offset.
        update_duck(&mut state, true, false, DT, &config);
        assert_eq!(state.position.z, 49.0);

        update_duck(&mut state, false, false, DT, &config);
        assert_eq!(state.position.z, 40.0);
        assert_eq!(state.duck_amount, 0.0);
        assert!(!state.ducked());
    }

    #[test]
    fn test_air_unduck_needs_room() {
        let config = MovementConfig::default();
        let mut state = MovementState::new(Vec3::new(0.0, 0.0, 5.0));
        state.duck_amount = 1.0;
        state.flags.set(MovementFlags::DUCKED, true);

        update_duck(&mut state, false, false, DT, &config);
        assert_eq!(state.position.z, 5.0);
        assert!(state.ducked());
        assert_eq!(state.duck_amount, 1.0);
    }
}
