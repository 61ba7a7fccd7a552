//! Jump triggering.
//!
//! A jump fires on the rising edge of the jump want, and only while on the
//! ground. Holding the key through a landing does not jump again; the
//! player has to release and press.

use super::config::MovementConfig;
use super::state::{MovementEvent, MovementFlags, MovementState};

/// Update the jump latch and launch the player on a fresh press.
///
/// `on_ground` is the ground state at the start of the tick. Returns the
/// take-off event when a jump was performed.
pub(crate) fn update_jump(
    state: &mut MovementState,
    wants_jump: bool,
    on_ground: bool,
    config: &MovementConfig,
) -> Option<MovementEvent> {
    let just_pressed = wants_jump && !state.jump_latched();
    state.flags.set(MovementFlags::JUMP_HELD, wants_jump);

    if !(on_ground && just_pressed) {
        return None;
    }

    let prespeed = state.horizontal_speed();
    state.jump_origin = state.position;
    state.velocity.z = config.jump_impulse;

    log::info!("prespeed: {:.3}", prespeed);

    Some(MovementEvent::Jumped {
        prespeed,
        origin: state.jump_origin,
    })
}
