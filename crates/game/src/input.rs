//! Player input handling.
//!
//! Raw platform events are queued as they arrive and drained once per tick
//! into an immutable [`InputIntent`] snapshot for the physics step, plus
//! the look deltas to apply to the view angles. Movement intents are only
//! honored while the pointer is captured.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use sourcemove_physics::InputIntent;

/// Keyboard keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    A,
    D,
    LeftShift,
    Space,
    Escape,
    Q,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One of the discrete movement intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Forward,
    Back,
    Left,
    Right,
    Duck,
    Jump,
    ScrollUp,
    ScrollDown,
}

impl Key {
    /// The movement intent bound to this key, if any.
    pub fn intent(self) -> Option<Intent> {
        match self {
            Key::W => Some(Intent::Forward),
            Key::S => Some(Intent::Back),
            Key::A => Some(Intent::Left),
            Key::D => Some(Intent::Right),
            Key::LeftShift => Some(Intent::Duck),
            Key::Space => Some(Intent::Jump),
            _ => None,
        }
    }
}

/// A raw event from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Key { key: Key, action: KeyAction },
    /// Vertical scroll offset; positive is up.
    Scroll { offset: f64 },
    /// Absolute pointer position in raw units.
    PointerMoved { x: f64, y: f64 },
    /// A mouse button went down.
    ButtonPressed { button: MouseButton },
    FocusChanged { focused: bool },
    CloseRequested,
}

/// Mouse look settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees per raw pointer unit before sensitivity.
    pub yaw_scale: f32,

    pub sensitivity: f32,

    /// Pitch is clamped to +/- this many degrees.
    pub pitch_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            yaw_scale: 0.022,
            sensitivity: 4.5,
            pitch_limit: 89.0,
        }
    }
}

impl LookConfig {
    /// Degrees of rotation per raw pointer unit.
    pub fn degrees_per_unit(&self) -> f32 {
        self.yaw_scale * self.sensitivity
    }
}

/// A look rotation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LookDelta {
    pub yaw: f32,
    pub pitch: f32,
}

/// Everything the simulation needs from one drain of the input queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Intent snapshot for this tick.
    pub intent: InputIntent,

    /// Look deltas in the order they arrived.
    pub look: Vec<LookDelta>,

    /// The user asked to quit.
    pub close_requested: bool,
}

/// Input state between ticks.
#[derive(Debug, Clone)]
pub struct InputState {
    look: LookConfig,
    captured: bool,
    intent: InputIntent,
    pointer: (f64, f64),
    baseline: (f64, f64),
    queue: VecDeque<InputEvent>,
    close_requested: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(LookConfig::default())
    }
}

impl InputState {
    pub fn new(look: LookConfig) -> Self {
        Self {
            look,
            captured: false,
            intent: InputIntent::default(),
            pointer: (0.0, 0.0),
            baseline: (0.0, 0.0),
            queue: VecDeque::new(),
            close_requested: false,
        }
    }

    /// Whether the pointer is captured.
    pub fn captured(&self) -> bool {
        self.captured
    }

    /// Current intent state, before the next drain.
    pub fn intent(&self) -> InputIntent {
        self.intent
    }

    pub fn look_config(&self) -> &LookConfig {
        &self.look
    }

    /// Queue a raw event for the next drain.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn extend<I: IntoIterator<Item = InputEvent>>(&mut self, events: I) {
        self.queue.extend(events);
    }

    /// Set or clear an intent. Ignored (forced off) while not captured.
    pub fn set_intent(&mut self, intent: Intent, active: bool) {
        let active = active && self.captured;
        let slot = match intent {
            Intent::Forward => &mut self.intent.forward,
            Intent::Back => &mut self.intent.back,
            Intent::Left => &mut self.intent.left,
            Intent::Right => &mut self.intent.right,
            Intent::Duck => &mut self.intent.duck,
            Intent::Jump => &mut self.intent.jump,
            Intent::ScrollUp => &mut self.intent.scroll_up,
            Intent::ScrollDown => &mut self.intent.scroll_down,
        };
        *slot = active;
    }

    /// Capture or release the pointer.
    ///
    /// Any change clears every intent. Capturing takes the current pointer
    /// position as the baseline so the first motion has no jump.
    pub fn set_capture(&mut self, active: bool) {
        if self.captured == active {
            return;
        }
        self.captured = active;
        if active {
            self.baseline = self.pointer;
        }
        self.intent = InputIntent::default();
        log::debug!("pointer {}", if active { "captured" } else { "released" });
    }

    /// Process every queued event and take a snapshot for one tick.
    ///
    /// One-shot scroll intents are cleared after being snapshotted.
    pub fn drain(&mut self) -> FrameInput {
        let mut look = Vec::new();

        while let Some(event) = self.queue.pop_front() {
            if let Some(delta) = self.handle_event(event) {
                look.push(delta);
            }
        }

        let intent = self.intent;
        self.intent.scroll_up = false;
        self.intent.scroll_down = false;

        FrameInput {
            intent,
            look,
            close_requested: std::mem::take(&mut self.close_requested),
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Option<LookDelta> {
        match event {
            InputEvent::Key { action: KeyAction::Repeat, .. } => {}
            InputEvent::Key { key, action } => {
                let pressed = action == KeyAction::Press;
                match key {
                    Key::Escape if pressed => self.set_capture(false),
                    Key::Q if pressed => {
                        self.set_capture(true);
                        self.request_close();
                    }
                    _ => {
                        if let Some(intent) = key.intent() {
                            self.set_intent(intent, pressed);
                        }
                    }
                }
            }
            InputEvent::Scroll { offset } => {
                if offset > 0.0 {
                    self.set_intent(Intent::ScrollUp, true);
                } else {
                    self.set_intent(Intent::ScrollDown, true);
                }
            }
            InputEvent::PointerMoved { x, y } => {
                self.pointer = (x, y);
                if !self.captured {
                    return None;
                }
                let dx = x - self.baseline.0;
                let dy = y - self.baseline.1;
                self.baseline = (x, y);

                let scale = self.look.degrees_per_unit();
                return Some(LookDelta {
                    yaw: -(dx as f32) * scale,
                    pitch: dy as f32 * scale,
                });
            }
            InputEvent::ButtonPressed { button } => match button {
                MouseButton::Left => self.set_capture(true),
                MouseButton::Right => self.set_capture(false),
                MouseButton::Middle => {}
            },
            InputEvent::FocusChanged { focused } => {
                if !focused {
                    self.set_capture(false);
                }
            }
            InputEvent::CloseRequested => self.request_close(),
        }
        None
    }

    fn request_close(&mut self) {
        log::debug!("close requested");
        self.close_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            action: KeyAction::Press,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            action: KeyAction::Release,
        }
    }

    fn captured() -> InputState {
        let mut input = InputState::default();
        input.set_capture(true);
        input
    }

    #[test]
    fn test_keys_ignored_until_captured() {
        let mut input = InputState::default();
        input.push(press(Key::W));
        assert!(!input.drain().intent.forward);

        input.push(InputEvent::ButtonPressed {
            button: MouseButton::Left,
        });
        input.push(press(Key::W));
        let frame = input.drain();
        assert!(frame.intent.forward);
        assert!(input.captured());
    }

    #[test]
    fn test_held_keys_persist_across_drains() {
        let mut input = captured();
        input.extend([press(Key::W), press(Key::Space), press(Key::LeftShift)]);

        for _ in 0..3 {
            let intent = input.drain().intent;
            assert!(intent.forward && intent.jump && intent.duck);
        }

        input.push(release(Key::Space));
        let intent = input.drain().intent;
        assert!(!intent.jump);
        assert!(intent.forward);
    }

    #[test]
    fn test_key_repeat_is_ignored() {
        let mut input = captured();
        input.push(press(Key::A));
        input.push(InputEvent::Key {
            key: Key::A,
            action: KeyAction::Repeat,
        });
        assert!(input.drain().intent.left);
    }

    #[test]
    fn test_scroll_is_one_shot() {
        let mut input = captured();
        input.push(InputEvent::Scroll { offset: 1.0 });
        input.push(InputEvent::Scroll { offset: -1.0 });

        let intent = input.drain().intent;
        assert!(intent.scroll_up);
        assert!(intent.scroll_down);

        let intent = input.drain().intent;
        assert!(!intent.scroll_up);
        assert!(!intent.scroll_down);
    }

    #[test]
    fn test_scroll_ignored_when_released() {
        let mut input = InputState::default();
        input.push(InputEvent::Scroll { offset: 1.0 });
        assert!(!input.drain().intent.scroll_up);
    }

    #[test]
    fn test_capture_change_clears_intents() {
        let mut input = captured();
        input.extend([press(Key::W), press(Key::D)]);
        assert!(input.drain().intent.has_movement_input());

        input.push(press(Key::Escape));
        let frame = input.drain();
        assert!(!input.captured());
        assert_eq!(frame.intent, InputIntent::default());

        // Re-capturing does not bring old keys back.
        input.push(InputEvent::ButtonPressed {
            button: MouseButton::Left,
        });
        assert_eq!(input.drain().intent, InputIntent::default());
    }

    #[test]
    fn test_set_capture_same_state_is_noop() {
        let mut input = captured();
        input.set_intent(Intent::Forward, true);
        input.set_capture(true);
        assert!(input.intent().forward);
    }

    #[test]
    fn test_focus_loss_and_right_click_release() {
        let mut input = captured();
        input.push(InputEvent::FocusChanged { focused: false });
        input.drain();
        assert!(!input.captured());

        input.set_capture(true);
        input.push(InputEvent::ButtonPressed {
            button: MouseButton::Right,
        });
        input.drain();
        assert!(!input.captured());
    }

    #[test]
    fn test_pointer_motion_produces_look() {
        let mut input = InputState::default();
        // Motion before capture only moves the baseline.
        input.push(InputEvent::PointerMoved { x: 100.0, y: 100.0 });
        assert!(input.drain().look.is_empty());

        input.set_capture(true);
        input.push(InputEvent::PointerMoved { x: 110.0, y: 95.0 });
        let look = input.drain().look;

        let scale = input.look_config().degrees_per_unit();
        assert_eq!(look.len(), 1);
        assert!((scale - 0.099).abs() < 1e-6);
        assert!((look[0].yaw - -0.99).abs() < 1e-5);
        assert!((look[0].pitch - -0.495).abs() < 1e-5);
    }

    #[test]
    fn test_quit_captures_and_requests_close() {
        let mut input = InputState::default();
        input.push(press(Key::Q));
        let frame = input.drain();
        assert!(frame.close_requested);
        assert!(input.captured());

        assert!(!input.drain().close_requested);
    }

    #[test]
    fn test_degrees_per_unit() {
        let look = LookConfig::default();
        assert!((look.degrees_per_unit() - 0.099).abs() < 1e-6);
    }
}
