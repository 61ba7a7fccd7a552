//! Game simulation - the main game loop.
//!
//! Each frame runs strictly in sequence: drain input, integrate movement,
//! derive the camera, hand the result to the presenter. Everything happens
//! on one thread; the movement state has a single writer.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sourcemove_physics::{
    derive_camera, CameraView, ConfigError, MovementConfig, MovementEvent, MovementState,
    PlayerController,
};

use crate::clock::{Clock, FrameTimer};
use crate::input::{InputEvent, InputState, LookConfig};

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Movement physics configuration.
    pub movement: MovementConfig,

    /// Mouse look settings.
    pub look: LookConfig,

    /// Upper bound on a single frame's time step (seconds).
    pub max_frame_time: f32,

    /// Where the player starts.
    pub spawn: Vec3,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            look: LookConfig::default(),
            max_frame_time: 0.5,
            spawn: Vec3::ZERO,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;

        let positive = [
            ("max_frame_time", self.max_frame_time),
            ("look.pitch_limit", self.look.pitch_limit),
        ];
        for (name, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let finite = [
            ("look.yaw_scale", self.look.yaw_scale),
            ("look.sensitivity", self.look.sensitivity),
            ("spawn.x", self.spawn.x),
            ("spawn.y", self.spawn.y),
            ("spawn.z", self.spawn.z),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        Ok(())
    }
}

/// Result of one simulated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Frame number, starting at 1.
    pub frame: u64,

    /// Time step used for this frame.
    pub delta_time: f32,

    pub camera: CameraView,

    /// Jump/landing diagnostics from this frame.
    pub events: Vec<MovementEvent>,
}

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Frames simulated so far.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// The player's movement state.
    pub state: MovementState,

    /// Queued input and capture state.
    pub input: InputState,

    /// Movement physics controller.
    controller: PlayerController,

    close_requested: bool,
}

impl Simulation {
    /// Create a new simulation with the player spawned at `config.spawn`.
    pub fn new(config: SimulationConfig) -> Self {
        let controller = PlayerController::new(config.movement.clone());
        let mut state = MovementState::default();
        controller.spawn_at(&mut state, config.spawn);

        Self {
            frame: 0,
            input: InputState::new(config.look.clone()),
            config,
            state,
            controller,
            close_requested: false,
        }
    }

    /// Create a simulation with default configuration.
    pub fn test() -> Self {
        Self::new(SimulationConfig::default())
    }

    /// Queue raw input events for the next frame.
    pub fn push_events<I: IntoIterator<Item = InputEvent>>(&mut self, events: I) {
        self.input.extend(events);
    }

    /// Whether a close was requested; checked once per loop iteration.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Current camera for the renderer.
    pub fn camera(&self) -> CameraView {
        derive_camera(&self.state, &self.config.movement)
    }

    /// Advance the simulation by one frame.
    pub fn frame(&mut self, delta_time: f32) -> FrameOutput {
        let input = self.input.drain();
        if input.close_requested {
            self.close_requested = true;
        }

        for delta in &input.look {
            self.state
                .apply_look(delta.yaw, delta.pitch, self.config.look.pitch_limit);
        }

        let events = self.controller.step(&mut self.state, &input.intent, delta_time);
        let camera = self.camera();

        self.frame += 1;
        log::trace!(
            "frame {} dt={:.4} pos={:?} vel={:?} ground={}",
            self.frame,
            delta_time,
            self.state.position,
            self.state.velocity,
            self.state.on_ground()
        );

        FrameOutput {
            frame: self.frame,
            delta_time,
            camera,
            events,
        }
    }
}

/// Supplier of raw input events, polled once per frame.
pub trait InputSource {
    /// Events since the last poll, or `None` once the source is exhausted.
    fn poll(&mut self) -> Option<Vec<InputEvent>>;
}

/// Consumer of each frame's result (a renderer, a recorder...).
pub trait FramePresenter {
    fn present(&mut self, output: &FrameOutput);
}

/// Run frames until a close is requested or the input source runs dry.
///
/// Returns the number of frames simulated.
pub fn run<C, I, P>(simulation: &mut Simulation, clock: &mut C, source: &mut I, presenter: &mut P) -> u64
where
    C: Clock,
    I: InputSource,
    P: FramePresenter,
{
    let mut timer = FrameTimer::new(clock.now(), simulation.config.max_frame_time);
    let start_frame = simulation.frame;

    while !simulation.close_requested() {
        let delta_time = timer.tick(clock.now());
        let Some(events) = source.poll() else {
            break;
        };
        simulation.push_events(events);
        let output = simulation.frame(delta_time);
        presenter.present(&output);
    }

    simulation.frame - start_frame
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SteppedClock};
    use crate::input::{Key, KeyAction, MouseButton};

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            action: KeyAction::Press,
        }
    }

    fn capture() -> InputEvent {
        InputEvent::ButtonPressed {
            button: MouseButton::Left,
        }
    }

    struct Frames(std::vec::IntoIter<Vec<InputEvent>>);

    impl InputSource for Frames {
        fn poll(&mut self) -> Option<Vec<InputEvent>> {
            self.0.next()
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<FrameOutput>);

    impl FramePresenter for Recorder {
        fn present(&mut self, output: &FrameOutput) {
            self.0.push(output.clone());
        }
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert!(sim.state.on_ground());
        assert_eq!(sim.camera().eye, Vec3::new(0.0, 0.0, 64.0));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());

        let mut config = SimulationConfig::default();
        config.max_frame_time = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { name: "max_frame_time", .. })
        ));

        let mut config = SimulationConfig::default();
        config.movement.gravity = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_frame_advances_and_moves() {
        let mut sim = Simulation::test();
        sim.push_events([capture(), press(Key::W)]);

        let mut output = sim.frame(1.0 / 64.0);
        assert_eq!(output.frame, 1);
        for _ in 0..63 {
            output = sim.frame(1.0 / 64.0);
        }

        assert_eq!(sim.frame, 64);
        assert!(sim.state.position.x > 50.0);
        assert_eq!(output.camera, sim.camera());
    }

    #[test]
    fn test_look_applies_before_step() {
        let mut sim = Simulation::test();
        sim.push_events([
            InputEvent::PointerMoved { x: 0.0, y: 0.0 },
            capture(),
            press(Key::W),
            // Turn left by 90 degrees.
            InputEvent::PointerMoved {
                x: -90.0 / 0.099,
                y: 0.0,
            },
        ]);

        sim.frame(1.0 / 64.0);

        assert!((sim.state.yaw() - 90.0).abs() < 1e-2);
        assert!(sim.state.velocity.y > 0.0);
        assert!(sim.state.velocity.x.abs() < 1e-2);
    }

    #[test]
    fn test_pitch_is_clamped_per_event() {
        let mut sim = Simulation::test();
        sim.push_events([
            capture(),
            InputEvent::PointerMoved { x: 0.0, y: 2000.0 },
            InputEvent::PointerMoved { x: 0.0, y: 1000.0 },
        ]);

        sim.frame(0.0);

        // Clamped at 89 by the first event, then raised by 99.
        assert!((sim.state.pitch() - -10.0).abs() < 1e-3);
    }

    #[test]
    fn test_run_until_close() {
        let mut sim = Simulation::test();
        let mut clock = SteppedClock::with_rate(64);
        let mut source = Frames(
            vec![
                vec![capture(), press(Key::W)],
                vec![],
                vec![],
                vec![press(Key::Q)],
                vec![],
                vec![],
            ]
            .into_iter(),
        );
        let mut recorder = Recorder::default();

        let frames = run(&mut sim, &mut clock, &mut source, &mut recorder);

        assert_eq!(frames, 4);
        assert_eq!(recorder.0.len(), 4);
        assert!(recorder.0.iter().all(|o| o.delta_time == 1.0 / 64.0));
        assert!(sim.close_requested());
    }

    #[test]
    fn test_run_stops_when_source_is_exhausted() {
        let mut sim = Simulation::test();
        let mut clock = ManualClock::new(0.0);
        let mut source = Frames(vec![vec![], vec![]].into_iter());
        let mut recorder = Recorder::default();

        let frames = run(&mut sim, &mut clock, &mut source, &mut recorder);

        assert_eq!(frames, 2);
        assert!(recorder.0.iter().all(|o| o.delta_time == 0.0));
        assert!(!sim.close_requested());
    }

    #[test]
    fn test_scroll_jump_reaches_diagnostics() {
        let mut sim = Simulation::test();
        sim.push_events([capture(), InputEvent::Scroll { offset: -1.0 }]);

        let output = sim.frame(1.0 / 64.0);
        assert!(matches!(output.events.as_slice(), [MovementEvent::Jumped { .. }]));

        // Scroll is one-shot: nothing held, so no re-trigger on later frames.
        let mut landed = false;
        for _ in 0..200 {
            let output = sim.frame(1.0 / 64.0);
            assert!(!output
                .events
                .iter()
                .any(|e| matches!(e, MovementEvent::Jumped { .. })));
            landed |= output
                .events
                .iter()
                .any(|e| matches!(e, MovementEvent::Landed { .. }));
        }
        assert!(landed);
    }

    #[test]
    fn test_huge_pointer_delta_keeps_yaw_in_range() {
        let mut sim = Simulation::test();
        let mut script =
            crate::script::ScriptedInput::parse("capture\nlook 100000000000 0\nwait 1\n").unwrap();
        sim.push_events(script.poll().unwrap());

        sim.frame(0.01);

        assert!((-180.0..180.0).contains(&sim.state.yaw()));
        assert!(sim.state.position.is_finite());
    }

    #[test]
    fn test_determinism() {
        let script: Vec<Vec<InputEvent>> = (0..300)
            .map(|i| {
                let mut events = Vec::new();
                if i == 0 {
                    events.push(capture());
                }
                let action = if i % 40 < 20 { KeyAction::Press } else { KeyAction::Release };
                events.push(InputEvent::Key { key: Key::W, action });
                events.push(InputEvent::Key { key: Key::Space, action });
                events.push(InputEvent::PointerMoved {
                    x: (i as f64 * 3.0).sin() * 50.0,
                    y: 0.0,
                });
                events
            })
            .collect();

        let run_once = || {
            let mut sim = Simulation::test();
            for events in &script {
                sim.push_events(events.iter().copied());
                sim.frame(1.0 / 100.0);
            }
            sim.state
        };

        assert_eq!(run_once(), run_once());
    }
}
