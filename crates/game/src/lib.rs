//! Sourcemove Game Loop
//!
//! This crate wraps the movement simulator in a frame loop:
//!
//! - Raw input events queued and drained into per-tick intent snapshots
//! - Clamped wall-clock frame deltas
//! - The simulation driver and its collaborator traits
//! - Scripted input for headless runs
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Frame Loop                            │
//! │  ┌─────────┐   ┌────────────┐   ┌──────────┐   ┌──────────┐  │
//! │  │ Input   │──►│ Movement   │──►│ Camera   │──►│ Presenter│  │
//! │  │ queue   │   │ step       │   │ derive   │   │          │  │
//! │  └─────────┘   └────────────┘   └──────────┘   └──────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod clock;
pub mod input;
pub mod script;
pub mod simulation;

// Re-export main types
pub use clock::{Clock, FrameTimer, ManualClock, SteppedClock, SystemClock};
pub use input::{InputEvent, InputState, LookConfig};
pub use script::{ScriptError, ScriptedInput};
pub use simulation::{run, FrameOutput, FramePresenter, InputSource, Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use sourcemove_physics::{
    CameraView, InputIntent, MovementConfig, MovementEvent, MovementState, PlayerController,
};
