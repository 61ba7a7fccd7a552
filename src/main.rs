//! Sourcemove - headless entry point.
//!
//! Replays an input script through the movement simulator at a fixed frame
//! rate and logs the jump/landing diagnostics.
//!
//! ```text
//! sourcemove [--config <movement.json>] [--script <input.txt>] [--rate <fps>]
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use sourcemove_game::{
    run, FrameOutput, FramePresenter, MovementEvent, ScriptedInput, Simulation, SimulationConfig,
    SteppedClock,
};
use sourcemove_renderer::FirstPersonCamera;

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    rate: u32,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        script: None,
        rate: 100,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().context("--config needs a path")?.into());
            }
            "--script" => {
                args.script = Some(iter.next().context("--script needs a path")?.into());
            }
            "--rate" => {
                let value = iter.next().context("--rate needs a number")?;
                args.rate = value
                    .parse()
                    .with_context(|| format!("invalid frame rate `{value}`"))?;
                if args.rate == 0 {
                    bail!("frame rate must be positive");
                }
            }
            other => bail!("unknown argument `{other}`"),
        }
    }

    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimulationConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn load_script(path: Option<&PathBuf>) -> Result<ScriptedInput> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => sourcemove_game::script::DEMO_SCRIPT.to_string(),
    };
    Ok(ScriptedInput::parse(&text)?)
}

/// Stands in for the graphics backend: keeps the camera matrices current
/// and tallies diagnostics.
struct HeadlessPresenter {
    camera: FirstPersonCamera,
    jumps: usize,
    best_distance: f32,
}

impl FramePresenter for HeadlessPresenter {
    fn present(&mut self, output: &FrameOutput) {
        self.camera
            .update_from_player(output.camera.eye, output.camera.look_target);
        log::trace!(
            "frame {} view_projection={:?}",
            output.frame,
            self.camera.view_projection_matrix()
        );

        for event in &output.events {
            match event {
                MovementEvent::Jumped { .. } => self.jumps += 1,
                MovementEvent::Landed { distance } => {
                    self.best_distance = self.best_distance.max(*distance);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;
    let mut source = load_script(args.script.as_ref())?;

    let mut simulation = Simulation::new(config);
    let mut clock = SteppedClock::with_rate(args.rate);
    let mut presenter = HeadlessPresenter {
        camera: FirstPersonCamera::default(),
        jumps: 0,
        best_distance: 0.0,
    };

    log::info!("replaying {} frames at {} fps", source.remaining(), args.rate);
    let frames = run(&mut simulation, &mut clock, &mut source, &mut presenter);

    let state = &simulation.state;
    log::info!(
        "{} frames, {} jumps, best distance {:.3}",
        frames,
        presenter.jumps,
        presenter.best_distance
    );
    log::info!(
        "final position {:?} speed {:.3} angles {:?}",
        state.position,
        state.horizontal_speed(),
        state.view_angles
    );

    Ok(())
}
