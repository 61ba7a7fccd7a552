//! Scripted input for headless runs.
//!
//! A script is a list of line commands turned into per-frame batches of raw
//! input events:
//!
//! ```text
//! capture            # left click: capture the pointer
//! press w            # key down
//! look 40 0          # move the pointer by (dx, dy) raw units
//! wait 32            # let 32 frames pass
//! scroll down        # one-shot scroll
//! release w          # key up
//! release-capture    # right click
//! quit               # press Q
//! ```
//!
//! Events issued before a `wait` are delivered together on the first of the
//! waited frames.

use std::collections::VecDeque;

use thiserror::Error;

use crate::input::{InputEvent, Key, KeyAction, MouseButton};
use crate::simulation::InputSource;

/// Errors from parsing an input script.
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: unknown key `{key}`")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: expected {expected}")]
    MissingArgument { line: usize, expected: &'static str },

    #[error("line {line}: invalid number `{value}`")]
    InvalidNumber { line: usize, value: String },
}

fn parse_key(name: &str, line: usize) -> Result<Key, ScriptError> {
    match name.to_ascii_lowercase().as_str() {
        "w" => Ok(Key::W),
        "s" => Ok(Key::S),
        "a" => Ok(Key::A),
        "d" => Ok(Key::D),
        "shift" | "lshift" => Ok(Key::LeftShift),
        "space" => Ok(Key::Space),
        "escape" | "esc" => Ok(Key::Escape),
        "q" => Ok(Key::Q),
        _ => Err(ScriptError::UnknownKey {
            line,
            key: name.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(value: Option<&str>, line: usize, expected: &'static str) -> Result<T, ScriptError> {
    let value = value.ok_or(ScriptError::MissingArgument { line, expected })?;
    value.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

/// An [`InputSource`] replaying a parsed script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    /// Parse a script into frames.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut frames = VecDeque::new();
        let mut pending = Vec::new();
        let mut pointer = (0.0_f64, 0.0_f64);

        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let text = raw.split('#').next().unwrap_or("").trim();
            if text.is_empty() {
                continue;
            }

            let mut words = text.split_whitespace();
            let Some(command) = words.next() else {
                continue;
            };

            match command {
                "press" | "release" => {
                    let name = words.next().ok_or(ScriptError::MissingArgument {
                        line,
                        expected: "a key name",
                    })?;
                    let action = if command == "press" {
                        KeyAction::Press
                    } else {
                        KeyAction::Release
                    };
                    pending.push(InputEvent::Key {
                        key: parse_key(name, line)?,
                        action,
                    });
                }
                "scroll" => {
                    let offset = match words.next() {
                        Some("up") => 1.0,
                        Some("down") => -1.0,
                        _ => {
                            return Err(ScriptError::MissingArgument {
                                line,
                                expected: "`up` or `down`",
                            })
                        }
                    };
                    pending.push(InputEvent::Scroll { offset });
                }
                "look" => {
                    let dx: f64 = parse_number(words.next(), line, "dx and dy")?;
                    let dy: f64 = parse_number(words.next(), line, "dx and dy")?;
                    pointer = (pointer.0 + dx, pointer.1 + dy);
                    pending.push(InputEvent::PointerMoved {
                        x: pointer.0,
                        y: pointer.1,
                    });
                }
                "capture" => pending.push(InputEvent::ButtonPressed {
                    button: MouseButton::Left,
                }),
                "release-capture" => pending.push(InputEvent::ButtonPressed {
                    button: MouseButton::Right,
                }),
                "wait" => {
                    let count: usize = parse_number(words.next(), line, "a frame count")?;
                    for _ in 0..count {
                        frames.push_back(std::mem::take(&mut pending));
                    }
                }
                "quit" => pending.push(InputEvent::Key {
                    key: Key::Q,
                    action: KeyAction::Press,
                }),
                other => {
                    return Err(ScriptError::UnknownCommand {
                        line,
                        command: other.to_string(),
                    })
                }
            }
        }

        if !pending.is_empty() {
            frames.push_back(pending);
        }

        Ok(Self { frames })
    }

    /// Frames left to replay.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<Vec<InputEvent>> {
        self.frames.pop_front()
    }
}

/// A short demo: run up to speed, strafe-jump with mouse turns, then duck
/// jump and quit.
pub const DEMO_SCRIPT: &str = "\
# pointer starts at the origin
capture
press w
wait 96

# jump and strafe right while turning right
press space
release w
press d
look 10 0
wait 1
release space
look 10 0
wait 1
look 10 0
wait 1
look 10 0
wait 1
look 10 0
wait 60

# land, then duck jump
release d
press w
wait 32
press space
wait 2
press shift
wait 60
release space
release shift
wait 32
quit
";
