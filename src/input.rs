//! Keyboard and touch mapping
//!
//! Maps raw browser input to session [`Command`]s. Player commands are only
//! produced while playing.

use crate::sim::{Command, GamePhase};

/// Map a `KeyboardEvent.code` to a command
pub fn key_command(code: &str, phase: GamePhase) -> Option<Command> {
    match (code, phase) {
        ("Space", GamePhase::Playing) => Some(Command::Jump),
        ("ArrowDown", GamePhase::Playing) => Some(Command::Slide),
        ("ArrowLeft", GamePhase::Playing) => Some(Command::MoveLeft),
        ("ArrowRight", GamePhase::Playing) => Some(Command::MoveRight),
        ("Escape", GamePhase::Playing) => Some(Command::Pause),
        ("Escape", GamePhase::Paused) => Some(Command::Resume),
        _ => None,
    }
}

/// Map a touch to a command by screen zone
///
/// `x` and `y` are fractions of the canvas size. Left third moves left, right
/// third moves right; the middle column jumps in its upper half and slides in
/// its lower half.
pub fn touch_command(x: f32, y: f32, phase: GamePhase) -> Option<Command> {
    if phase != GamePhase::Playing {
        return None;
    }
    let command = if x < 1.0 / 3.0 {
        Command::MoveLeft
    } else if x > 2.0 / 3.0 {
        Command::MoveRight
    } else if y < 0.5 {
        Command::Jump
    } else {
        Command::Slide
    };
    Some(command)
}
