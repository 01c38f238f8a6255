//! Error types
//!
//! Gameplay itself never fails: invalid commands are no-ops and game over is a
//! regular phase. Errors only come from loading tuning data and from the
//! invariant checks run after each tick.

use std::fmt;

/// Rejected tuning data
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A value parsed but lies outside its usable range
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid tuning JSON: {err}"),
            Self::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "tuning field `{field}` = {value} (expected {expected})"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// A session invariant that no sequence of commands should be able to break
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvariantViolation {
    ComboOutOfRange { combo: f32 },
    MaxComboBelowCombo { combo: f32, max_combo: f32 },
    SpeedOutOfRange { speed: f32 },
    SpeedDistanceMismatch { speed: f32, distance: f32 },
    LaneOutOfRange { lane: u8 },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComboOutOfRange { combo } => write!(f, "combo {combo} outside [1, 10]"),
            Self::MaxComboBelowCombo { combo, max_combo } => {
                write!(f, "max combo {max_combo} below current combo {combo}")
            }
            Self::SpeedOutOfRange { speed } => write!(f, "speed {speed} outside [1, 5]"),
            Self::SpeedDistanceMismatch { speed, distance } => {
                write!(f, "speed {speed} does not match distance {distance}")
            }
            Self::LaneOutOfRange { lane } => write!(f, "lane {lane} outside [0, 2]"),
        }
    }
}

impl std::error::Error for InvariantViolation {}
