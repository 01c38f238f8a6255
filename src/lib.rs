//! Super Surfers - A lane-based endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences (particles, trails, audio)
//! - `hud`: HUD and game-over text
//! - `input`: Keyboard and touch mapping to commands
//! - `audio`: Sound sinks the simulation's sound events are routed to
//! - `renderer`: Display lists for a session, drawn with Canvas 2D on the web

pub mod audio;
pub mod error;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod skins;
pub mod tuning;

pub use error::{InvariantViolation, TuningError};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Ground line (top of the running surface)
    pub const GROUND_Y: f32 = WORLD_HEIGHT - 100.0;

    /// Lanes
    pub const LANE_COUNT: u8 = 3;
    pub const LANE_WIDTH: f32 = WORLD_WIDTH / LANE_COUNT as f32;

    /// Entities left of this x are off-screen and culled
    pub const CULL_X: f32 = -50.0;

    /// Combo multiplier bounds
    pub const MIN_COMBO: f32 = 1.0;
    pub const MAX_COMBO: f32 = 10.0;

    /// Speed multiplier bounds
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 5.0;
}

/// X coordinate of a lane's center
#[inline]
pub fn lane_center_x(lane: u8) -> f32 {
    lane as f32 * consts::LANE_WIDTH + consts::LANE_WIDTH / 2.0
}

/// Speed multiplier as a saturating function of distance travelled
#[inline]
pub fn speed_for_distance(distance: f32, distance_scale: f32) -> f32 {
    (consts::MIN_SPEED + distance / distance_scale).min(consts::MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centers() {
        assert!((lane_center_x(0) - 133.333).abs() < 0.01);
        assert!((lane_center_x(1) - 400.0).abs() < 0.01);
        assert!((lane_center_x(2) - 666.667).abs() < 0.01);
    }

    #[test]
    fn test_speed_saturates() {
        assert_eq!(speed_for_distance(0.0, 1000.0), 1.0);
        assert_eq!(speed_for_distance(1500.0, 1000.0), 2.5);
        assert_eq!(speed_for_distance(4000.0, 1000.0), 5.0);
        assert_eq!(speed_for_distance(1_000_000.0, 1000.0), 5.0);
    }
}
