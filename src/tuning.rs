//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads at runtime. Values are given
//! per frame at the 60 Hz reference rate; the tick scales them by `dt / SIM_DT`.
//! Missing JSON keys fall back to the defaults, so a tuning file only needs the
//! values it overrides.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::sim::Environment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Collision height while sliding
    pub slide_height: f32,
    /// Slide length in seconds
    pub slide_duration: f32,
    /// Downward acceleration (units/frame²)
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    /// Fraction of the remaining distance to the target lane covered per frame
    pub lane_ease: f32,
    /// Number of trail points kept behind the player
    pub trail_length: usize,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_speed: f32,
    /// Lateral drift of the patrol obstacle (units/frame)
    pub patrol_speed: f32,
    pub patrol_min_x: f32,
    pub patrol_max_x: f32,

    // === Power-ups ===
    pub power_up_size: f32,
    pub power_up_speed: f32,
    /// Height above the ground line power-ups float at
    pub power_up_float: f32,
    pub jetpack_duration: f32,
    pub magnet_duration: f32,
    pub shield_duration: f32,
    pub multiplier_duration: f32,

    // === Spawning (per-tick probabilities) ===
    pub obstacle_spawn_chance: f32,
    pub power_up_spawn_chance: f32,

    // === Scoring ===
    /// Base score for an obstacle that leaves the screen (times combo)
    pub pass_score: f32,
    /// Base score for a power-up pickup (times combo)
    pub pickup_score: f32,
    pub combo_step: f32,
    /// Distance gained per frame at speed 1
    pub distance_per_frame: f32,
    /// Distance over which speed grows by 1
    pub speed_distance_scale: f32,

    // === Environments ===
    pub environment_interval: f32,
    /// Theme every run starts in (unknown keys fall back to city)
    pub start_environment: Environment,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 30.0,
            player_height: 50.0,
            slide_height: 20.0,
            slide_duration: 1.0,
            gravity: 0.8,
            jump_velocity: -15.0,
            lane_ease: 0.2,
            trail_length: 10,

            obstacle_width: 40.0,
            obstacle_speed: 3.0,
            patrol_speed: 0.5,
            patrol_min_x: 50.0,
            patrol_max_x: 750.0,

            power_up_size: 30.0,
            power_up_speed: 2.0,
            power_up_float: 30.0,
            jetpack_duration: 5.0,
            magnet_duration: 8.0,
            shield_duration: 10.0,
            multiplier_duration: 6.0,

            obstacle_spawn_chance: 0.02,
            power_up_spawn_chance: 0.005,

            pass_score: 10.0,
            pickup_score: 100.0,
            combo_step: 0.1,
            distance_per_frame: 0.1,
            speed_distance_scale: 1000.0,

            environment_interval: 2000.0,
            start_environment: Environment::City,
        }
    }
}

impl Tuning {
    /// Parse tuning JSON and reject values the simulation cannot run with
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value is inside its usable range
    pub fn validate(&self) -> Result<(), TuningError> {
        check_probability("obstacle_spawn_chance", self.obstacle_spawn_chance)?;
        check_probability("power_up_spawn_chance", self.power_up_spawn_chance)?;
        check_probability("lane_ease", self.lane_ease)?;

        for (field, value) in [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("slide_height", self.slide_height),
            ("slide_duration", self.slide_duration),
            ("obstacle_width", self.obstacle_width),
            ("power_up_size", self.power_up_size),
            ("jetpack_duration", self.jetpack_duration),
            ("magnet_duration", self.magnet_duration),
            ("shield_duration", self.shield_duration),
            ("multiplier_duration", self.multiplier_duration),
            ("speed_distance_scale", self.speed_distance_scale),
            ("environment_interval", self.environment_interval),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::OutOfRange {
                    field,
                    value,
                    expected: "> 0",
                });
            }
        }

        for (field, value) in [
            ("combo_step", self.combo_step),
            ("distance_per_frame", self.distance_per_frame),
            ("gravity", self.gravity),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::OutOfRange {
                    field,
                    value,
                    expected: ">= 0",
                });
            }
        }

        if self.patrol_min_x >= self.patrol_max_x {
            return Err(TuningError::OutOfRange {
                field: "patrol_min_x",
                value: self.patrol_min_x,
                expected: "< patrol_max_x",
            });
        }

        Ok(())
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            value,
            expected: "in [0, 1]",
        })
    }
}
