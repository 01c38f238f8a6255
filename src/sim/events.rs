//! Events the simulation emits for presentation
//!
//! Fire-and-forget: the session queues them during a tick and the driver drains
//! them afterwards. Nothing is acknowledged back.

use glam::Vec2;
use serde::Serialize;

use super::entities::PowerUpKind;
use super::environment::Environment;
use super::state::GamePhase;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sound {
    Jump,
    Collect,
    PowerUp,
    Crash,
    /// Background drone, started with each run
    Background,
}

/// Remaining time on one power-up window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpStatus {
    pub kind: PowerUpKind,
    pub active: bool,
    /// Seconds left (0 when inactive)
    pub remaining: f32,
}

/// HUD snapshot, also used for the game-over summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub score: f64,
    pub distance: f32,
    pub combo: f32,
    pub max_combo: f32,
    pub speed: f32,
    pub power_ups_used: u32,
    pub environment: Environment,
    pub power_ups: [PowerUpStatus; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PlaySound(Sound),
    /// A cosmetic burst was spawned
    SpawnParticles {
        pos: Vec2,
        color: &'static str,
        count: usize,
    },
    StateChanged(GamePhase),
    EnvironmentChanged(Environment),
    StatsUpdated(Stats),
}
