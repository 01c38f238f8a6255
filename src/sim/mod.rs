//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit `dt` only, no wall clock
//! - Seeded RNG only (gameplay and cosmetic streams kept apart)
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod environment;
pub mod events;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_collisions};
pub use entities::{BackgroundLayer, Obstacle, ObstacleKind, Particle, PowerUp, PowerUpKind};
pub use environment::{Appearance, Environment, Palette, boundaries_crossed};
pub use events::{GameEvent, PowerUpStatus, Sound, Stats};
pub use player::{Player, TrailPoint};
pub use spawner::SpawnRoll;
pub use state::{ActivePowerUps, GamePhase, GameSession, PowerUpTimer};
pub use tick::{Command, TickInput, tick};
