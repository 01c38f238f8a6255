//! Obstacle and power-up spawning
//!
//! Two independent Bernoulli trials per tick. The environment only decides which
//! obstacle kinds can appear; spawn cadence is the same everywhere.

use glam::Vec2;
use rand::Rng;

use super::entities::{Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use super::environment::Environment;
use super::state::GameSession;
use crate::consts::*;
use crate::{Tuning, lane_center_x};

/// Outcome of one tick's spawn rolls
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpawnRoll {
    /// Lane, kind and patrol direction
    pub obstacle: Option<(u8, ObstacleKind, f32)>,
    pub power_up: Option<(u8, PowerUpKind)>,
}

/// Roll this tick's spawns
///
/// Draw order is fixed (obstacle trial, its lane/kind/direction, then the
/// power-up trial and its lane/kind) so a seed always replays the same run.
pub fn roll(rng: &mut impl Rng, tuning: &Tuning, environment: Environment) -> SpawnRoll {
    let mut out = SpawnRoll::default();

    if rng.random::<f32>() < tuning.obstacle_spawn_chance {
        let lane = rng.random_range(0..LANE_COUNT);
        let kinds = environment.obstacle_kinds();
        let kind = kinds
            .get(rng.random_range(0..kinds.len()))
            .copied()
            .unwrap_or(ObstacleKind::Barrier);
        let dir = if rng.random::<f32>() > 0.5 { 1.0 } else { -1.0 };
        out.obstacle = Some((lane, kind, dir));
    }

    if rng.random::<f32>() < tuning.power_up_spawn_chance {
        let lane = rng.random_range(0..LANE_COUNT);
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        out.power_up = Some((lane, kind));
    }

    out
}

/// Roll and materialize this tick's spawns into the session
pub fn spawn(session: &mut GameSession) {
    let spawned = roll(&mut session.rng, &session.tuning, session.environment);

    if let Some((lane, kind, dir)) = spawned.obstacle {
        let id = session.next_entity_id();
        let pos = Vec2::new(lane_center_x(lane), GROUND_Y);
        log::debug!("Spawn obstacle {} {} in lane {}", id, kind.name(), lane);
        session.obstacles.push(Obstacle::new(
            id,
            kind,
            pos,
            session.environment,
            session.tuning.obstacle_width,
            dir,
        ));
    }

    if let Some((lane, kind)) = spawned.power_up {
        let id = session.next_entity_id();
        let pos = Vec2::new(lane_center_x(lane), GROUND_Y - session.tuning.power_up_float);
        log::debug!("Spawn power-up {} {} in lane {}", id, kind.name(), lane);
        session
            .power_ups
            .push(PowerUp::new(id, kind, pos, session.tuning.power_up_size));
    }
}
