//! Collision detection and resolution
//!
//! Plain axis-aligned boxes. Every tick the player is tested against every live
//! obstacle and power-up; entity counts stay small enough that a linear scan is
//! all that is needed.

use glam::Vec2;

use super::entities::PowerUpKind;
use super::events::{GameEvent, Sound};
use super::state::{BURST_PARTICLES, GamePhase, GameSession};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Resolve player contacts against obstacles, then power-ups
///
/// Returns `true` when an unshielded hit ended the run. Power-ups touched on
/// that tick are left in place.
pub fn resolve_collisions(session: &mut GameSession) -> bool {
    let player_box = session.player.bounds();

    let hits: Vec<(u32, Vec2)> = session
        .obstacles
        .iter()
        .filter(|o| player_box.overlaps(&o.bounds()))
        .map(|o| (o.id, o.pos))
        .collect();

    if !hits.is_empty() {
        if session.active_power_ups.is_active(PowerUpKind::Shield) {
            session.obstacles.retain(|o| !hits.iter().any(|(id, _)| *id == o.id));
            for (id, pos) in hits {
                log::debug!("Shield absorbed obstacle {}", id);
                session.burst(pos, PowerUpKind::Shield.color(), BURST_PARTICLES);
            }
        } else {
            log::info!(
                "Crashed at distance {:.0} with score {:.0}",
                session.distance,
                session.score
            );
            session.emit(GameEvent::PlaySound(Sound::Crash));
            session.set_phase(GamePhase::GameOver);
            return true;
        }
    }

    let pickups: Vec<(u32, PowerUpKind)> = session
        .power_ups
        .iter()
        .filter(|p| player_box.overlaps(&p.bounds()))
        .map(|p| (p.id, p.kind))
        .collect();

    if !pickups.is_empty() {
        session.power_ups.retain(|p| !pickups.iter().any(|(id, _)| *id == p.id));
        for (_, kind) in pickups {
            session.collect_power_up(kind);
        }
    }

    false
}
