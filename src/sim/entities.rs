//! Obstacles, power-ups, particles and background layers
//!
//! Passive data plus a per-frame `update`. `frames` is the tick length in
//! 60 Hz frames (1.0 at the nominal rate); every per-frame constant is scaled
//! by it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::environment::Environment;
use crate::Tuning;
use crate::consts::*;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Barrier,
    Hole,
    Spike,
    /// Patrols sideways while scrolling
    Moving,
    Laser,
    Vine,
    Sand,
    Bubble,
}

impl ObstacleKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Barrier => "barrier",
            ObstacleKind::Hole => "hole",
            ObstacleKind::Spike => "spike",
            ObstacleKind::Moving => "moving",
            ObstacleKind::Laser => "laser",
            ObstacleKind::Vine => "vine",
            ObstacleKind::Sand => "sand",
            ObstacleKind::Bubble => "bubble",
        }
    }

    /// Kinds drawn with a glow
    pub fn glows(&self) -> bool {
        matches!(
            self,
            ObstacleKind::Laser | ObstacleKind::Bubble | ObstacleKind::Sand
        )
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: &'static str,
    pub icon: &'static str,
    /// Lateral patrol direction (+1/-1), only for [`ObstacleKind::Moving`]
    pub patrol_dir: Option<f32>,
}

impl Obstacle {
    pub fn new(
        id: u32,
        kind: ObstacleKind,
        pos: Vec2,
        environment: Environment,
        width: f32,
        patrol_dir: f32,
    ) -> Self {
        let look = environment.appearance(kind);
        Self {
            id,
            kind,
            pos,
            size: Vec2::new(width, look.height),
            color: look.color,
            icon: look.icon,
            patrol_dir: (kind == ObstacleKind::Moving).then_some(patrol_dir),
        }
    }

    pub fn update(&mut self, frames: f32, tuning: &Tuning) {
        self.pos.x -= tuning.obstacle_speed * frames;

        if let Some(dir) = self.patrol_dir.as_mut() {
            self.pos.x += *dir * tuning.patrol_speed * frames;
            if self.pos.x < tuning.patrol_min_x || self.pos.x > tuning.patrol_max_x {
                *dir = -*dir;
            }
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < CULL_X
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Jetpack,
    Magnet,
    Shield,
    Multiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Jetpack,
        PowerUpKind::Magnet,
        PowerUpKind::Shield,
        PowerUpKind::Multiplier,
    ];

    /// Position in [`PowerUpKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PowerUpKind::Jetpack => 0,
            PowerUpKind::Magnet => 1,
            PowerUpKind::Shield => 2,
            PowerUpKind::Multiplier => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Jetpack => "jetpack",
            PowerUpKind::Magnet => "magnet",
            PowerUpKind::Shield => "shield",
            PowerUpKind::Multiplier => "multiplier",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Jetpack => "#FF6B6B",
            PowerUpKind::Magnet => "#4ECDC4",
            PowerUpKind::Shield => "#45B7D1",
            PowerUpKind::Multiplier => "#FFD700",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PowerUpKind::Jetpack => "🚀",
            PowerUpKind::Magnet => "🧲",
            PowerUpKind::Shield => "🛡️",
            PowerUpKind::Multiplier => "⚡",
        }
    }

    /// How long the effect lasts once picked up (seconds)
    pub fn duration(&self, tuning: &Tuning) -> f32 {
        match self {
            PowerUpKind::Jetpack => tuning.jetpack_duration,
            PowerUpKind::Magnet => tuning.magnet_duration,
            PowerUpKind::Shield => tuning.shield_duration,
            PowerUpKind::Multiplier => tuning.multiplier_duration,
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner (collision ignores the bob)
    pub pos: Vec2,
    pub size: Vec2,
    /// Spin angle for rendering (radians)
    pub rotation: f32,
    /// Vertical bob offset for rendering
    pub bob: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size: Vec2::splat(size),
            rotation: 0.0,
            bob: 0.0,
        }
    }

    /// `sim_time` is seconds since the run started
    pub fn update(&mut self, frames: f32, sim_time: f32, tuning: &Tuning) {
        self.pos.x -= tuning.power_up_speed * frames;
        self.rotation += 0.1 * frames;
        self.bob = (sim_time * 5.0).sin() * 5.0;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < CULL_X
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Where to draw it
    pub fn render_pos(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.bob)
    }
}

/// Cosmetic particle (never read by gameplay)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: &'static str,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self, frames: f32, dt: f32) {
        self.pos += self.vel * frames;
        self.vel.y += 0.1 * frames;
        self.vel *= 0.99_f32.powf(frames);
        self.life -= dt;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Number of parallax layers
pub const BACKGROUND_LAYERS: usize = 3;

/// A parallax background strip
#[derive(Debug, Clone)]
pub struct BackgroundLayer {
    pub x: f32,
    /// Scroll speed relative to the run speed
    pub speed: f32,
    pub color: String,
}

impl BackgroundLayer {
    /// The standard set of layers for a fresh run
    pub fn layers() -> Vec<BackgroundLayer> {
        (0..BACKGROUND_LAYERS)
            .map(|i| BackgroundLayer {
                x: i as f32 * WORLD_WIDTH,
                speed: (i + 1) as f32 * 0.5,
                color: format!("hsl({}, 70%, {}%)", 120 + i * 20, 60 + i * 10),
            })
            .collect()
    }

    pub fn update(&mut self, frames: f32, run_speed: f32) {
        self.x -= self.speed * run_speed * frames;
        if self.x <= -WORLD_WIDTH {
            self.x = WORLD_WIDTH;
        }
    }
}
