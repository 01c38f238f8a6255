//! Environment catalog and cycling
//!
//! Environments are immutable themes. The session only moves a pointer through
//! [`Environment::ALL`]; nothing about an environment ever changes at runtime.

use serde::{Deserialize, Serialize};

use super::entities::ObstacleKind;

/// A themed stretch of the run
///
/// Serialized by [`Environment::key`]; unknown keys read back as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Environment {
    #[default]
    City,
    Space,
    Forest,
    Desert,
    Ocean,
}

impl From<String> for Environment {
    fn from(key: String) -> Self {
        Self::from_key_or_default(&key)
    }
}

impl From<Environment> for &'static str {
    fn from(env: Environment) -> Self {
        env.key()
    }
}

/// Background gradient stops and ground color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub sky: [&'static str; 3],
    pub ground: &'static str,
}

/// How an obstacle kind looks in a given environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub height: f32,
    pub color: &'static str,
    pub icon: &'static str,
}

impl Environment {
    /// Cycle order
    pub const ALL: [Environment; 5] = [
        Environment::City,
        Environment::Space,
        Environment::Forest,
        Environment::Desert,
        Environment::Ocean,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Environment::City => "Urban City",
            Environment::Space => "Space Station",
            Environment::Forest => "Mystical Forest",
            Environment::Desert => "Desert Oasis",
            Environment::Ocean => "Underwater",
        }
    }

    /// Short identifier
    pub fn key(&self) -> &'static str {
        match self {
            Environment::City => "city",
            Environment::Space => "space",
            Environment::Forest => "forest",
            Environment::Desert => "desert",
            Environment::Ocean => "ocean",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.key() == key)
    }

    /// Unknown keys fall back to the first environment
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            log::warn!("Unknown environment '{}', using city", key);
            Self::default()
        })
    }

    /// Next environment in the cycle (wraps)
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&e| e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn palette(&self) -> Palette {
        match self {
            Environment::City => Palette {
                sky: ["#87CEEB", "#98FB98", "#F0E68C"],
                ground: "#8B4513",
            },
            Environment::Space => Palette {
                sky: ["#000011", "#1a0033", "#330066"],
                ground: "#444444",
            },
            Environment::Forest => Palette {
                sky: ["#0d4f3c", "#1a5f4a", "#2d7a5f"],
                ground: "#2d5016",
            },
            Environment::Desert => Palette {
                sky: ["#f4a460", "#daa520", "#b8860b"],
                ground: "#cd853f",
            },
            Environment::Ocean => Palette {
                sky: ["#006994", "#0080a3", "#0099cc"],
                ground: "#004d66",
            },
        }
    }

    /// Obstacle kinds the spawner draws from here
    pub fn obstacle_kinds(&self) -> &'static [ObstacleKind] {
        use ObstacleKind::*;
        match self {
            Environment::City => &[Barrier, Hole, Spike, Moving],
            Environment::Space => &[Barrier, Hole, Spike, Moving, Laser],
            Environment::Forest => &[Barrier, Hole, Spike, Moving, Vine],
            Environment::Desert => &[Barrier, Hole, Spike, Moving, Sand],
            Environment::Ocean => &[Barrier, Hole, Spike, Moving, Bubble],
        }
    }

    /// Appearance of `kind` here, or of this environment's barrier when the
    /// kind does not belong to it
    pub fn appearance(&self, kind: ObstacleKind) -> Appearance {
        self.lookup(kind)
            .unwrap_or_else(|| self.lookup(ObstacleKind::Barrier).unwrap_or(BARRIER))
    }

    fn lookup(&self, kind: ObstacleKind) -> Option<Appearance> {
        use Environment::*;
        use ObstacleKind::*;

        let (height, color, icon) = match (self, kind) {
            (City, Barrier) => (80.0, "#8B4513", "🚧"),
            (Space, Barrier) => (80.0, "#444444", "🚧"),
            (Forest, Barrier) => (80.0, "#8B4513", "🌳"),
            (Desert, Barrier) => (80.0, "#8B4513", "🏜️"),
            (Ocean, Barrier) => (80.0, "#8B4513", "🪨"),

            (_, Hole) => (20.0, "#000", "🕳️"),
            (_, Spike) => (40.0, "#FF0000", "⚡"),

            (City, Moving) => (50.0, "#FFA500", "🚗"),
            (Space, Moving) => (50.0, "#FFA500", "🚀"),
            (Forest, Moving) => (50.0, "#FFA500", "🐻"),
            (Desert, Moving) => (50.0, "#FFA500", "🐪"),
            (Ocean, Moving) => (50.0, "#FFA500", "🦈"),

            (Space, Laser) => (30.0, "#FF00FF", "💥"),
            (Forest, Vine) => (60.0, "#228B22", "🌿"),
            (Desert, Sand) => (30.0, "#D2B48C", "🌪️"),
            (Ocean, Bubble) => (25.0, "#87CEEB", "💧"),

            (City | Forest | Desert | Ocean, Laser)
            | (City | Space | Desert | Ocean, Vine)
            | (City | Space | Forest | Ocean, Sand)
            | (City | Space | Forest | Desert, Bubble) => return None,
        };

        Some(Appearance {
            height,
            color,
            icon,
        })
    }
}

const BARRIER: Appearance = Appearance {
    height: 80.0,
    color: "#8B4513",
    icon: "🚧",
};

/// Number of `interval` boundaries crossed moving from `prev` to `next`
///
/// Edge-triggered: sitting on or near a boundary for several ticks counts once.
pub fn boundaries_crossed(prev: f32, next: f32, interval: f32) -> u32 {
    if next <= prev {
        return 0;
    }
    let before = (prev / interval).floor();
    let after = (next / interval).floor();
    (after - before).max(0.0) as u32
}
