//! Display list generation
//!
//! Turns a session into an ordered list of 2D primitives. Nothing here touches
//! the DOM, so the layout is testable off the web target; the canvas backend
//! only walks the list.

use std::borrow::Cow;
use std::f32::consts::PI;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{
    Environment, GameSession, Obstacle, ObstacleKind, Particle, Player, PowerUp, PowerUpKind,
};

pub type Color = Cow<'static, str>;

/// One drawing primitive, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Full-screen vertical gradient, top to bottom
    Sky { stops: [&'static str; 3] },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
        /// Shadow blur radius, 0 for none
        glow: f32,
        /// Rotation about the rect's center (radians)
        angle: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
        alpha: f32,
    },
    /// Upper half of a disc sitting on `center`
    Dome {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Triangle { points: [Vec2; 3], color: Color },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// Centered glyph
    Text {
        pos: Vec2,
        text: &'static str,
        size: f32,
        angle: f32,
    },
}

impl Shape {
    fn rect(pos: Vec2, size: Vec2, color: impl Into<Color>) -> Self {
        Shape::Rect {
            pos,
            size,
            color: color.into(),
            alpha: 1.0,
            glow: 0.0,
            angle: 0.0,
        }
    }

    fn circle(center: Vec2, radius: f32, color: impl Into<Color>, alpha: f32) -> Self {
        Shape::Circle {
            center,
            radius,
            color: color.into(),
            alpha,
        }
    }

    fn glyph(pos: Vec2, text: &'static str, size: f32) -> Self {
        Shape::Text {
            pos,
            text,
            size,
            angle: 0.0,
        }
    }
}

/// Stable per-index noise in [0, 1)
///
/// Scenery must not flicker between frames, so it never reads an RNG.
fn noise(i: u32, salt: u32) -> f32 {
    let mut h = i.wrapping_mul(0x9E37_79B9) ^ salt.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    (h >> 8) as f32 / (1u32 << 24) as f32
}

/// The whole frame, back to front
pub fn frame(session: &GameSession) -> Vec<Shape> {
    let palette = session.environment.palette();
    let mut out = vec![Shape::Sky { stops: palette.sky }];

    out.extend(scenery(session.environment));
    for layer in &session.backgrounds {
        out.push(Shape::Rect {
            pos: Vec2::new(layer.x, GROUND_Y - 20.0 * layer.speed),
            size: Vec2::new(WORLD_WIDTH, 20.0 * layer.speed),
            color: Cow::Owned(layer.color.clone()),
            alpha: 0.25,
            glow: 0.0,
            angle: 0.0,
        });
    }

    out.push(Shape::rect(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(WORLD_WIDTH, WORLD_HEIGHT - GROUND_Y),
        palette.ground,
    ));
    out.extend(lane_dividers());

    for obstacle in &session.obstacles {
        out.extend(obstacle_shapes(obstacle));
    }
    for power_up in &session.power_ups {
        out.extend(power_up_shapes(power_up));
    }
    out.extend(session.particles.iter().map(particle_shape));
    out.extend(player_shapes(&session.player));

    let anchor = session.player.pos;
    if session.active_power_ups.is_active(PowerUpKind::Jetpack) {
        out.push(Shape::circle(
            anchor + Vec2::new(0.0, 20.0),
            15.0,
            PowerUpKind::Jetpack.color(),
            0.7,
        ));
    }
    if session.active_power_ups.is_active(PowerUpKind::Shield) {
        out.push(Shape::Ring {
            center: anchor,
            radius: 30.0,
            width: 3.0,
            color: PowerUpKind::Shield.color().into(),
            alpha: 0.3,
        });
    }

    out
}

/// White lines between lanes, ground to bottom edge
pub fn lane_dividers() -> Vec<Shape> {
    (1..LANE_COUNT)
        .map(|i| {
            let x = i as f32 * LANE_WIDTH;
            Shape::Line {
                from: Vec2::new(x, GROUND_Y),
                to: Vec2::new(x, WORLD_HEIGHT),
                color: "#FFFFFF".into(),
                width: 2.0,
            }
        })
        .collect()
}

/// Static decoration for an environment
pub fn scenery(environment: Environment) -> Vec<Shape> {
    let mut out = Vec::new();
    match environment {
        Environment::Space => {
            for i in 0..100 {
                let pos = Vec2::new((i * 37) as f32 % WORLD_WIDTH, (i * 23) as f32 % WORLD_HEIGHT);
                out.push(Shape::circle(pos, noise(i, 1) * 2.0, "#FFFFFF", 1.0));
            }
        }
        Environment::Forest => {
            for i in 0..5 {
                let x = (i * 150) as f32 % WORLD_WIDTH;
                out.push(Shape::rect(
                    Vec2::new(x, GROUND_Y - 80.0),
                    Vec2::new(20.0, 80.0),
                    "#8B4513",
                ));
                out.push(Shape::circle(
                    Vec2::new(x + 10.0, GROUND_Y - 80.0),
                    30.0,
                    "#228B22",
                    1.0,
                ));
            }
        }
        Environment::Desert => {
            for i in 0..3 {
                out.push(Shape::Dome {
                    center: Vec2::new((i * 200) as f32 % WORLD_WIDTH, GROUND_Y),
                    radius: 100.0,
                    color: "#D2B48C".into(),
                });
            }
        }
        Environment::Ocean => {
            for i in 0..20 {
                let pos = Vec2::new((i * 50) as f32 % WORLD_WIDTH, (i * 30) as f32 % WORLD_HEIGHT);
                out.push(Shape::circle(pos, noise(i, 2) * 10.0 + 5.0, "#FFFFFF", 0.3));
            }
        }
        Environment::City => {
            for i in 0..8 {
                let x = (i * 100) as f32 % WORLD_WIDTH;
                let height = noise(i, 3) * 100.0 + 50.0;
                let top = GROUND_Y - height;
                out.push(Shape::rect(Vec2::new(x, top), Vec2::new(80.0, height), "#696969"));
                for col in 0..3u32 {
                    for row in 0..4u32 {
                        if noise(i * 12 + col * 4 + row, 4) > 0.3 {
                            out.push(Shape::rect(
                                Vec2::new(x + 10.0 + col as f32 * 20.0, top + 10.0 + row as f32 * 15.0),
                                Vec2::new(10.0, 8.0),
                                "#FFD700",
                            ));
                        }
                    }
                }
            }
        }
    }
    out
}

/// Obstacles stand on the ground line: drawn from `y - height` up to `y`
pub fn obstacle_shapes(obstacle: &Obstacle) -> Vec<Shape> {
    let Vec2 { x, y } = obstacle.pos;
    let Vec2 { x: w, y: h } = obstacle.size;
    let top_left = Vec2::new(x, y - h);

    let mut out = vec![
        Shape::rect(top_left, obstacle.size, obstacle.color),
        Shape::glyph(Vec2::new(x + w / 2.0, y - h / 2.0), obstacle.icon, 20.0),
    ];
    if obstacle.kind == ObstacleKind::Spike {
        out.push(Shape::Triangle {
            points: [Vec2::new(x, y), Vec2::new(x + w / 2.0, y - h), Vec2::new(x + w, y)],
            color: obstacle.color.into(),
        });
    }
    if obstacle.kind.glows() {
        out.push(Shape::Rect {
            pos: top_left,
            size: obstacle.size,
            color: obstacle.color.into(),
            alpha: 1.0,
            glow: 10.0,
            angle: 0.0,
        });
    }
    out
}

/// Spinning, bobbing tile with its icon
pub fn power_up_shapes(power_up: &PowerUp) -> Vec<Shape> {
    let center = power_up.render_pos() + power_up.size / 2.0;
    vec![
        Shape::Rect {
            pos: center - power_up.size / 2.0,
            size: power_up.size,
            color: power_up.kind.color().into(),
            alpha: 1.0,
            glow: 20.0,
            angle: power_up.rotation,
        },
        Shape::Text {
            pos: center,
            text: power_up.kind.icon(),
            size: 20.0,
            angle: power_up.rotation,
        },
    ]
}

pub fn particle_shape(particle: &Particle) -> Shape {
    Shape::circle(particle.pos, particle.size, particle.color, particle.alpha())
}

/// Leg swing for the run cycle
fn leg_offset(anim_phase: f32) -> f32 {
    (anim_phase * PI).sin() * 3.0
}

/// Trail, body, head, hat and (while running) legs
///
/// The sprite is centered on `pos.x` with its feet on `pos.y`.
pub fn player_shapes(player: &Player) -> Vec<Shape> {
    let Vec2 { x, y } = player.pos;
    let Vec2 { x: w, y: h } = player.size;
    let color = player.skin.color;

    let mut out: Vec<Shape> = player
        .trail
        .iter()
        .map(|p| Shape::circle(p.pos, 5.0 * p.life, color, p.life * 0.3))
        .collect();

    out.push(Shape::Rect {
        pos: Vec2::new(x - w / 2.0, y - h),
        size: player.size,
        color: color.into(),
        alpha: 1.0,
        glow: 10.0,
        angle: 0.0,
    });
    out.push(Shape::circle(Vec2::new(x, y - h - 15.0), 12.0, "#FFDBAC", 1.0));
    out.push(Shape::circle(Vec2::new(x - 5.0, y - h - 18.0), 2.0, "#000", 1.0));
    out.push(Shape::circle(Vec2::new(x + 5.0, y - h - 18.0), 2.0, "#000", 1.0));
    out.push(Shape::glyph(Vec2::new(x, y - h - 25.0), player.skin.hat, 16.0));

    if !player.jumping && !player.sliding {
        let swing = leg_offset(player.anim_phase);
        out.push(Shape::rect(
            Vec2::new(x - 8.0, y - 10.0),
            Vec2::new(4.0, 15.0 + swing),
            color,
        ));
        out.push(Shape::rect(
            Vec2::new(x + 4.0, y - 10.0),
            Vec2::new(4.0, 15.0 - swing),
            color,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    fn session() -> GameSession {
        let tuning = Tuning {
            obstacle_spawn_chance: 0.0,
            power_up_spawn_chance: 0.0,
            ..Tuning::default()
        };
        let mut session = GameSession::new(7, tuning);
        session.start();
        session
    }

    #[test]
    fn test_frame_starts_with_sky() {
        let session = session();
        let shapes = frame(&session);
        assert_eq!(
            shapes[0],
            Shape::Sky {
                stops: Environment::City.palette().sky
            }
        );
    }

    #[test]
    fn test_lane_dividers_between_lanes() {
        let lines = lane_dividers();
        assert_eq!(lines.len(), LANE_COUNT as usize - 1);
        match &lines[0] {
            Shape::Line { from, to, .. } => {
                assert_eq!(from.x, LANE_WIDTH);
                assert_eq!(from.y, GROUND_Y);
                assert_eq!(to.y, WORLD_HEIGHT);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_scenery_is_stable() {
        for env in Environment::ALL {
            assert_eq!(scenery(env), scenery(env));
            assert!(!scenery(env).is_empty());
        }
    }

    #[test]
    fn test_noise_range() {
        for i in 0..1000 {
            let n = noise(i, 9);
            assert!((0.0..1.0).contains(&n));
        }
    }

    #[test]
    fn test_spike_and_glow_extras() {
        let spike = Obstacle::new(1, ObstacleKind::Spike, Vec2::new(100.0, GROUND_Y), Environment::City, 40.0, 1.0);
        assert!(obstacle_shapes(&spike).iter().any(|s| matches!(s, Shape::Triangle { .. })));

        let laser = Obstacle::new(2, ObstacleKind::Laser, Vec2::new(100.0, GROUND_Y), Environment::Space, 40.0, 1.0);
        let glows = obstacle_shapes(&laser)
            .iter()
            .filter(|s| matches!(s, Shape::Rect { glow, .. } if *glow > 0.0))
            .count();
        assert_eq!(glows, 1);

        let barrier = Obstacle::new(3, ObstacleKind::Barrier, Vec2::new(100.0, GROUND_Y), Environment::City, 40.0, 1.0);
        assert_eq!(obstacle_shapes(&barrier).len(), 2);
    }

    #[test]
    fn test_shield_ring_only_when_active() {
        let mut session = session();
        let has_ring = |s: &GameSession| frame(s).iter().any(|s| matches!(s, Shape::Ring { .. }));
        assert!(!has_ring(&session));
        session.active_power_ups.activate(PowerUpKind::Shield);
        assert!(has_ring(&session));
    }

    #[test]
    fn test_airborne_player_has_no_legs() {
        let mut session = session();
        let grounded = player_shapes(&session.player).len();
        session.player.jumping = true;
        assert_eq!(player_shapes(&session.player).len(), grounded - 2);
    }

    #[test]
    fn test_power_up_drawn_at_bob() {
        let mut p = PowerUp::new(1, PowerUpKind::Magnet, Vec2::new(200.0, 470.0), 30.0);
        p.bob = 4.0;
        match &power_up_shapes(&p)[1] {
            Shape::Text { pos, .. } => assert_eq!(*pos, Vec2::new(215.0, 489.0)),
            other => panic!("expected text, got {other:?}"),
        }
    }
}
