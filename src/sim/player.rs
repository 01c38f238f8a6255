//! The runner
//!
//! Actions (`jump`, `slide`, lane moves) return whether they took effect so the
//! session can emit the matching events. Both the jump arc and the slide
//! timeout advance inside [`Player::update`], driven by the same `dt`.

use std::collections::VecDeque;

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;
use crate::lane_center_x;
use crate::skins::Skin;
use crate::Tuning;

/// Run animation cycle length
const ANIM_CYCLE: f32 = 4.0;
const ANIM_SPEED: f32 = 0.2;
/// Trail opacity lost per frame
const TRAIL_FADE: f32 = 0.1;

/// Trail point for rendering
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Opacity, fades to 0
    pub life: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the collision box
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    /// Lane the player is heading for (0..=2)
    pub lane: u8,
    /// X the player eases toward
    pub target_x: f32,
    pub jumping: bool,
    pub sliding: bool,
    /// Seconds of slide left
    pub slide_timer: f32,
    /// Run animation phase in [0, 4)
    pub anim_phase: f32,
    /// Recent positions (newest first)
    pub trail: VecDeque<TrailPoint>,
    pub skin: Skin,
    standing_height: f32,
}

impl Player {
    pub fn new(lane: u8, tuning: &Tuning, skin: Skin) -> Self {
        let x = lane_center_x(lane);
        Self {
            pos: Vec2::new(x, GROUND_Y - tuning.player_height),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
            lane,
            target_x: x,
            jumping: false,
            sliding: false,
            slide_timer: 0.0,
            anim_phase: 0.0,
            trail: VecDeque::with_capacity(tuning.trail_length + 1),
            skin,
            standing_height: tuning.player_height,
        }
    }

    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.jumping || self.sliding {
            return false;
        }
        self.vel_y = tuning.jump_velocity;
        self.jumping = true;
        true
    }

    pub fn slide(&mut self, tuning: &Tuning) -> bool {
        if self.jumping || self.sliding {
            return false;
        }
        self.sliding = true;
        self.slide_timer = tuning.slide_duration;
        self.size.y = tuning.slide_height;
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        self.target_x = lane_center_x(self.lane);
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.lane + 1 >= LANE_COUNT {
            return false;
        }
        self.lane += 1;
        self.target_x = lane_center_x(self.lane);
        true
    }

    /// Advance one tick
    pub fn update(&mut self, frames: f32, dt: f32, tuning: &Tuning, trail_len: usize) {
        self.record_trail(frames, trail_len);

        // Gravity
        self.vel_y += tuning.gravity * frames;
        self.pos.y += self.vel_y * frames;
        if self.pos.y >= GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vel_y = 0.0;
            self.jumping = false;
        }

        if self.sliding {
            self.slide_timer -= dt;
            if self.slide_timer <= 0.0 {
                self.sliding = false;
                self.slide_timer = 0.0;
                self.size.y = self.standing_height;
            }
        }

        // Ease toward the target lane: `lane_ease` of the gap per frame
        let ease = 1.0 - (1.0 - tuning.lane_ease).powf(frames);
        self.pos.x += (self.target_x - self.pos.x) * ease;

        self.anim_phase += ANIM_SPEED * frames;
        if self.anim_phase >= ANIM_CYCLE {
            self.anim_phase = 0.0;
        }
    }

    fn record_trail(&mut self, frames: f32, max_len: usize) {
        if max_len == 0 {
            self.trail.clear();
            return;
        }
        self.trail.push_front(TrailPoint {
            pos: self.pos,
            life: 1.0,
        });
        self.trail.truncate(max_len);
        for point in &mut self.trail {
            point.life -= TRAIL_FADE * frames;
        }
        self.trail.retain(|p| p.life > 0.0);
    }

    /// On the ground and free to act
    pub fn is_grounded(&self) -> bool {
        !self.jumping && self.pos.y >= GROUND_Y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
