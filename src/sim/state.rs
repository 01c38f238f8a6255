//! Game session and core simulation types
//!
//! One [`GameSession`] lives for the whole page and is reset at the start of
//! every run. It owns the player, every entity list, the power-up timers and
//! the two RNG streams.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{BackgroundLayer, Obstacle, Particle, PowerUp, PowerUpKind};
use super::environment::Environment;
use super::events::{GameEvent, PowerUpStatus, Sound, Stats};
use super::player::Player;
use crate::consts::*;
use crate::error::InvariantViolation;
use crate::settings::Settings;
use crate::{Tuning, skins, speed_for_distance};

/// Lane a fresh run starts in
pub const START_LANE: u8 = 1;

/// Particles in one pickup/shield burst
pub const BURST_PARTICLES: usize = 20;
/// Particles in an environment transition
pub const TRANSITION_PARTICLES: usize = 50;

/// Salt for the cosmetic RNG stream
const FX_SEED_SALT: u64 = 0x5EED_F00D_CAFE_BABE;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated
    #[default]
    Menu,
    /// Active run
    Playing,
    Paused,
    /// Run ended by a crash
    GameOver,
}

/// One power-up window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpTimer {
    pub active: bool,
    /// Seconds since the last pickup
    pub elapsed: f32,
    pub max_duration: f32,
}

impl PowerUpTimer {
    /// Seconds left, 0 when inactive
    pub fn remaining(&self) -> f32 {
        if self.active {
            (self.max_duration - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }
}

/// One timer window per power-up kind
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePowerUps {
    timers: [PowerUpTimer; 4],
}

impl ActivePowerUps {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timers: PowerUpKind::ALL.map(|kind| PowerUpTimer {
                active: false,
                elapsed: 0.0,
                max_duration: kind.duration(tuning),
            }),
        }
    }

    pub fn get(&self, kind: PowerUpKind) -> &PowerUpTimer {
        &self.timers[kind.index()]
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.get(kind).active
    }

    /// Start (or restart) the window; a second pickup resets, never stacks
    pub fn activate(&mut self, kind: PowerUpKind) {
        let timer = &mut self.timers[kind.index()];
        timer.active = true;
        timer.elapsed = 0.0;
    }

    /// Age every active window by `dt`, returning the kinds that just expired
    pub fn age(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let timer = &mut self.timers[kind.index()];
            if !timer.active {
                continue;
            }
            timer.elapsed += dt;
            if timer.elapsed >= timer.max_duration {
                timer.active = false;
                timer.elapsed = 0.0;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn reset(&mut self) {
        for timer in &mut self.timers {
            timer.active = false;
            timer.elapsed = 0.0;
        }
    }

    pub fn statuses(&self) -> [PowerUpStatus; 4] {
        PowerUpKind::ALL.map(|kind| {
            let timer = self.get(kind);
            PowerUpStatus {
                kind,
                active: timer.active,
                remaining: timer.remaining(),
            }
        })
    }
}

/// The whole mutable state of play
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the RNG streams were created from
    pub seed: u64,
    pub phase: GamePhase,
    pub score: f64,
    pub distance: f32,
    /// Score multiplier in [1, 10]
    pub combo: f32,
    pub max_combo: f32,
    /// Run speed multiplier in [1, 5]
    pub speed: f32,
    pub power_ups_used: u32,
    pub environment: Environment,
    /// Ticks simulated this run
    pub time_ticks: u64,
    /// Simulated seconds this run
    pub sim_time: f32,
    /// Best score since the session was created (in memory only)
    pub best_score: f64,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub active_power_ups: ActivePowerUps,
    /// Visual only
    pub particles: Vec<Particle>,
    /// Visual only
    pub backgrounds: Vec<BackgroundLayer>,

    pub tuning: Tuning,
    /// Live particle cap (from settings)
    pub particle_cap: usize,
    /// Player trail length (from settings)
    pub trail_length: usize,

    /// Gameplay RNG: spawns only
    pub(crate) rng: Pcg32,
    /// Cosmetic RNG: particles and skins, never read by gameplay
    pub(crate) fx_rng: Pcg32,
    /// Events queued for presentation
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create a session sitting on the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let settings = Settings::default();
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0.0,
            distance: 0.0,
            combo: MIN_COMBO,
            max_combo: MIN_COMBO,
            speed: MIN_SPEED,
            power_ups_used: 0,
            environment: tuning.start_environment,
            time_ticks: 0,
            sim_time: 0.0,
            best_score: 0.0,
            player: Player::new(START_LANE, &tuning, skins::SKINS[0]),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            active_power_ups: ActivePowerUps::new(&tuning),
            particles: Vec::new(),
            backgrounds: BackgroundLayer::layers(),
            particle_cap: settings.max_particles(),
            trail_length: settings.trail_length(tuning.trail_length),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Apply presentation preferences (cosmetic caps only)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.particle_cap = settings.max_particles();
        self.trail_length = settings.trail_length(self.tuning.trail_length);
        if self.particles.len() > self.particle_cap {
            self.particles.truncate(self.particle_cap);
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Change phase, announcing it if it actually changed
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.emit(GameEvent::StateChanged(phase));
        if phase == GamePhase::GameOver {
            self.best_score = self.best_score.max(self.score);
            self.emit(GameEvent::StatsUpdated(self.stats()));
        }
    }

    // === Lifecycle commands ===

    /// Menu or GameOver -> Playing with a fresh run
    pub fn start(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
            return false;
        }
        self.begin_run();
        true
    }

    /// Paused or GameOver -> Playing with a fresh run
    pub fn restart(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Paused | GamePhase::GameOver) {
            return false;
        }
        self.begin_run();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.set_phase(GamePhase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.set_phase(GamePhase::Playing);
        // Pausing silenced the drone
        self.emit(GameEvent::PlaySound(Sound::Background));
        true
    }

    /// Paused or GameOver -> Menu
    pub fn show_menu(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Paused | GamePhase::GameOver) {
            return false;
        }
        self.best_score = self.best_score.max(self.score);
        self.set_phase(GamePhase::Menu);
        true
    }

    // === Player commands (Playing only) ===

    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.player.jump(&self.tuning) {
            return false;
        }
        self.emit(GameEvent::PlaySound(Sound::Jump));
        true
    }

    pub fn slide(&mut self) -> bool {
        self.phase == GamePhase::Playing && self.player.slide(&self.tuning)
    }

    pub fn move_left(&mut self) -> bool {
        self.phase == GamePhase::Playing && self.player.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.phase == GamePhase::Playing && self.player.move_right()
    }

    /// Reset everything run-scoped and enter Playing
    fn begin_run(&mut self) {
        self.best_score = self.best_score.max(self.score);

        self.score = 0.0;
        self.distance = 0.0;
        self.combo = MIN_COMBO;
        self.max_combo = MIN_COMBO;
        self.speed = MIN_SPEED;
        self.power_ups_used = 0;
        self.environment = self.tuning.start_environment;
        self.time_ticks = 0;
        self.sim_time = 0.0;

        self.active_power_ups.reset();
        self.obstacles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.backgrounds = BackgroundLayer::layers();

        let skin = skins::pick(&mut self.fx_rng, self.best_score);
        self.player = Player::new(START_LANE, &self.tuning, skin);

        log::info!("Run started (seed {}, skin {})", self.seed, skin.name);
        self.set_phase(GamePhase::Playing);
        self.emit(GameEvent::PlaySound(Sound::Background));
        self.emit(GameEvent::StatsUpdated(self.stats()));
    }

    // === Effects ===

    /// Power-up picked up: (re)start its window, score it, celebrate
    pub fn collect_power_up(&mut self, kind: PowerUpKind) {
        self.active_power_ups.activate(kind);
        self.power_ups_used += 1;
        log::debug!("Collected {} (#{})", kind.name(), self.power_ups_used);

        self.burst(self.player.pos, kind.color(), BURST_PARTICLES);
        self.emit(GameEvent::PlaySound(Sound::PowerUp));

        self.score += self.tuning.pickup_score as f64 * self.combo as f64;
        self.emit(GameEvent::PlaySound(Sound::Collect));
    }

    /// An obstacle left the screen behind the player
    pub fn pass_obstacle(&mut self) {
        self.score += self.tuning.pass_score as f64 * self.combo as f64;
        self.combo = (self.combo + self.tuning.combo_step).min(MAX_COMBO);
        self.max_combo = self.max_combo.max(self.combo);
    }

    /// Advance distance and recompute speed from it
    pub fn advance_distance(&mut self, frames: f32) {
        self.distance += self.speed * self.tuning.distance_per_frame * frames;
        self.speed = speed_for_distance(self.distance, self.tuning.speed_distance_scale);
    }

    /// Spray particles around `pos`
    pub fn burst(&mut self, pos: Vec2, color: &'static str, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= self.particle_cap {
                break;
            }
            let vel = Vec2::new(
                (self.fx_rng.random::<f32>() - 0.5) * 10.0,
                (self.fx_rng.random::<f32>() - 0.5) * 10.0,
            );
            let life = self.fx_rng.random::<f32>() + 0.5;
            let size = self.fx_rng.random::<f32>() * 4.0 + 2.0;
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life,
                max_life: life,
                size,
            });
        }
        self.emit(GameEvent::SpawnParticles { pos, color, count });
    }

    /// Move to the next environment with a screen-wide sparkle
    pub fn advance_environment(&mut self) {
        let next = self.environment.next();
        log::info!(
            "Entering {} at distance {:.0}",
            next.name(),
            self.distance
        );
        self.environment = next;

        for _ in 0..TRANSITION_PARTICLES {
            if self.particles.len() >= self.particle_cap {
                break;
            }
            let pos = Vec2::new(
                self.fx_rng.random::<f32>() * WORLD_WIDTH,
                self.fx_rng.random::<f32>() * WORLD_HEIGHT,
            );
            let vel = Vec2::new(
                (self.fx_rng.random::<f32>() - 0.5) * 20.0,
                (self.fx_rng.random::<f32>() - 0.5) * 20.0,
            );
            let life = self.fx_rng.random::<f32>() * 2.0 + 1.0;
            let size = self.fx_rng.random::<f32>() * 4.0 + 2.0;
            self.particles.push(Particle {
                pos,
                vel,
                color: "#FFFFFF",
                life,
                max_life: life,
                size,
            });
        }
        self.emit(GameEvent::SpawnParticles {
            pos: Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            color: "#FFFFFF",
            count: TRANSITION_PARTICLES,
        });
        self.emit(GameEvent::EnvironmentChanged(next));
    }

    // === Read interface ===

    pub fn stats(&self) -> Stats {
        Stats {
            score: self.score,
            distance: self.distance,
            combo: self.combo,
            max_combo: self.max_combo,
            speed: self.speed,
            power_ups_used: self.power_ups_used,
            environment: self.environment,
            power_ups: self.active_power_ups.statuses(),
        }
    }

    /// Check the invariants every tick must preserve
    pub fn validate_invariants(&self) -> Result<(), InvariantViolation> {
        if !(MIN_COMBO..=MAX_COMBO).contains(&self.combo) {
            return Err(InvariantViolation::ComboOutOfRange { combo: self.combo });
        }
        if self.max_combo < self.combo {
            return Err(InvariantViolation::MaxComboBelowCombo {
                combo: self.combo,
                max_combo: self.max_combo,
            });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(InvariantViolation::SpeedOutOfRange { speed: self.speed });
        }
        if self.speed != speed_for_distance(self.distance, self.tuning.speed_distance_scale) {
            return Err(InvariantViolation::SpeedDistanceMismatch {
                speed: self.speed,
                distance: self.distance,
            });
        }
        if self.player.lane >= LANE_COUNT {
            return Err(InvariantViolation::LaneOutOfRange {
                lane: self.player.lane,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> GameSession {
        let mut session = GameSession::new(42, Tuning::default());
        assert!(session.start());
        session.drain_events();
        session
    }

    #[test]
    fn test_new_session_on_menu() {
        let session = GameSession::new(1, Tuning::default());
        assert_eq!(session.phase, GamePhase::Menu);
        assert_eq!(session.combo, 1.0);
        assert_eq!(session.speed, 1.0);
        assert!(session.validate_invariants().is_ok());
    }

    #[test]
    fn test_start_emits_events() {
        let mut session = GameSession::new(1, Tuning::default());
        assert!(session.start());
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::StateChanged(GamePhase::Playing)));
        assert!(events.contains(&GameEvent::PlaySound(Sound::Background)));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_lifecycle_guards() {
        let mut session = GameSession::new(1, Tuning::default());
        assert!(!session.pause());
        assert!(!session.resume());
        assert!(!session.restart());
        assert!(!session.show_menu());
        assert!(!session.jump());

        assert!(session.start());
        assert!(!session.start());
        assert!(!session.resume());
        assert!(session.pause());
        assert!(!session.jump());
        assert!(!session.move_left());
        assert!(session.resume());
        assert!(session.pause());
        assert!(session.show_menu());
        assert_eq!(session.phase, GamePhase::Menu);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut session = playing();
        session.score = 500.0;
        session.combo = 3.0;
        session.max_combo = 3.0;
        session.distance = 2500.0;
        session.environment = Environment::Space;
        session.active_power_ups.activate(PowerUpKind::Magnet);
        session.pause();

        assert!(session.restart());
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score, 0.0);
        assert_eq!(session.combo, 1.0);
        assert_eq!(session.max_combo, 1.0);
        assert_eq!(session.distance, 0.0);
        assert_eq!(session.environment, Environment::City);
        assert!(!session.active_power_ups.is_active(PowerUpKind::Magnet));
        assert_eq!(session.best_score, 500.0);
    }

    #[test]
    fn test_pass_obstacle_caps_combo() {
        let mut session = playing();
        for _ in 0..200 {
            session.pass_obstacle();
        }
        assert_eq!(session.combo, MAX_COMBO);
        assert_eq!(session.max_combo, MAX_COMBO);
        assert!(session.validate_invariants().is_ok());
    }

    #[test]
    fn test_pickup_scores_with_combo() {
        let mut session = playing();
        session.combo = 2.0;
        session.max_combo = 2.0;
        session.collect_power_up(PowerUpKind::Multiplier);
        assert_eq!(session.score, 200.0);
        assert_eq!(session.power_ups_used, 1);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::PlaySound(Sound::PowerUp)));
        assert!(events.contains(&GameEvent::PlaySound(Sound::Collect)));
    }

    #[test]
    fn test_timer_reactivation_resets_elapsed() {
        let mut timers = ActivePowerUps::new(&Tuning::default());
        timers.activate(PowerUpKind::Jetpack);
        timers.age(2.0);
        assert_eq!(timers.get(PowerUpKind::Jetpack).elapsed, 2.0);
        timers.activate(PowerUpKind::Jetpack);
        assert_eq!(timers.get(PowerUpKind::Jetpack).elapsed, 0.0);
        assert!(timers.is_active(PowerUpKind::Jetpack));
    }

    #[test]
    fn test_timer_expires() {
        let mut timers = ActivePowerUps::new(&Tuning::default());
        timers.activate(PowerUpKind::Shield);
        assert!(timers.age(9.0).is_empty());
        assert!((timers.get(PowerUpKind::Shield).remaining() - 1.0).abs() < 1e-5);
        assert_eq!(timers.age(1.0), vec![PowerUpKind::Shield]);
        assert!(!timers.is_active(PowerUpKind::Shield));
        assert_eq!(timers.get(PowerUpKind::Shield).elapsed, 0.0);
    }

    #[test]
    fn test_particle_cap_respected() {
        let mut session = playing();
        session.apply_settings(&Settings::from_preset(crate::QualityPreset::Low));
        for _ in 0..10 {
            session.burst(Vec2::ZERO, "#FFFFFF", BURST_PARTICLES);
        }
        assert_eq!(session.particles.len(), session.particle_cap);
    }

    #[test]
    fn test_invariant_violation_detected() {
        let mut session = playing();
        session.combo = 11.0;
        assert_eq!(
            session.validate_invariants(),
            Err(InvariantViolation::ComboOutOfRange { combo: 11.0 })
        );
        session.combo = 1.0;
        session.speed = 2.0;
        assert!(matches!(
            session.validate_invariants(),
            Err(InvariantViolation::SpeedDistanceMismatch { .. })
        ));
    }
}
