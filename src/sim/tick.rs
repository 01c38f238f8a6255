//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::autopilot;
use super::collision::resolve_collisions;
use super::environment::boundaries_crossed;
use super::events::GameEvent;
use super::spawner;
use super::state::{GamePhase, GameSession};
use crate::consts::*;

/// A command from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Jump,
    Slide,
    MoveLeft,
    MoveRight,
    Pause,
    Resume,
    Start,
    Restart,
    ShowMenu,
}

impl GameSession {
    /// Route a command to its session method; returns whether it took effect
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Jump => self.jump(),
            Command::Slide => self.slide(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Start => self.start(),
            Command::Restart => self.restart(),
            Command::ShowMenu => self.show_menu(),
        }
    }
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands received since the previous tick, in arrival order
    pub commands: Vec<Command>,
    /// Let the autopilot steer
    pub autopilot: bool,
}

impl TickInput {
    pub fn with(commands: &[Command]) -> Self {
        Self {
            commands: commands.to_vec(),
            autopilot: false,
        }
    }
}

/// Advance the session by `dt` seconds
///
/// Per-frame tuning values are scaled by `dt / SIM_DT`; at the fixed step the
/// scale is exactly 1.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    for &command in &input.commands {
        session.apply(command);
    }

    // Frozen outside of play
    if session.phase != GamePhase::Playing {
        return;
    }

    if input.autopilot {
        for command in autopilot::plan(session) {
            session.apply(command);
        }
    }

    let frames = dt / SIM_DT;
    session.time_ticks += 1;
    session.sim_time += dt;

    spawner::spawn(session);

    // Move everything
    let trail_len = session.trail_length;
    session.player.update(frames, dt, &session.tuning, trail_len);
    for obstacle in &mut session.obstacles {
        obstacle.update(frames, &session.tuning);
    }
    for power_up in &mut session.power_ups {
        power_up.update(frames, session.sim_time, &session.tuning);
    }
    for particle in &mut session.particles {
        particle.update(frames, dt);
    }
    let run_speed = session.speed;
    for layer in &mut session.backgrounds {
        layer.update(frames, run_speed);
    }

    // Cull: every obstacle that made it off-screen is a pass
    let passed = session.obstacles.iter().filter(|o| o.is_off_screen()).count();
    if passed > 0 {
        session.obstacles.retain(|o| !o.is_off_screen());
        for _ in 0..passed {
            session.pass_obstacle();
        }
    }
    session.power_ups.retain(|p| !p.is_off_screen());
    session.particles.retain(|p| !p.is_dead());

    for kind in session.active_power_ups.age(dt) {
        log::debug!("{} expired", kind.name());
    }

    if resolve_collisions(session) {
        return;
    }

    let prev_distance = session.distance;
    session.advance_distance(frames);
    let crossings = boundaries_crossed(
        prev_distance,
        session.distance,
        session.tuning.environment_interval,
    );
    for _ in 0..crossings {
        session.advance_environment();
    }

    session.emit(GameEvent::StatsUpdated(session.stats()));

    debug_assert_eq!(session.validate_invariants(), Ok(()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::entities::{Obstacle, ObstacleKind, PowerUp, PowerUpKind};
    use crate::sim::environment::Environment;
    use crate::sim::events::Sound;

    fn quiet_tuning() -> Tuning {
        Tuning {
            obstacle_spawn_chance: 0.0,
            power_up_spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn playing(tuning: Tuning) -> GameSession {
        let mut session = GameSession::new(12345, tuning);
        tick(&mut session, &TickInput::with(&[Command::Start]), SIM_DT);
        session.drain_events();
        session
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut session = GameSession::new(12345, quiet_tuning());
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Menu);
        assert_eq!(session.time_ticks, 0);

        tick(&mut session, &TickInput::with(&[Command::Start]), SIM_DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.time_ticks, 1);
    }

    #[test]
    fn test_tick_pause_freezes() {
        let mut session = playing(quiet_tuning());
        tick(&mut session, &TickInput::with(&[Command::Pause]), SIM_DT);
        assert_eq!(session.phase, GamePhase::Paused);

        let before = (session.distance, session.time_ticks, session.obstacles.len());
        for _ in 0..100 {
            tick(&mut session, &TickInput::default(), SIM_DT);
        }
        assert_eq!(before, (session.distance, session.time_ticks, session.obstacles.len()));

        tick(&mut session, &TickInput::with(&[Command::Resume]), SIM_DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(session.distance > before.0);
    }

    #[test]
    fn test_distance_and_speed() {
        let mut session = playing(quiet_tuning());
        let d0 = session.distance;
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert!(session.distance > d0);
        assert_eq!(
            session.speed,
            (1.0 + session.distance / 1000.0_f32).min(5.0)
        );
    }

    #[test]
    fn test_jump_emits_sound_once() {
        let mut session = playing(quiet_tuning());
        for _ in 0..20 {
            tick(&mut session, &TickInput::default(), SIM_DT);
        }
        session.drain_events();
        tick(&mut session, &TickInput::with(&[Command::Jump, Command::Jump]), SIM_DT);
        let jumps = session
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::PlaySound(Sound::Jump))
            .count();
        assert_eq!(jumps, 1);
        assert!(session.player.jumping);
    }

    #[test]
    fn test_crash_ends_run() {
        let mut session = playing(quiet_tuning());
        let id = session.next_entity_id();
        let pos = session.player.pos;
        session
            .obstacles
            .push(Obstacle::new(id, ObstacleKind::Spike, pos, Environment::City, 40.0, 1.0));
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::GameOver);

        let events = session.drain_events();
        assert!(events.contains(&GameEvent::PlaySound(Sound::Crash)));
        assert!(events.contains(&GameEvent::StateChanged(GamePhase::GameOver)));

        // Frozen afterwards
        let ticks = session.time_ticks;
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.time_ticks, ticks);
    }

    #[test]
    fn test_pickup_via_tick() {
        let mut session = playing(quiet_tuning());
        let id = session.next_entity_id();
        let pos = session.player.pos;
        session
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::Magnet, pos, 30.0));
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert!(session.power_ups.is_empty());
        assert!(session.active_power_ups.is_active(PowerUpKind::Magnet));
        assert_eq!(session.power_ups_used, 1);
        assert_eq!(session.score, 100.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(Tuning::default());
        let mut b = playing(Tuning::default());
        let inputs = [
            TickInput::with(&[Command::MoveLeft]),
            TickInput::with(&[Command::Jump]),
            TickInput::default(),
            TickInput::with(&[Command::Slide]),
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.distance, b.distance);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn test_particle_cap_does_not_change_gameplay() {
        let mut a = playing(Tuning::default());
        let mut b = playing(Tuning::default());
        b.particle_cap = 0;
        for _ in 0..3000 {
            tick(&mut a, &TickInput::default(), SIM_DT);
            tick(&mut b, &TickInput::default(), SIM_DT);
        }
        assert!(b.particles.is_empty());
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        let ids = |s: &GameSession| s.obstacles.iter().map(|o| o.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }
}
