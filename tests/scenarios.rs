use glam::Vec2;

use super_surfers::Tuning;
use super_surfers::consts::*;
use super_surfers::sim::{
    Command, Environment, GameEvent, GamePhase, GameSession, Obstacle, ObstacleKind, PowerUp,
    PowerUpKind, Sound, TickInput, tick,
};

/// Balance with spawning switched off so scenarios place every entity
fn quiet() -> Tuning {
    Tuning {
        obstacle_spawn_chance: 0.0,
        power_up_spawn_chance: 0.0,
        ..Tuning::default()
    }
}

/// A running session with the player landed and the event queue empty
fn playing(seed: u64) -> GameSession {
    let mut session = GameSession::new(seed, quiet());
    tick(&mut session, &TickInput::with(&[Command::Start]), SIM_DT);
    for _ in 0..30 {
        tick(&mut session, &TickInput::default(), SIM_DT);
    }
    assert!(session.player.is_grounded());
    session.drain_events();
    session
}

fn step(session: &mut GameSession, ticks: usize) {
    for _ in 0..ticks {
        tick(session, &TickInput::default(), SIM_DT);
    }
}

fn obstacle_at(session: &mut GameSession, kind: ObstacleKind, pos: Vec2) {
    let id = session.next_entity_id();
    let env = session.environment;
    session
        .obstacles
        .push(Obstacle::new(id, kind, pos, env, 40.0, 1.0));
}

fn power_up_on_player(session: &mut GameSession, kind: PowerUpKind) {
    let id = session.next_entity_id();
    let pos = session.player.pos;
    session.power_ups.push(PowerUp::new(id, kind, pos, 30.0));
}

#[test]
fn ten_passes_build_combo_and_score() {
    let mut session = playing(1);
    for _ in 0..10 {
        obstacle_at(&mut session, ObstacleKind::Barrier, Vec2::new(CULL_X + 1.0, GROUND_Y));
    }
    step(&mut session, 1);

    assert!(session.obstacles.is_empty());
    assert!((session.combo - 2.0).abs() < 1e-4, "combo {}", session.combo);
    assert_eq!(session.max_combo, session.combo);

    let expected: f64 = (0..10).map(|k| 10.0 * (1.0 + 0.1 * k as f64)).sum();
    assert!((session.score - expected).abs() < 1e-3, "score {}", session.score);
}

#[test]
fn crossing_one_boundary_changes_environment_once() {
    let mut session = playing(2);
    session.distance = 1999.9;
    session.speed = super_surfers::speed_for_distance(1999.9, 1000.0);

    step(&mut session, 1);
    assert_eq!(session.environment, Environment::Space);
    session.drain_events();

    // Sitting just past the boundary does not re-trigger
    step(&mut session, 60);
    let changes = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::EnvironmentChanged(_)))
        .count();
    assert_eq!(changes, 0);
    assert_eq!(session.environment, Environment::Space);
}

#[test]
fn large_step_over_boundary_counts_once() {
    let mut session = playing(3);
    session.distance = 1990.0;
    session.speed = super_surfers::speed_for_distance(1990.0, 1000.0);

    // One tick long enough to carry 1990 to ~2010
    let frames = 20.0 / (session.speed * session.tuning.distance_per_frame);
    tick(&mut session, &TickInput::default(), frames * SIM_DT);

    assert!(session.distance > 2000.0 && session.distance < 2020.0);
    let changes: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::EnvironmentChanged(env) => Some(env),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![Environment::Space]);
}

#[test]
fn shield_absorbs_obstacle() {
    let mut session = playing(4);
    power_up_on_player(&mut session, PowerUpKind::Shield);
    step(&mut session, 1);
    assert!(session.active_power_ups.is_active(PowerUpKind::Shield));

    let pos = session.player.pos;
    obstacle_at(&mut session, ObstacleKind::Spike, pos);
    step(&mut session, 1);

    assert_eq!(session.phase, GamePhase::Playing);
    assert!(session.obstacles.is_empty());
    let events = session.drain_events();
    assert!(!events.contains(&GameEvent::PlaySound(Sound::Crash)));
}

#[test]
fn unshielded_hit_ends_run() {
    let mut session = playing(5);
    session.score = 321.0;
    let pos = session.player.pos;
    obstacle_at(&mut session, ObstacleKind::Barrier, pos);
    step(&mut session, 1);

    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.best_score, 321.0);

    let events = session.drain_events();
    let crash = events
        .iter()
        .position(|e| *e == GameEvent::PlaySound(Sound::Crash));
    let over = events
        .iter()
        .position(|e| *e == GameEvent::StateChanged(GamePhase::GameOver));
    assert!(crash.is_some() && over.is_some());
    assert!(events.iter().any(|e| matches!(e, GameEvent::StatsUpdated(s) if s.score == 321.0)));
}

#[test]
fn second_pickup_restarts_window() {
    let mut session = playing(6);
    power_up_on_player(&mut session, PowerUpKind::Jetpack);
    step(&mut session, 1);
    assert!(session.active_power_ups.is_active(PowerUpKind::Jetpack));

    // One second later, pick up another
    step(&mut session, 59);
    power_up_on_player(&mut session, PowerUpKind::Jetpack);
    step(&mut session, 1);
    assert_eq!(session.active_power_ups.get(PowerUpKind::Jetpack).elapsed, 0.0);
    assert_eq!(session.power_ups_used, 2);

    // Measured from the second pickup, not the first
    step(&mut session, 299);
    assert!(session.active_power_ups.is_active(PowerUpKind::Jetpack));
    step(&mut session, 3);
    assert!(!session.active_power_ups.is_active(PowerUpKind::Jetpack));
}

#[test]
fn restart_after_game_over_starts_fresh() {
    let mut session = playing(7);
    let pos = session.player.pos;
    obstacle_at(&mut session, ObstacleKind::Hole, pos);
    step(&mut session, 1);
    assert_eq!(session.phase, GamePhase::GameOver);

    tick(&mut session, &TickInput::with(&[Command::Restart]), SIM_DT);
    assert_eq!(session.phase, GamePhase::Playing);
    assert!(session.obstacles.is_empty());
    assert_eq!(session.combo, 1.0);
    assert_eq!(session.environment, Environment::City);
    assert_eq!(session.time_ticks, 1);
}

#[test]
fn menu_round_trip_ignores_player_commands() {
    let mut session = playing(8);
    tick(&mut session, &TickInput::with(&[Command::Pause, Command::ShowMenu]), SIM_DT);
    assert_eq!(session.phase, GamePhase::Menu);

    let lane = session.player.lane;
    tick(&mut session, &TickInput::with(&[Command::MoveLeft, Command::Jump]), SIM_DT);
    assert_eq!(session.player.lane, lane);
    assert!(!session.player.jumping);
}

#[test]
fn autopilot_runs_are_reproducible() {
    let run = |seed: u64| {
        let mut session = GameSession::new(seed, Tuning::default());
        tick(&mut session, &TickInput::with(&[Command::Start]), SIM_DT);
        let input = TickInput {
            autopilot: true,
            ..TickInput::default()
        };
        for _ in 0..2000 {
            tick(&mut session, &input, SIM_DT);
            if session.phase == GamePhase::GameOver {
                break;
            }
        }
        session.stats()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn runs_begin_in_tuned_environment() {
    let tuning = Tuning {
        start_environment: Environment::Ocean,
        ..quiet()
    };
    let mut session = GameSession::new(9, tuning);
    tick(&mut session, &TickInput::with(&[Command::Start]), SIM_DT);
    assert_eq!(session.environment, Environment::Ocean);

    session.distance = 1999.9;
    session.speed = super_surfers::speed_for_distance(1999.9, 1000.0);
    step(&mut session, 1);
    assert_eq!(session.environment, Environment::City);
}
