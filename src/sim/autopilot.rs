//! Idle/demo autopilot
//!
//! Reads the session and suggests commands for this tick: jump so the arc
//! clears an approaching obstacle, or hop so the low part of the arc sweeps
//! through an approaching power-up. Obstacles win when both apply.

use super::state::GameSession;
use super::tick::Command;

/// Gap window (units between the obstacle's leading edge and the player) in
/// which a jump clears it at base scroll speed
const OBSTACLE_JUMP_WINDOW: (f32, f32) = (12.0, 24.0);
/// Gap window for catching a power-up on the way up
const POWER_UP_JUMP_WINDOW: (f32, f32) = (0.0, 6.0);

pub fn plan(session: &GameSession) -> Vec<Command> {
    let player = &session.player;
    if !player.is_grounded() || player.sliding {
        return Vec::new();
    }

    let front = player.pos.x + player.size.x;
    let in_window = |x: f32, (lo, hi): (f32, f32)| {
        let gap = x - front;
        gap >= lo && gap < hi
    };

    let obstacle_ahead = session
        .obstacles
        .iter()
        .any(|o| in_window(o.pos.x, OBSTACLE_JUMP_WINDOW));
    let power_up_ahead = session
        .power_ups
        .iter()
        .any(|p| in_window(p.pos.x, POWER_UP_JUMP_WINDOW));

    if obstacle_ahead || power_up_ahead {
        vec![Command::Jump]
    } else {
        Vec::new()
    }
}
