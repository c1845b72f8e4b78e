//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically, one tick per call.

use rand::Rng;

use super::collision::{avatar_collision, bounds_collision};
use super::effects::ScorePopup;
use super::state::{GamePhase, Session};
use crate::config::DecorPolicy;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Primary action pressed (flap, or restart after game over)
    pub flap: bool,
    /// Demo mode - the session flaps for itself
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep
///
/// Input is applied before any physics, so a tick is never split by it.
/// A restart consumes its tick: the caller sees the fresh session as-is.
pub fn tick<R: Rng>(session: &mut Session<R>, input: &TickInput) {
    if input.flap {
        let was_over = session.is_game_over();
        session.primary_action();
        if was_over {
            return;
        }
    } else if input.autopilot && session.is_running() && autopilot_wants_flap(session) {
        session.jump();
    }

    session.time_ticks += 1;

    match session.phase {
        GamePhase::GameOver => {
            if session.config.decor_policy == DecorPolicy::Animate {
                session.avatar.update_particles();
                advance_decor(session);
            }
        }
        GamePhase::Running => advance_running(session),
    }
}

/// One gameplay tick: movement, collisions, scoring, recycling
fn advance_running<R: Rng>(session: &mut Session<R>) {
    session.avatar.update();
    for obstacle in session.obstacles.iter_mut() {
        obstacle.update();
    }

    let hit = avatar_collision(&session.avatar, &session.obstacles)
        .or_else(|| bounds_collision(session.avatar.pos.y, session.config.ground_line()));
    if let Some(collision) = hit {
        session.end_run(collision);
        return;
    }

    let avatar_x = session.avatar.pos.x;
    let mut cleared = Vec::new();
    for obstacle in session.obstacles.iter_mut() {
        if !obstacle.passed && obstacle.is_behind(avatar_x) {
            obstacle.passed = true;
            cleared.push(obstacle.gap_center());
        }
    }
    for popup_at in cleared {
        session.add_point(popup_at);
    }

    session.obstacles.retain(|o| !o.is_offscreen());

    advance_decor(session);

    if session.needs_obstacle() {
        session.spawn_obstacle();
    }
}

/// Cosmetic state: scenery, popups and the level banner
fn advance_decor<R: Rng>(session: &mut Session<R>) {
    let width = session.config.width;
    let scale = session.scale();
    session.scenery.update(width, scale, &mut session.rng);

    for popup in session.popups.iter_mut() {
        popup.update();
    }
    session.popups.retain(ScorePopup::is_alive);

    session.level_banner_ticks = session.level_banner_ticks.saturating_sub(1);
}

/// Demo-mode pilot: flap when falling below a point just under the next gap's center
fn autopilot_wants_flap<R: Rng>(session: &Session<R>) -> bool {
    let avatar = &session.avatar;
    let target = match session.next_obstacle() {
        Some(obstacle) => obstacle.gap_center().y + obstacle.gap_height * 0.2,
        None => session.config.ground_line() / 2.0,
    };
    avatar.velocity >= 0.0 && avatar.pos.y > target
}
