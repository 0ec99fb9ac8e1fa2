//! Per-tick simulation driver
//!
//! One call advances the world by exactly `dt` seconds: apply the action,
//! integrate, resolve collisions, spawn, settle scoring, then (in agent
//! mode) fold the transition into a reward. Order matters and is fixed;
//! see the collision module for why the terminal check runs last.

use glam::Vec2;

use crate::consts::*;

use super::collision::{check_ship_collision, resolve_asteroid_pairs, resolve_projectile_hits};
use super::physics::{bounce_vertical, clamp_to_arena, integrate};
use super::spawn::{run_spawner, spawn_projectile};
use super::state::GameState;

/// Discrete intent consumed once per tick.
///
/// Movement intents map 1:1 to the agent wire actions 0..=3; `Fire` is only
/// reachable from the keyboard path (the wire action space has no fire
/// code). Reset is session-scoped and handled by the session driver, not
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    #[default]
    Noop,
}

/// Advance the simulation by one tick.
///
/// Once `game_over` is set, all mutation stops until a reset; only the
/// agent-mode reward bookkeeping still runs so the bridge keeps producing
/// well-formed responses for a terminated episode.
pub fn tick(state: &mut GameState, action: Action, dt: f32) {
    if !state.game_over {
        apply_action(state, action);

        // Physics phase
        integrate(&mut state.ship.entity, dt);
        clamp_to_arena(&mut state.ship.entity, ARENA_WIDTH, ARENA_HEIGHT);

        for asteroid in state.asteroids.iter_mut() {
            if !asteroid.entity.active {
                continue;
            }
            integrate(&mut asteroid.entity, dt);
            bounce_vertical(&mut asteroid.entity, ARENA_HEIGHT);
            asteroid.entity.rotation += ASTEROID_SPIN_RATE * dt;
        }
        cull_escaped_asteroids(state);

        for projectile in state.projectiles.iter_mut() {
            integrate(&mut projectile.entity, dt);
        }
        cull_escaped_projectiles(state);

        // Collision phase; the terminal check halts the rest of the tick
        resolve_asteroid_pairs(state);
        resolve_projectile_hits(state);
        if !check_ship_collision(state) {
            run_spawner(state, dt);
            grant_earned_shots(state);
        }
    }

    if state.agent_mode {
        let reward = compute_reward(state);
        state.prev_score = state.score;
        state.last_reward = reward;
        state.cumulative_reward += reward;
    }
}

/// Translate the action into ship velocity and fire intent.
///
/// Velocity is rewritten every tick, so a held key has to be re-sent each
/// tick to keep moving; the keyboard sampler and the agent both do this.
fn apply_action(state: &mut GameState, action: Action) {
    let speed = SHIP_SPEED * state.speed_multiplier;
    state.ship.entity.vel = match action {
        Action::MoveUp => Vec2::new(0.0, -speed),
        Action::MoveDown => Vec2::new(0.0, speed),
        Action::MoveLeft => Vec2::new(-speed, 0.0),
        Action::MoveRight => Vec2::new(speed, 0.0),
        Action::Fire | Action::Noop => Vec2::ZERO,
    };
    if action == Action::Fire {
        spawn_projectile(state);
    }
}

/// Retire asteroids fully past the left edge; each one evaded scores +1
fn cull_escaped_asteroids(state: &mut GameState) {
    for asteroid in state.asteroids.iter_mut() {
        if asteroid.entity.active && asteroid.entity.pos.x < -asteroid.size {
            asteroid.entity.active = false;
            state.asteroid_count -= 1;
            state.score += EVADE_SCORE;
        }
    }
}

/// Retire projectiles past the right edge
fn cull_escaped_projectiles(state: &mut GameState) {
    for projectile in state.projectiles.iter_mut() {
        if projectile.entity.active && projectile.entity.pos.x > ARENA_WIDTH {
            projectile.entity.active = false;
            state.projectile_count -= 1;
        }
    }
}

/// Grant one extra shot when the score crosses a 50-point threshold.
///
/// Deliberately capped at one shot per tick: a single tick that jumps more
/// than 50 points still grants one (the latch records the score it fired
/// at, not the threshold).
fn grant_earned_shots(state: &mut GameState) {
    if state.score / SHOT_GRANT_INTERVAL > state.last_shot_grant / SHOT_GRANT_INTERVAL {
        state.available_shots += 1;
        state.last_shot_grant = state.score;
    }
}

/// Survival reward for the transition that just settled.
///
/// +1 per surviving tick, -100 on the terminal tick, +10 per score point
/// gained. No proximity shaping; sparse on purpose.
fn compute_reward(state: &GameState) -> f32 {
    let base = if state.game_over { -100.0 } else { 1.0 };
    let delta = state.score.saturating_sub(state.prev_score);
    base + 10.0 * delta as f32
}
