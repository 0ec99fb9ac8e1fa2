//! Accumulator-driven asteroid spawning and projectile firing
//!
//! The spawner integrates a score-dependent rate into `spawn_accumulator`
//! and emits one asteroid per whole unit. Spawn counts over a long interval
//! converge to `rate * elapsed` regardless of frame timing, which a per-tick
//! random roll does not guarantee.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::state::{Asteroid, GameState, Projectile};

/// Asteroids per second for the current score
pub fn spawn_rate(score: u32) -> f32 {
    (0.5 + score as f32 / 100.0).clamp(0.5, 2.0)
}

/// Per-spawn difficulty multiplier: +10% per 10 points, capped at 2.5x
pub fn difficulty_multiplier(score: u32) -> f32 {
    (1.0 + (score / 10) as f32 * 0.1).min(2.5)
}

/// Accumulate spawn credit and emit asteroids for every whole unit
pub fn run_spawner(state: &mut GameState, dt: f32) {
    state.spawn_accumulator += dt * spawn_rate(state.score);
    while state.spawn_accumulator >= 1.0 {
        state.spawn_accumulator -= 1.0;
        spawn_asteroid(state);
    }
}

/// Place one asteroid at the right edge, if a slot is free.
///
/// A full store drops the spawn silently; the accumulator credit is still
/// consumed by the caller.
pub fn spawn_asteroid(state: &mut GameState) {
    let Some(slot) = state.free_asteroid_slot() else {
        return;
    };

    let size = ASTEROID_SIZE;
    let scale = difficulty_multiplier(state.score) * state.speed_multiplier;
    let y = state.rng.random_range(0.0..(ARENA_HEIGHT - size));
    let vx = -state.rng.random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED) * scale;
    let vy = state.rng.random_range(-ASTEROID_DRIFT..ASTEROID_DRIFT) * scale;

    state.asteroids[slot] = Asteroid::spawn(Vec2::new(ARENA_WIDTH, y), Vec2::new(vx, vy), size);
    state.asteroid_count += 1;
}

/// Fire a projectile from the ship's leading edge.
///
/// No-op when out of shots or out of slots; both are expected steady-state
/// conditions, not faults.
pub fn spawn_projectile(state: &mut GameState) {
    if state.available_shots == 0 {
        return;
    }
    let Some(slot) = state.free_projectile_slot() else {
        return;
    };

    let ship = &state.ship.entity;
    let pos = Vec2::new(
        ship.pos.x + ship.width,
        ship.pos.y + ship.height / 2.0 - PROJECTILE_HEIGHT / 2.0,
    );
    let vel = Vec2::new(PROJECTILE_SPEED * state.speed_multiplier, 0.0);

    state.projectiles[slot] = Projectile::spawn(pos, vel);
    state.projectile_count += 1;
    state.available_shots -= 1;
}
