//! Collision resolution: the three contact classes
//!
//! Evaluated in a fixed order each tick:
//! 1. asteroid-asteroid: approximate elastic deflection along the center normal
//! 2. projectile-asteroid: mutual destruction, +10 score, first match wins
//! 3. ship-asteroid: terminal, sets `game_over`
//!
//! Iteration is always in slot order, so results are reproducible for a
//! given entity layout.

use crate::consts::KILL_SCORE;

use super::physics::{Aabb, center_normal, entities_overlap};
use super::state::GameState;

/// Pushed apart beyond half-penetration to avoid re-colliding next tick
const SEPARATION_EPSILON: f32 = 0.1;

/// Overlap depth of two intersecting boxes (smallest axis overlap).
///
/// Only meaningful when the boxes actually intersect.
fn penetration_depth(a: &Aabb, b: &Aabb) -> f32 {
    let overlap_x = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
    let overlap_y = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
    overlap_x.min(overlap_y)
}

/// Deflect every overlapping asteroid pair that is actually closing.
///
/// Equal-mass 1D elastic exchange along the center normal: the normal
/// velocity components swap, tangential components are untouched. Pairs
/// moving apart are left alone so a pair that just bounced does not bounce
/// again while still overlapping. Gameplay-approximate, not energy-exact.
pub fn resolve_asteroid_pairs(state: &mut GameState) {
    for i in 0..state.asteroids.len() {
        for j in (i + 1)..state.asteroids.len() {
            let (a, b) = {
                let (lo, hi) = state.asteroids.split_at_mut(j);
                (&mut lo[i].entity, &mut hi[0].entity)
            };
            if !entities_overlap(a, b) {
                continue;
            }

            let normal = center_normal(a, b);
            let van = a.vel.dot(normal);
            let vbn = b.vel.dot(normal);
            // Relative normal velocity >= 0 means separating; skip
            if vbn - van >= 0.0 {
                continue;
            }

            a.vel += (vbn - van) * normal;
            b.vel += (van - vbn) * normal;

            let depth = penetration_depth(&Aabb::of(a), &Aabb::of(b));
            let push = depth * 0.5 + SEPARATION_EPSILON;
            a.pos -= normal * push;
            b.pos += normal * push;
        }
    }
}

/// Destroy projectile/asteroid pairs that overlap.
///
/// Each projectile consumes at most one asteroid per tick: the first
/// overlapping slot wins and both entities deactivate.
pub fn resolve_projectile_hits(state: &mut GameState) {
    for p in 0..state.projectiles.len() {
        if !state.projectiles[p].entity.active {
            continue;
        }
        for a in 0..state.asteroids.len() {
            if !state.asteroids[a].entity.active {
                continue;
            }
            if entities_overlap(&state.projectiles[p].entity, &state.asteroids[a].entity) {
                state.projectiles[p].entity.active = false;
                state.asteroids[a].entity.active = false;
                state.projectile_count -= 1;
                state.asteroid_count -= 1;
                state.score += KILL_SCORE;
                break;
            }
        }
    }
}

/// Terminal check: any ship/asteroid overlap ends the episode.
///
/// Returns true when the collision fired, so the tick driver can stop
/// mutating for the remainder of the tick.
pub fn check_ship_collision(state: &mut GameState) -> bool {
    for asteroid in &state.asteroids {
        if entities_overlap(&state.ship.entity, &asteroid.entity) {
            state.game_over = true;
            log::info!("ship hit asteroid, game over at score {}", state.score);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, Projectile};
    use glam::Vec2;

    fn state_with_asteroids(asteroids: &[(Vec2, Vec2)]) -> GameState {
        let mut state = GameState::new(1);
        for (i, (pos, vel)) in asteroids.iter().enumerate() {
            state.asteroids[i] = Asteroid::spawn(*pos, *vel, 40.0);
        }
        state.asteroid_count = asteroids.len();
        state
    }

    #[test]
    fn test_elastic_swaps_normal_components() {
        // Two squares overlapping on the x axis, closing head-on
        let mut state = state_with_asteroids(&[
            (Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0)),
            (Vec2::new(130.0, 100.0), Vec2::new(-50.0, 0.0)),
        ]);
        resolve_asteroid_pairs(&mut state);

        let va = state.asteroids[0].entity.vel;
        let vb = state.asteroids[1].entity.vel;
        assert!((va.x - (-50.0)).abs() < 1e-3, "va.x = {}", va.x);
        assert!((vb.x - 50.0).abs() < 1e-3, "vb.x = {}", vb.x);
        // Tangential components untouched
        assert_eq!(va.y, 0.0);
        assert_eq!(vb.y, 0.0);
    }

    #[test]
    fn test_elastic_separates_pair() {
        let mut state = state_with_asteroids(&[
            (Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0)),
            (Vec2::new(130.0, 100.0), Vec2::new(-50.0, 0.0)),
        ]);
        resolve_asteroid_pairs(&mut state);

        let a = state.asteroids[0].entity;
        let b = state.asteroids[1].entity;
        // Pushed apart along the normal: gap must have grown
        assert!(b.pos.x - a.pos.x > 30.0);
    }

    #[test]
    fn test_elastic_ignores_separating_pair() {
        // Overlapping but already moving apart
        let mut state = state_with_asteroids(&[
            (Vec2::new(100.0, 100.0), Vec2::new(-50.0, 0.0)),
            (Vec2::new(130.0, 100.0), Vec2::new(50.0, 0.0)),
        ]);
        resolve_asteroid_pairs(&mut state);

        assert_eq!(state.asteroids[0].entity.vel, Vec2::new(-50.0, 0.0));
        assert_eq!(state.asteroids[1].entity.vel, Vec2::new(50.0, 0.0));
        assert_eq!(state.asteroids[0].entity.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_projectile_kill_scores_once() {
        let mut state = state_with_asteroids(&[
            // Two asteroids both overlapping the projectile
            (Vec2::new(200.0, 100.0), Vec2::ZERO),
            (Vec2::new(205.0, 100.0), Vec2::ZERO),
        ]);
        state.projectiles[0] =
            Projectile::spawn(Vec2::new(210.0, 110.0), Vec2::new(500.0, 0.0));
        state.projectile_count = 1;

        resolve_projectile_hits(&mut state);

        // Only the first matching asteroid is consumed
        assert_eq!(state.score, KILL_SCORE);
        assert!(!state.projectiles[0].entity.active);
        assert!(!state.asteroids[0].entity.active);
        assert!(state.asteroids[1].entity.active);
        assert_eq!(state.asteroid_count, 1);
        assert_eq!(state.projectile_count, 0);
    }

    #[test]
    fn test_ship_collision_sets_game_over() {
        let mut state = state_with_asteroids(&[(Vec2::new(110.0, 380.0), Vec2::ZERO)]);
        assert!(check_ship_collision(&mut state));
        assert!(state.game_over);
    }

    #[test]
    fn test_ship_misses_distant_asteroid() {
        let mut state = state_with_asteroids(&[(Vec2::new(900.0, 100.0), Vec2::ZERO)]);
        assert!(!check_ship_collision(&mut state));
        assert!(!state.game_over);
    }
}
