//! Game state and core simulation types
//!
//! Entity slots are fixed-capacity arrays; an inactive slot is a free slot.
//! Nothing here allocates after construction, which keeps the observation
//! wire format bounded and slot iteration order stable across a session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Common simulated-object fields, embedded in every entity kind.
///
/// The (width, height) box is anchored at `pos` (top-left). An inactive
/// entity is skipped by physics, collision, and encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual-only, degrees
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub active: bool,
}

impl Entity {
    pub const fn inactive() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            active: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) * 0.5
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy)]
pub struct Ship {
    pub entity: Entity,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            entity: Entity {
                pos: Vec2::new(SHIP_START_X, ARENA_HEIGHT / 2.0),
                vel: Vec2::ZERO,
                rotation: 0.0,
                width: SHIP_WIDTH,
                height: SHIP_HEIGHT,
                active: true,
            },
        }
    }
}

/// An asteroid entity (always square, width == height == size)
#[derive(Debug, Clone, Copy)]
pub struct Asteroid {
    pub entity: Entity,
    pub size: f32,
}

impl Asteroid {
    pub const fn inactive() -> Self {
        Self {
            entity: Entity::inactive(),
            size: 0.0,
        }
    }

    /// Place a live asteroid with the given position and velocity
    pub fn spawn(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            entity: Entity {
                pos,
                vel,
                rotation: 0.0,
                width: size,
                height: size,
                active: true,
            },
            size,
        }
    }
}

/// A projectile fired from the ship's leading edge
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub entity: Entity,
}

impl Projectile {
    pub const fn inactive() -> Self {
        Self {
            entity: Entity::inactive(),
        }
    }

    pub fn spawn(pos: Vec2, vel: Vec2) -> Self {
        Self {
            entity: Entity {
                pos,
                vel,
                rotation: 0.0,
                width: PROJECTILE_WIDTH,
                height: PROJECTILE_HEIGHT,
                active: true,
            },
        }
    }
}

/// Complete simulation state for one episode.
///
/// Created once per episode and replaced wholesale on reset; session-scoped
/// configuration (agent mode, speed multiplier, RNG stream) survives the
/// swap, everything else starts fresh.
#[derive(Debug, Clone)]
pub struct GameState {
    pub ship: Ship,
    pub asteroids: [Asteroid; MAX_ASTEROIDS],
    pub projectiles: [Projectile; MAX_PROJECTILES],
    pub asteroid_count: usize,
    pub projectile_count: usize,
    pub score: u32,
    pub available_shots: u32,
    /// Score at which the last extra shot was granted (edge-trigger latch)
    pub last_shot_grant: u32,
    pub game_over: bool,
    /// Integrates `dt * spawn_rate`; one asteroid per whole unit
    pub spawn_accumulator: f32,
    pub agent_mode: bool,
    pub cumulative_reward: f32,
    pub last_reward: f32,
    pub prev_score: u32,
    /// Session-level scalar applied to ship, asteroid, and projectile speeds
    pub speed_multiplier: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh episode state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a fresh episode reusing an existing RNG stream.
    ///
    /// Used on reset so a seeded session stays reproducible across episode
    /// boundaries instead of replaying the first episode's spawns.
    pub fn with_rng(seed: u64, rng: Pcg32) -> Self {
        Self {
            ship: Ship::default(),
            asteroids: [Asteroid::inactive(); MAX_ASTEROIDS],
            projectiles: [Projectile::inactive(); MAX_PROJECTILES],
            asteroid_count: 0,
            projectile_count: 0,
            score: 0,
            available_shots: STARTING_SHOTS,
            last_shot_grant: 0,
            game_over: false,
            spawn_accumulator: 0.0,
            agent_mode: false,
            cumulative_reward: 0.0,
            last_reward: 0.0,
            prev_score: 0,
            speed_multiplier: 1.0,
            seed,
            rng,
        }
    }

    /// Replace this state with a fresh episode, keeping session config.
    ///
    /// Agent-mode flag, speed multiplier, and the RNG stream carry over;
    /// score, entities, and reward tracking start from zero.
    pub fn reset(&mut self) {
        let agent_mode = self.agent_mode;
        let speed_multiplier = self.speed_multiplier;
        let rng = self.rng.clone();
        *self = Self::with_rng(self.seed, rng);
        self.agent_mode = agent_mode;
        self.speed_multiplier = speed_multiplier;
    }

    /// Active asteroids in slot order
    pub fn active_asteroids(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter().filter(|a| a.entity.active)
    }

    /// Index of the first free asteroid slot, if any
    pub fn free_asteroid_slot(&self) -> Option<usize> {
        self.asteroids.iter().position(|a| !a.entity.active)
    }

    /// Index of the first free projectile slot, if any
    pub fn free_projectile_slot(&self) -> Option<usize> {
        self.projectiles.iter().position(|p| !p.entity.active)
    }

    /// Read-only render view of the current tick
    pub fn frame(&self) -> Frame {
        Frame {
            ship: self.ship.entity,
            asteroids: self
                .asteroids
                .iter()
                .filter(|a| a.entity.active)
                .map(|a| a.entity)
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .filter(|p| p.entity.active)
                .map(|p| p.entity)
                .collect(),
            score: self.score,
            available_shots: self.available_shots,
            game_over: self.game_over,
        }
    }
}

/// The rendering view: entity rectangles/rotations plus HUD counters.
///
/// The renderer consumes only this; it never touches `GameState`.
#[derive(Debug, Clone)]
pub struct Frame {
    pub ship: Entity,
    pub asteroids: Vec<Entity>,
    pub projectiles: Vec<Entity>,
    pub score: u32,
    pub available_shots: u32,
    pub game_over: bool,
}
