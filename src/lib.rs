//! Astro Dodge - a side-scrolling asteroid-dodging arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `bridge`: Lockstep TCP protocol for external agents (RL training)
//! - `session`: Owned per-session driver tying actions to simulation ticks

pub mod bridge;
pub mod session;
pub mod sim;

pub use session::{Session, SessionConfig};
pub use sim::{Action, Frame, GameState, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used in agent-mode (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 768.0;

    /// Entity capacities (fixed slots, never reallocated)
    pub const MAX_ASTEROIDS: usize = 50;
    pub const MAX_PROJECTILES: usize = 10;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 300.0;
    pub const SHIP_WIDTH: f32 = 40.0;
    pub const SHIP_HEIGHT: f32 = 30.0;
    pub const SHIP_START_X: f32 = 100.0;

    /// Asteroid defaults
    pub const ASTEROID_MIN_SPEED: f32 = 50.0;
    pub const ASTEROID_MAX_SPEED: f32 = 200.0;
    pub const ASTEROID_SIZE: f32 = 40.0;
    /// Visual spin, degrees per second
    pub const ASTEROID_SPIN_RATE: f32 = 50.0;
    /// Vertical drift range at spawn, before speed scaling
    pub const ASTEROID_DRIFT: f32 = 50.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_WIDTH: f32 = 8.0;
    pub const PROJECTILE_HEIGHT: f32 = 3.0;

    /// Shot economy
    pub const STARTING_SHOTS: u32 = 3;
    pub const SHOT_GRANT_INTERVAL: u32 = 50;

    /// Scoring
    pub const EVADE_SCORE: u32 = 1;
    pub const KILL_SCORE: u32 = 10;

    /// Agent bridge defaults
    pub const DEFAULT_PORT: u16 = 5555;
    /// Most asteroids reported in a single observation
    pub const MAX_OBSERVED_ASTEROIDS: usize = 10;
}
