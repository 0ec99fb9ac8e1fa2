//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only, no internal clock
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (fixed slot order)
//! - No rendering or network dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use physics::{Aabb, aabb_overlap};
pub use state::{Asteroid, Entity, Frame, GameState, Projectile, Ship};
pub use tick::{Action, tick};
