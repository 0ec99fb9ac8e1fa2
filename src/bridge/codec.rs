//! Wire codec for the agent bridge
//!
//! Actions arrive as one little-endian i32 per tick. Responses are
//! `[4-byte LE length][UTF-8 JSON]`. The JSON schema is fixed: ship pose,
//! up to ten asteroids in slot order, scalar reward, terminal flag.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_OBSERVED_ASTEROIDS;
use crate::sim::{Action, GameState};

/// Wire value requesting an episode reset
pub const WIRE_RESET: i32 = -1;
/// Wire value a client may send to signal error/disconnect
pub const WIRE_DISCONNECT: i32 = -2;

/// A decoded wire action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireCommand {
    /// Discard the episode and start fresh
    Reset,
    /// Client-signaled termination; treated the same as a failed read
    Disconnect,
    /// Drive one simulation tick with this action
    Step(Action),
}

/// Map a raw wire integer to a command.
///
/// Unknown values degrade to no-op rather than erroring; the action space
/// may grow on the client side without breaking older servers.
pub fn decode_action(raw: i32) -> WireCommand {
    match raw {
        WIRE_RESET => WireCommand::Reset,
        WIRE_DISCONNECT => WireCommand::Disconnect,
        0 => WireCommand::Step(Action::MoveUp),
        1 => WireCommand::Step(Action::MoveDown),
        2 => WireCommand::Step(Action::MoveLeft),
        3 => WireCommand::Step(Action::MoveRight),
        _ => WireCommand::Step(Action::Noop),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipObs {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsteroidObs {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

/// The agent-facing snapshot sent after every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub starship: ShipObs,
    pub asteroids: Vec<AsteroidObs>,
    pub reward: f32,
    pub game_over: bool,
}

impl Observation {
    /// Snapshot the state after a tick has settled.
    ///
    /// At most ten asteroids are reported, taken as the first active slots
    /// in storage order so identical seeds yield identical observation
    /// streams run-to-run.
    pub fn capture(state: &GameState) -> Self {
        let ship = &state.ship.entity;
        Self {
            starship: ShipObs {
                x: ship.pos.x,
                y: ship.pos.y,
                vx: ship.vel.x,
                vy: ship.vel.y,
            },
            asteroids: state
                .active_asteroids()
                .take(MAX_OBSERVED_ASTEROIDS)
                .map(|a| AsteroidObs {
                    x: a.entity.pos.x,
                    y: a.entity.pos.y,
                    vx: a.entity.vel.x,
                    vy: a.entity.vel.y,
                    radius: a.size / 2.0,
                })
                .collect(),
            reward: state.last_reward,
            game_over: state.game_over,
        }
    }
}
