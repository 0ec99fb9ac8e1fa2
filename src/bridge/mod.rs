//! Lockstep agent bridge
//!
//! A single-client request/response channel: one 4-byte action in, one
//! simulation tick, one length-prefixed JSON observation out. The receive
//! call blocks the whole simulation thread on purpose; that is what keeps
//! the agent's decision cadence and simulation time exactly in sync.

pub mod codec;
pub mod server;

pub use codec::{AsteroidObs, Observation, ShipObs, WireCommand, decode_action};
pub use server::{AgentTransport, BridgeConnection, BridgeServer};
