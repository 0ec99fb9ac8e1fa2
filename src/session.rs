//! Per-session tick driver
//!
//! A `Session` owns one `GameState` plus the session-scoped configuration
//! that survives episode resets. There are no process-wide globals; several
//! independent sessions can coexist in one process (tests rely on this).

use std::io;

use crate::bridge::codec::{Observation, WireCommand, decode_action};
use crate::bridge::server::AgentTransport;
use crate::consts::SIM_DT;
use crate::sim::{Action, GameState, tick};

/// Session-scoped configuration; preserved across episode resets
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub port: u16,
    pub agent_mode: bool,
    pub speed_multiplier: f32,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port: crate::consts::DEFAULT_PORT,
            agent_mode: true,
            speed_multiplier: 1.0,
            seed: 0,
        }
    }
}

/// One simulation session: owned state, lockstep driver
pub struct Session {
    pub state: GameState,
    dt: f32,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        let mut state = GameState::new(config.seed);
        state.agent_mode = config.agent_mode;
        state.speed_multiplier = config.speed_multiplier;
        Self { state, dt: SIM_DT }
    }

    /// Apply one raw wire action and return the resulting observation.
    ///
    /// A reset swaps in a fresh episode and then runs a zero-length tick,
    /// which computes the reward of the freshly-reset state without moving
    /// anything. Anything else drives exactly one fixed-dt tick. The
    /// disconnect value never steps the simulation; `run` terminates on it
    /// before getting here, and a direct caller gets a plain no-op tick.
    pub fn step_wire(&mut self, raw: i32) -> Observation {
        match decode_action(raw) {
            WireCommand::Reset => {
                log::info!(
                    "episode reset (score {}, cumulative reward {:.1})",
                    self.state.score,
                    self.state.cumulative_reward
                );
                self.state.reset();
                tick(&mut self.state, Action::Noop, 0.0);
            }
            WireCommand::Step(action) => tick(&mut self.state, action, self.dt),
            WireCommand::Disconnect => tick(&mut self.state, Action::Noop, self.dt),
        }
        Observation::capture(&self.state)
    }

    /// Lockstep loop: block for an action, step, respond; repeat until the
    /// connection ends.
    ///
    /// Orderly termination (peer close or an explicit disconnect action)
    /// returns `Ok(())`; transport errors propagate. Either way the session
    /// is finished and must be re-established externally.
    pub fn run<T: AgentTransport>(&mut self, transport: &mut T) -> io::Result<()> {
        loop {
            let raw = match transport.recv_action() {
                Ok(raw) => raw,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    log::info!("agent closed the connection");
                    return Ok(());
                }
                Err(e) => {
                    log::warn!("connection lost: {e}");
                    return Err(e);
                }
            };

            if decode_action(raw) == WireCommand::Disconnect {
                log::info!("agent signaled disconnect");
                return Ok(());
            }

            let obs = self.step_wire(raw);
            transport.send_observation(&obs)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::codec::{WIRE_DISCONNECT, WIRE_RESET};
    use std::collections::VecDeque;

    /// In-process transport: a scripted action queue and captured responses
    struct ScriptedTransport {
        actions: VecDeque<i32>,
        responses: Vec<Observation>,
    }

    impl ScriptedTransport {
        fn new(actions: &[i32]) -> Self {
            Self {
                actions: actions.iter().copied().collect(),
                responses: Vec::new(),
            }
        }
    }

    impl AgentTransport for ScriptedTransport {
        fn recv_action(&mut self) -> io::Result<i32> {
            self.actions
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn send_observation(&mut self, obs: &Observation) -> io::Result<()> {
            self.responses.push(obs.clone());
            Ok(())
        }
    }

    fn agent_session(seed: u64) -> Session {
        Session::new(&SessionConfig {
            seed,
            ..Default::default()
        })
    }

    #[test]
    fn test_lockstep_one_response_per_action() {
        let mut session = agent_session(11);
        let mut transport = ScriptedTransport::new(&[4, 0, 1, 2, 3, 4]);
        session.run(&mut transport).unwrap();
        assert_eq!(transport.responses.len(), 6);
    }

    #[test]
    fn test_reset_immediately_after_construction() {
        // Reset as the very first action must yield a valid, non-terminal
        // observation with zero asteroids and zero score.
        let mut session = agent_session(11);
        let mut transport = ScriptedTransport::new(&[WIRE_RESET]);
        session.run(&mut transport).unwrap();

        let obs = &transport.responses[0];
        assert!(!obs.game_over);
        assert!(obs.asteroids.is_empty());
        assert_eq!(session.state.score, 0);
        assert_eq!(obs.reward, 1.0);
    }

    #[test]
    fn test_reset_preserves_session_config() {
        let mut session = Session::new(&SessionConfig {
            seed: 11,
            speed_multiplier: 3.0,
            ..Default::default()
        });
        // Run a while, then reset
        let mut actions: Vec<i32> = vec![4; 400];
        actions.push(WIRE_RESET);
        let mut transport = ScriptedTransport::new(&actions);
        session.run(&mut transport).unwrap();

        assert!(session.state.agent_mode);
        assert_eq!(session.state.speed_multiplier, 3.0);
        assert_eq!(session.state.score, 0);
        assert_eq!(session.state.asteroid_count, 0);
        assert_eq!(session.state.projectile_count, 0);
        assert!(!session.state.game_over);
    }

    #[test]
    fn test_disconnect_value_terminates_cleanly() {
        let mut session = agent_session(11);
        let mut transport = ScriptedTransport::new(&[4, WIRE_DISCONNECT, 4, 4]);
        session.run(&mut transport).unwrap();
        // Only the action before the disconnect got a response
        assert_eq!(transport.responses.len(), 1);
        assert_eq!(transport.actions.len(), 2);
    }

    #[test]
    fn test_transport_error_propagates() {
        struct FailingTransport;
        impl AgentTransport for FailingTransport {
            fn recv_action(&mut self) -> io::Result<i32> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "boom"))
            }
            fn send_observation(&mut self, _: &Observation) -> io::Result<()> {
                Ok(())
            }
        }

        let mut session = agent_session(11);
        let err = session.run(&mut FailingTransport).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn test_observation_streams_reproducible() {
        // Same seed + same action stream = byte-identical observations
        let script: Vec<i32> = (0..500).map(|i| i % 5).collect();

        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut session = agent_session(77);
            let mut transport = ScriptedTransport::new(&script);
            session.run(&mut transport).unwrap();
            runs.push(
                transport
                    .responses
                    .iter()
                    .map(|o| serde_json::to_string(o).unwrap())
                    .collect::<Vec<_>>(),
            );
        }
        assert_eq!(runs[0], runs[1]);
    }

    #[test]
    fn test_rewards_accumulate_over_episode() {
        let mut session = agent_session(11);
        let mut transport = ScriptedTransport::new(&[4, 4, 4]);
        session.run(&mut transport).unwrap();
        // Three surviving ticks with no score change: +1 each
        assert_eq!(session.state.cumulative_reward, 3.0);
        assert_eq!(transport.responses[2].reward, 1.0);
    }
}
