//! TCP transport for the agent bridge
//!
//! `BridgeServer` owns the listening socket; `BridgeConnection` owns the
//! one accepted client. Both sockets close on drop. There is no reconnect:
//! a broken connection ends the session and a new one must be established
//! externally.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};

use super::codec::Observation;

/// Blocking action/observation channel between the session and an agent.
///
/// The simulation core only sees this trait, so tests drive a session with
/// an in-process fake instead of a real socket.
pub trait AgentTransport {
    /// Block until the next 4-byte action arrives
    fn recv_action(&mut self) -> io::Result<i32>;
    /// Send one length-prefixed JSON observation
    fn send_observation(&mut self, obs: &Observation) -> io::Result<()>;
}

/// The listening half of the bridge (LISTENING state)
pub struct BridgeServer {
    listener: TcpListener,
}

impl BridgeServer {
    /// Bind the server socket. Failure here is fatal to agent-mode startup.
    pub fn bind(port: u16) -> io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        log::info!("agent bridge listening on port {}", listener.local_addr()?.port());
        Ok(Self { listener })
    }

    /// Actual bound port (useful when binding port 0 in tests)
    pub fn port(&self) -> io::Result<u16> {
        Ok(self.listener.local_addr()?.port())
    }

    /// Block until one agent connects (LISTENING -> CONNECTED)
    pub fn accept(&self) -> io::Result<BridgeConnection> {
        log::info!("waiting for agent connection...");
        let (stream, addr) = self.listener.accept()?;
        stream.set_nodelay(true)?;
        log::info!("agent connected from {addr}");
        Ok(BridgeConnection { stream })
    }
}

/// The accepted client connection (CONNECTED/STEPPING states)
pub struct BridgeConnection {
    stream: TcpStream,
}

impl BridgeConnection {
    /// Client-side connect, used by tests and in-process harnesses
    pub fn connect(port: u16) -> io::Result<Self> {
        let stream = TcpStream::connect(("127.0.0.1", port))?;
        stream.set_nodelay(true)?;
        Ok(Self { stream })
    }

    /// Client side of the protocol: push one raw action value
    pub fn send_action(&mut self, raw: i32) -> io::Result<()> {
        self.stream.write_all(&raw.to_le_bytes())?;
        self.stream.flush()
    }

    /// Client side of the protocol: read one observation response
    pub fn recv_observation(&mut self) -> io::Result<Observation> {
        let mut len_buf = [0u8; 4];
        self.stream.read_exact(&mut len_buf)?;
        let len = i32::from_le_bytes(len_buf);
        if len < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("negative payload length {len}"),
            ));
        }
        let mut payload = vec![0u8; len as usize];
        self.stream.read_exact(&mut payload)?;
        serde_json::from_slice(&payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl AgentTransport for BridgeConnection {
    fn recv_action(&mut self) -> io::Result<i32> {
        let mut buf = [0u8; 4];
        self.stream.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn send_observation(&mut self, obs: &Observation) -> io::Result<()> {
        let payload = serde_json::to_vec(obs)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let len = payload.len() as i32;
        self.stream.write_all(&len.to_le_bytes())?;
        self.stream.write_all(&payload)?;
        self.stream.flush()
    }
}
