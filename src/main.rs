//! Astro Dodge agent-mode server entry point
//!
//! Binds the bridge socket, waits for one agent, and runs the lockstep
//! session until the connection ends. Rendering and keyboard play are
//! external collaborators; this binary is the headless training server.

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;

use astro_dodge::bridge::BridgeServer;
use astro_dodge::consts::DEFAULT_PORT;
use astro_dodge::{Session, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "astro-dodge", about = "Asteroid-dodging arena, lockstep agent server")]
struct Args {
    /// Port for the agent bridge
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Global speed multiplier (scales ship and asteroid speeds uniformly,
    /// so training can run faster than real time)
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Simulation seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("starting session with seed {seed}, speed x{}", args.speed);

    let config = SessionConfig {
        port: args.port,
        agent_mode: true,
        speed_multiplier: args.speed,
        seed,
    };

    let server = BridgeServer::bind(config.port)
        .with_context(|| format!("failed to bind agent bridge on port {}", config.port))?;
    let mut connection = server
        .accept()
        .context("failed to accept agent connection")?;

    let mut session = Session::new(&config);
    session
        .run(&mut connection)
        .context("session ended with a transport error")?;

    log::info!(
        "session finished: score {}, cumulative reward {:.1}",
        session.state.score,
        session.state.cumulative_reward
    );
    Ok(())
}
