//! Arena driver binary.
//!
//! Loads content, simulates one duel, writes the step log as JSON and,
//! when `ARENA_REPLAY` is set, replays it through the headless renderer.
//!
//! ```bash
//! ARENA_FIGHT_ID=fight-42 ARENA_LEFT=ares ARENA_RIGHT=hera cargo run -p arena
//! RUST_LOG=playback=debug ARENA_REPLAY=true ARENA_SPEED=8 cargo run -p arena
//! ```

mod arena;
mod config;

use anyhow::{Context, Result};
use playback::PlaybackOutcome;

use crate::arena::Duel;
use crate::config::ArenaConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ArenaConfig::from_env();
    tracing::debug!(?config, "arena configuration");

    let duel = Duel::load(&config)?;
    let log = duel.simulate()?;

    let json = log.to_json_pretty()?;
    match &config.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write step log to {}", path.display()))?;
            tracing::info!(path = %path.display(), "step log written");
        }
        None => println!("{json}"),
    }
    tracing::info!(digest = %hex::encode(log.digest()?), "step log digest");

    if config.replay {
        match duel.replay(&json, config.speed).await? {
            PlaybackOutcome::Completed {
                steps,
                winner,
                fighters,
                ..
            } => {
                for fighter in &fighters {
                    tracing::info!(
                        fighter = %fighter.id,
                        name = %fighter.name,
                        hp = fighter.hp,
                        max_hp = fighter.max_hp,
                        "replay final state"
                    );
                }
                tracing::info!(steps, %winner, "replay complete");
            }
            PlaybackOutcome::Cancelled { cursor } => {
                tracing::warn!(cursor, "replay cancelled");
            }
        }
    }

    Ok(())
}
