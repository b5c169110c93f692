//! Arena driver configuration.
use std::env;
use std::path::PathBuf;

use fight_core::seed_from_fight_id;

/// Fight identifier used when neither `ARENA_SEED` nor `ARENA_FIGHT_ID` is set.
pub const DEFAULT_FIGHT_ID: &str = "arena";

#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub data_dir: PathBuf,
    pub roster: Option<PathBuf>,
    pub tables: Option<PathBuf>,
    pub fight_id: Option<String>,
    pub seed: Option<u64>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub output: Option<PathBuf>,
    pub replay: bool,
    pub speed: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            roster: None,
            tables: None,
            fight_id: None,
            seed: None,
            left: None,
            right: None,
            output: None,
            replay: false,
            speed: 1.0,
        }
    }
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: `data`)
    /// - `ARENA_ROSTER` - Roster file (default: `<data dir>/roster.ron`)
    /// - `ARENA_TABLES` - Tables file (default: `<data dir>/tables.toml` if present)
    /// - `ARENA_FIGHT_ID` - Fight identifier the seed is derived from
    /// - `ARENA_SEED` - Explicit seed, overrides `ARENA_FIGHT_ID`
    /// - `ARENA_LEFT` / `ARENA_RIGHT` - Brute id or name (default: first two brutes)
    /// - `ARENA_OUTPUT` - Step log destination (default: stdout)
    /// - `ARENA_REPLAY` - Replay the log headlessly after simulating (default: false)
    /// - `ARENA_SPEED` - Replay speed multiplier (default: 1.0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("ARENA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.roster = env::var("ARENA_ROSTER").ok().map(PathBuf::from);
        config.tables = env::var("ARENA_TABLES").ok().map(PathBuf::from);

        config.fight_id = env::var("ARENA_FIGHT_ID").ok();
        config.seed = read_env::<u64>("ARENA_SEED");

        config.left = env::var("ARENA_LEFT").ok();
        config.right = env::var("ARENA_RIGHT").ok();
        config.output = env::var("ARENA_OUTPUT").ok().map(PathBuf::from);

        if let Some(replay) = read_env::<bool>("ARENA_REPLAY") {
            config.replay = replay;
        } else if env::var("ARENA_REPLAY").is_ok() {
            // A bare `ARENA_REPLAY=` also enables replay.
            config.replay = true;
        }
        if let Some(speed) = read_env::<f32>("ARENA_SPEED") {
            config.speed = speed;
        }

        config
    }

    /// Seed of the fight: explicit seed first, then the fight id.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            seed_from_fight_id(self.fight_id.as_deref().unwrap_or(DEFAULT_FIGHT_ID))
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_wins_over_fight_id() {
        let config = ArenaConfig {
            seed: Some(7),
            fight_id: Some("fight-1".into()),
            ..ArenaConfig::default()
        };
        assert_eq!(config.seed(), 7);
    }

    #[test]
    fn fight_id_derives_the_seed() {
        let config = ArenaConfig {
            fight_id: Some("fight-1".into()),
            ..ArenaConfig::default()
        };
        assert_eq!(config.seed(), seed_from_fight_id("fight-1"));
        assert_eq!(ArenaConfig::default().seed(), seed_from_fight_id(DEFAULT_FIGHT_ID));
    }
}
