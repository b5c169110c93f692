//! Simulate a duel and optionally replay it headlessly.

use anyhow::{Context, Result, anyhow, bail};
use fight_content::{ContentFactory, Roster, RosterLoader, TablesLoader};
use fight_core::{BruteRecord, FightTables, StepLog, prepare_fighters, simulate};
use playback::{HeadlessRenderer, PlaybackOutcome, PlaybackSpeed, StepPlayer};
use tracing::{debug, info};

use crate::config::ArenaConfig;

/// Everything a duel needs before simulation.
pub struct Duel {
    pub tables: FightTables,
    pub left: BruteRecord,
    pub right: BruteRecord,
    pub seed: u64,
}

impl Duel {
    pub fn load(config: &ArenaConfig) -> Result<Self> {
        let factory = ContentFactory::new(&config.data_dir);

        let tables = match &config.tables {
            Some(path) => TablesLoader::load(path)?,
            None => factory.load_tables_or_default()?,
        };
        let roster = match &config.roster {
            Some(path) => RosterLoader::load(path)?,
            None => factory.load_roster()?,
        };

        let left = pick(&roster, config.left.as_deref(), 0)?;
        let right = pick(&roster, config.right.as_deref(), 1)?;
        if left.id == right.id {
            bail!("{} cannot fight itself", left.name);
        }

        Ok(Self {
            tables,
            left,
            right,
            seed: config.seed(),
        })
    }

    pub fn simulate(&self) -> Result<StepLog> {
        let log = simulate(&self.left, &self.right, self.seed, &self.tables)
            .context("simulation failed")?;
        let (winner, _, forced) = log.outcome();
        info!(
            left = %self.left.name,
            right = %self.right.name,
            seed = self.seed,
            steps = log.len(),
            %winner,
            forced,
            "fight simulated"
        );
        Ok(log)
    }

    /// Replay `json` through a headless renderer at `speed`.
    pub async fn replay(&self, json: &str, speed: f32) -> Result<PlaybackOutcome> {
        let control = PlaybackSpeed::new(speed);
        let player = StepPlayer::builder()
            .renderer(HeadlessRenderer::new())
            .speed(control.reader())
            .build()?;

        let fighters = prepare_fighters(&self.left, &self.right, &self.tables);
        debug!(speed = control.get(), "starting headless replay");
        Ok(player.play_json(json, fighters.into()).await?)
    }
}

/// Roster entry named by `key`, or the `fallback`-th brute.
fn pick(roster: &Roster, key: Option<&str>, fallback: usize) -> Result<BruteRecord> {
    let brute = match key {
        Some(key) => roster
            .find(key)
            .ok_or_else(|| anyhow!("no brute `{key}` in roster"))?,
        None => roster
            .iter()
            .nth(fallback)
            .ok_or_else(|| anyhow!("roster needs at least two brutes"))?,
    };
    Ok(brute.clone())
}

#[cfg(test)]
mod tests {
    use fight_core::BruteId;

    use super::*;

    fn roster() -> Roster {
        Roster::new(vec![
            BruteRecord::new(BruteId(1), "Ares", 5, 60, 6, 5, 4),
            BruteRecord::new(BruteId(2), "Hera", 5, 55, 5, 7, 6),
        ])
        .unwrap()
    }

    #[test]
    fn picks_by_key_or_position() {
        let roster = roster();
        assert_eq!(pick(&roster, Some("hera"), 0).unwrap().id, BruteId(2));
        assert_eq!(pick(&roster, Some("1"), 1).unwrap().id, BruteId(1));
        assert_eq!(pick(&roster, None, 1).unwrap().id, BruteId(2));
        assert!(pick(&roster, Some("zeus"), 0).is_err());
        assert!(pick(&roster, None, 2).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn replay_matches_simulation() {
        let roster = roster();
        let duel = Duel {
            tables: FightTables::default(),
            left: roster.get(BruteId(1)).unwrap().clone(),
            right: roster.get(BruteId(2)).unwrap().clone(),
            seed: 99,
        };

        let log = duel.simulate().unwrap();
        let outcome = duel.replay(&log.to_json().unwrap(), 8.0).await.unwrap();
        match outcome {
            PlaybackOutcome::Completed { winner, steps, .. } => {
                assert_eq!(winner, log.outcome().0);
                assert_eq!(steps, log.len());
            }
            other => panic!("replay did not complete: {other:?}"),
        }
    }
}
