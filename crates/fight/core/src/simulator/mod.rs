//! The fight simulator.
//!
//! Turns two brute records, a seed and the balance tables into a [`StepLog`].
//! Every emitted step is immediately applied to the simulator's own
//! [`FighterSet`] through [`FighterSet::apply`], the same function playback
//! uses, so the log and the simulated hp can never disagree.
//!
//! ```text
//! loop:
//!   turn limit reached?  → end (forced)
//!   timeline.pop()       → actor
//!   play_turn(actor)     → steps
//!   someone dead?        → end
//! ```

mod actions;
pub mod turns;

use thiserror::Error;

use crate::brute::BruteRecord;
use crate::config::FightTables;
use crate::error::{ErrorSeverity, FightError};
use crate::fighter::{ApplyError, FighterId, FighterSet, prepare_fighters};
use crate::rng::{FightRng, PcgRng, RngOracle};
use crate::step::{Step, StepLog, StepLogError};

pub use turns::{Tick, Timeline, turn_cost};

/// Errors that abort a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("simulation exceeded its bound of {limit} steps")]
    StepBoundExceeded { limit: usize },

    #[error("simulator emitted an inapplicable step: {0}")]
    Apply(#[from] ApplyError),

    #[error("simulator produced a malformed log: {0}")]
    Log(#[from] StepLogError),
}

impl FightError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StepBoundExceeded { .. } => ErrorSeverity::Fatal,
            Self::Apply(_) | Self::Log(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StepBoundExceeded { .. } => "SIMULATION_STEP_BOUND_EXCEEDED",
            Self::Apply(_) => "SIMULATION_APPLY",
            Self::Log(_) => "SIMULATION_LOG",
        }
    }
}

/// Step-by-step fight simulation.
///
/// Use [`simulate`] for the one-shot form.
#[derive(Debug)]
pub struct Simulator<'a, R = PcgRng> {
    tables: &'a FightTables,
    fighters: FighterSet,
    rng: FightRng<R>,
    timeline: Timeline,
    steps: Vec<Step>,
    turns: u32,
    finished: bool,
}

impl<'a> Simulator<'a, PcgRng> {
    pub fn new(
        left: &BruteRecord,
        right: &BruteRecord,
        seed: u64,
        tables: &'a FightTables,
    ) -> Self {
        Self::with_oracle(left, right, PcgRng, seed, tables)
    }
}

impl<'a, R: RngOracle> Simulator<'a, R> {
    pub fn with_oracle(
        left: &BruteRecord,
        right: &BruteRecord,
        oracle: R,
        seed: u64,
        tables: &'a FightTables,
    ) -> Self {
        let fighters: FighterSet = prepare_fighters(left, right, tables).into();
        let mut rng = FightRng::with_oracle(oracle, seed);
        let timeline = Timeline::new(&fighters, &mut rng, tables);

        Self {
            tables,
            fighters,
            rng,
            timeline,
            steps: Vec::new(),
            turns: 0,
            finished: false,
        }
    }

    /// Current fighter state (after every step emitted so far).
    pub fn fighters(&self) -> &FighterSet {
        &self.fighters
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Turns played so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Play one turn. Returns `true` once the `end` step has been emitted.
    pub fn next_turn(&mut self) -> Result<bool, SimulationError> {
        if self.finished {
            return Ok(true);
        }

        if self.turns >= self.tables.max_turns {
            self.finish_forced()?;
            return Ok(true);
        }

        let Some(actor) = self.timeline.pop(&self.fighters) else {
            // Nobody alive to act: settle on hp like a forced end.
            self.finish_forced()?;
            return Ok(true);
        };
        self.turns += 1;
        self.play_turn(actor)?;

        let fallen = self.fighters.iter().find(|f| !f.is_alive()).map(|f| f.id);
        if let Some(loser) = fallen {
            self.emit(Step::End {
                winner: loser.opponent(),
                loser,
                forced: false,
            })?;
            self.finished = true;
        }

        Ok(self.finished)
    }

    /// Play until the fight ends and return the validated log.
    pub fn run(mut self) -> Result<StepLog, SimulationError> {
        while !self.next_turn()? {}
        Ok(StepLog::new(self.steps)?)
    }

    /// Record a step and apply it to the fighters.
    fn emit(&mut self, step: Step) -> Result<(), SimulationError> {
        if self.steps.len() >= self.tables.max_steps {
            return Err(SimulationError::StepBoundExceeded {
                limit: self.tables.max_steps,
            });
        }
        self.fighters.apply(&step)?;
        self.steps.push(step);
        Ok(())
    }

    /// End the fight on remaining hp ratio; ties go to the lower id.
    fn finish_forced(&mut self) -> Result<(), SimulationError> {
        let left = self.fighters.fighter(FighterId::LEFT)?.hp_ratio();
        let right = self.fighters.fighter(FighterId::RIGHT)?.hp_ratio();
        let winner = if right > left {
            FighterId::RIGHT
        } else {
            FighterId::LEFT
        };

        self.emit(Step::End {
            winner,
            loser: winner.opponent(),
            forced: true,
        })?;
        self.finished = true;
        Ok(())
    }
}

/// Simulate a whole fight.
///
/// A pure function of its inputs: the same records, seed and tables always
/// yield the same log, byte for byte.
pub fn simulate(
    left: &BruteRecord,
    right: &BruteRecord,
    seed: u64,
    tables: &FightTables,
) -> Result<StepLog, SimulationError> {
    Simulator::new(left, right, seed, tables).run()
}
