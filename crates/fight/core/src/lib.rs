//! Deterministic fight logic and data types shared by servers and players.
//!
//! `fight-core` defines the canonical rules (stat resolution, the turn loop,
//! the step catalog) and exposes pure APIs. A fight is computed once by
//! [`simulator::simulate`] into a [`StepLog`]; every later consumer replays
//! that log by applying its steps in order through [`FighterSet::apply`].
pub mod brute;
pub mod combat;
pub mod config;
pub mod error;
pub mod fighter;
pub mod rng;
pub mod simulator;
pub mod stats;
pub mod step;

pub use brute::{BruteId, BruteRecord};
pub use config::FightTables;
pub use error::{ErrorSeverity, FightError};
pub use fighter::{
    ApplyError, Fighter, FighterId, FighterSet, Side, SpentSkills, StatusFlags, prepare_fighters,
};
pub use rng::{FightRng, PcgRng, RngOracle, compute_seed, seed_from_fight_id};
pub use simulator::{SimulationError, Simulator, simulate};
pub use stats::{BonusStack, EffectiveStats, Rate, Skill, SkillSet, StatsResolver};
pub use step::{StatusKind, Step, StepKind, StepLog, StepLogError};
