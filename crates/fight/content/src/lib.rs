//! Data-driven fight content and loaders.
//!
//! This crate reads the files that parameterise a fight:
//! - Balance tables (`FightTables`, TOML)
//! - Brute rosters (`BruteRecord` lists, RON)
//!
//! Content is an input of the simulation and never appears in a step log.

pub mod loaders;

pub use loaders::{ContentFactory, LoadResult, Roster, RosterLoader, TablesLoader};
