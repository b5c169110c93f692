//! Brute roster loader.
//!
//! A roster is a RON list of brute records, the same shape the persistence
//! collaborator hands to the simulator.

use std::collections::HashSet;
use std::path::Path;

use fight_core::{BruteId, BruteRecord};

use crate::loaders::{LoadResult, read_file};

/// Brutes available to a fight driver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    brutes: Vec<BruteRecord>,
}

impl Roster {
    /// Build a roster, rejecting duplicate ids.
    pub fn new(brutes: Vec<BruteRecord>) -> LoadResult<Self> {
        let mut seen = HashSet::new();
        for brute in &brutes {
            if !seen.insert(brute.id) {
                anyhow::bail!("duplicate brute id {} ({})", brute.id.0, brute.name);
            }
        }
        Ok(Self { brutes })
    }

    pub fn get(&self, id: BruteId) -> Option<&BruteRecord> {
        self.brutes.iter().find(|b| b.id == id)
    }

    /// Case-insensitive lookup by name.
    pub fn by_name(&self, name: &str) -> Option<&BruteRecord> {
        self.brutes.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// Look a brute up by numeric id or by name.
    pub fn find(&self, key: &str) -> Option<&BruteRecord> {
        match key.parse::<u64>() {
            Ok(id) => self.get(BruteId(id)),
            Err(_) => self.by_name(key),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BruteRecord> {
        self.brutes.iter()
    }

    pub fn len(&self) -> usize {
        self.brutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brutes.is_empty()
    }
}

/// Loader for brute rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<BruteRecord>`
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let brutes: Vec<BruteRecord> = ron::from_str(content)?;
        Roster::new(brutes)
    }
}
