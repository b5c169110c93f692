//! Persisted brute records - the simulation input.

use serde::{Deserialize, Serialize};

/// Persistent identifier of a brute in the external store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BruteId(pub u64);

impl core::fmt::Display for BruteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "brute#{}", self.0)
    }
}

/// A brute as handed over by the persistence collaborator.
///
/// `hp` is the brute's maximum hp; fights always start at full health.
/// `skills` holds raw skill identifiers; unknown ones are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BruteRecord {
    pub id: BruteId,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub strength: u32,
    pub agility: u32,
    pub speed: u32,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl BruteRecord {
    /// Create a record with no skills.
    pub fn new(
        id: BruteId,
        name: impl Into<String>,
        level: u32,
        hp: u32,
        strength: u32,
        agility: u32,
        speed: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            hp,
            strength,
            agility,
            speed,
            skills: Vec::new(),
        }
    }

    /// Attach skill identifiers (builder pattern).
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }
}
