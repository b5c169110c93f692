//! Effective stats - the resolved, skill-adjusted view of a brute.
//!
//! Effective stats are NEVER stored. They are recomputed from the persisted
//! attributes whenever a fight starts.

use serde::{Deserialize, Serialize};

/// Probability or proportion in per-mille (`0..=1000`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    /// Denominator of every rate.
    pub const SCALE: u32 = 1000;
    pub const ZERO: Self = Self(0);
    pub const CERTAIN: Self = Self(Self::SCALE);

    /// Create a rate, saturating at [`Rate::CERTAIN`].
    pub const fn new(per_mille: u32) -> Self {
        if per_mille > Self::SCALE {
            Self::CERTAIN
        } else {
            Self(per_mille)
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Scale an amount by this rate, rounding down.
    pub const fn of(self, amount: u32) -> u32 {
        ((amount as u64 * self.0 as u64) / Self::SCALE as u64) as u32
    }

    /// Complement (`1000 - rate`).
    pub const fn complement(self) -> Self {
        Self(Self::SCALE - self.0)
    }
}

/// Resolved combat statistics for one fighter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveStats {
    // Main stats
    pub hp: u32,
    pub strength: u32,
    pub agility: u32,
    pub speed: u32,

    // Hidden stats
    /// Opening position on the timeline. Lower acts earlier.
    pub initiative: i32,
    /// Base timeline cost of one turn before speed.
    pub interval: u32,
    pub counter_rate: Rate,
    pub combo_rate: Rate,
    pub reversal_rate: Rate,
    /// Chance to dodge an incoming attack. Depends on the opponent.
    pub evasion: Rate,
    /// Proportion of incoming damage absorbed.
    pub armor: Rate,
}
