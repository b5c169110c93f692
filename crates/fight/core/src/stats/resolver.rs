//! Stat resolution: persisted attributes + skills → [`EffectiveStats`].
//!
//! # Calculation order
//!
//! ```text
//! [ BruteRecord ] → [ SkillSet ] → [ BonusStack per stat ] → [ clamp / cap ]
//!                                                      ↓
//!                               [ opponent-dependent stats (evasion) ]
//! ```
//!
//! Skills are inspected in a fixed order in code, and each stat accumulates
//! its bonuses in a [`BonusStack`], so the output never depends on how the
//! skill identifiers were ordered in storage.

use crate::brute::BruteRecord;
use crate::config::FightTables;

use super::bonus::{BonusStack, StatBounds};
use super::effective::{EffectiveStats, Rate};
use super::skills::{Skill, SkillSet};

/// Pure stat resolver over a set of balance tables.
#[derive(Clone, Copy, Debug)]
pub struct StatsResolver<'a> {
    tables: &'a FightTables,
}

impl<'a> StatsResolver<'a> {
    pub fn new(tables: &'a FightTables) -> Self {
        Self { tables }
    }

    /// Resolve stats that do not depend on an opponent.
    ///
    /// Evasion only contains skill bonuses here; use [`Self::resolve_pair`] for
    /// the agility comparison.
    pub fn resolve(&self, brute: &BruteRecord) -> EffectiveStats {
        let skills = SkillSet::from_identifiers(&brute.skills);
        let mut stats = self.independent(brute, skills);
        stats.evasion = self.evasion(skills, 0);
        stats
    }

    /// Resolve both fighters of a pairing, including opponent-dependent stats.
    pub fn resolve_pair(
        &self,
        a: &BruteRecord,
        b: &BruteRecord,
    ) -> (EffectiveStats, EffectiveStats) {
        let skills_a = SkillSet::from_identifiers(&a.skills);
        let skills_b = SkillSet::from_identifiers(&b.skills);

        let mut stats_a = self.independent(a, skills_a);
        let mut stats_b = self.independent(b, skills_b);

        stats_a.evasion = self.evasion(skills_a, stats_a.agility.saturating_sub(stats_b.agility));
        stats_b.evasion = self.evasion(skills_b, stats_b.agility.saturating_sub(stats_a.agility));

        (stats_a, stats_b)
    }

    fn independent(&self, brute: &BruteRecord, skills: SkillSet) -> EffectiveStats {
        let t = self.tables;

        /* INITIATIVE */
        let mut initiative = BonusStack::new();
        if skills.has(Skill::FirstStrike) {
            initiative.add(t.first_strike_initiative);
        }
        if skills.has(Skill::Reconnaissance) {
            initiative.add(t.reconnaissance_initiative);
        }

        /* COUNTER RATE */
        let mut counter = BonusStack::new();
        if skills.has(Skill::SixthSense) {
            counter.add(t.sixth_sense_counter as i32);
        }

        /* COMBO RATE */
        // Provisional formula: half a combo per agility point relative to level.
        let level = brute.level.max(1) as u64;
        let agility_combo = (brute.agility as u64 * t.combo_agility_factor as u64) / level;
        let mut combo = BonusStack::new();
        combo.add(agility_combo.min(Rate::SCALE as u64) as i32);
        if skills.has(Skill::FistsOfFury) {
            combo.add(t.fists_of_fury_combo as i32);
        }

        /* REVERSAL RATE */
        let mut reversal = BonusStack::new();
        if skills.has(Skill::Hostility) {
            reversal.add(t.hostility_reversal as i32);
        }

        /* ARMOR */
        let mut armor = BonusStack::new();
        if skills.has(Skill::Armor) {
            armor.add(t.armor_reduction as i32);
        }

        EffectiveStats {
            hp: brute.hp.max(1),
            strength: attribute(brute.strength),
            agility: attribute(brute.agility),
            speed: attribute(brute.speed),
            initiative: initiative.apply(t.base_initiative, StatBounds::UNCLAMPED),
            interval: StatBounds::INTERVAL.clamp(t.base_interval as i64) as u32,
            counter_rate: rate(&counter, t.counter_cap),
            combo_rate: rate(&combo, t.combo_cap),
            reversal_rate: rate(&reversal, t.reversal_cap),
            evasion: Rate::ZERO,
            armor: rate(&armor, Rate::SCALE),
        }
    }

    fn evasion(&self, skills: SkillSet, agility_advantage: u32) -> Rate {
        let t = self.tables;

        let mut evasion = BonusStack::new();
        let from_agility = agility_advantage.saturating_mul(t.evasion_per_agility);
        evasion.add(from_agility.min(Rate::SCALE) as i32);
        if skills.has(Skill::Untouchable) {
            evasion.add(t.untouchable_evasion as i32);
        }

        rate(&evasion, t.evasion_cap)
    }
}

fn attribute(value: u32) -> u32 {
    StatBounds::ATTRIBUTE.clamp(value as i64) as u32
}

fn rate(stack: &BonusStack, cap: u32) -> Rate {
    let bounds = StatBounds::RATE.capped(cap.min(Rate::SCALE) as i32);
    Rate::new(stack.apply(0, bounds) as u32)
}
