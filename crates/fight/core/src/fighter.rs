//! Resolved fighters and the single step-application path.
//!
//! A [`Fighter`] is created from a [`BruteRecord`] at the start of a fight and
//! only ever changes through [`FighterSet::apply`]. The simulator applies each
//! step as it emits it and the player applies each step after its animations
//! settle, so both sides observe the same hp sequence.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::brute::{BruteId, BruteRecord};
use crate::config::FightTables;
use crate::error::{ErrorSeverity, FightError};
use crate::stats::{EffectiveStats, Rate, Skill, SkillSet, StatsResolver};
use crate::step::{StatusKind, Step};

/// Compact fighter identifier used on the wire.
///
/// `0` is the left side, `1` the right side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FighterId(pub u8);

impl FighterId {
    pub const LEFT: Self = Self(0);
    pub const RIGHT: Self = Self(1);

    /// The other fighter of a duel.
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 & 1))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for FighterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "fighter#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn of(id: FighterId) -> Self {
        if id.0 == 0 { Side::Left } else { Side::Right }
    }
}

bitflags! {
    /// Lingering conditions on a fighter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        const POISONED = 1 << 0;
        const STUNNED  = 1 << 1;
    }
}

impl From<StatusKind> for StatusFlags {
    fn from(kind: StatusKind) -> Self {
        match kind {
            StatusKind::Poison => StatusFlags::POISONED,
            StatusKind::Stun => StatusFlags::STUNNED,
        }
    }
}

bitflags! {
    /// One-shot skills a fighter has already used this fight.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SpentSkills: u8 {
        const TRAGIC_POTION = 1 << 0;
        const VAMPIRISM     = 1 << 1;
        const BOMB          = 1 << 2;
    }
}

impl SpentSkills {
    /// Flag tracking a one-shot skill, `None` for skills usable every turn.
    pub const fn for_skill(skill: Skill) -> Option<Self> {
        match skill {
            Skill::TragicPotion => Some(Self::TRAGIC_POTION),
            Skill::Vampirism => Some(Self::VAMPIRISM),
            Skill::Bomb => Some(Self::BOMB),
            _ => None,
        }
    }
}

/// A brute resolved for one fight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fighter {
    pub id: FighterId,
    pub brute_id: BruteId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub stats: EffectiveStats,
    pub skills: SkillSet,
    pub status: StatusFlags,
    pub spent: SpentSkills,
    pub dead: bool,
}

impl Fighter {
    /// Build a full-health fighter from resolved stats.
    pub fn new(id: FighterId, record: &BruteRecord, stats: EffectiveStats) -> Self {
        Self {
            id,
            brute_id: record.id,
            name: record.name.clone(),
            side: Side::of(id),
            hp: stats.hp,
            max_hp: stats.hp,
            skills: SkillSet::from_identifiers(&record.skills),
            stats,
            status: StatusFlags::empty(),
            spent: SpentSkills::empty(),
            dead: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.hp > 0
    }

    /// Alive and not stunned: may counter, evade or reverse.
    pub fn can_react(&self) -> bool {
        self.is_alive() && !self.status.contains(StatusFlags::STUNNED)
    }

    pub fn is_poisoned(&self) -> bool {
        self.status.contains(StatusFlags::POISONED)
    }

    pub fn is_stunned(&self) -> bool {
        self.status.contains(StatusFlags::STUNNED)
    }

    pub fn missing_hp(&self) -> u32 {
        self.max_hp.saturating_sub(self.hp)
    }

    /// Current hp as a per-mille of max hp.
    pub fn hp_ratio(&self) -> Rate {
        if self.max_hp == 0 {
            return Rate::ZERO;
        }
        Rate::new(((self.hp as u64 * Rate::SCALE as u64) / self.max_hp as u64) as u32)
    }

    /// Whether the fighter owns `skill` and, for one-shot skills, has not used it.
    pub fn can_use(&self, skill: Skill) -> bool {
        if !self.skills.has(skill) {
            return false;
        }
        SpentSkills::for_skill(skill).is_none_or(|flag| !self.spent.contains(flag))
    }

    fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
        self.status.remove(StatusFlags::STUNNED);
    }

    fn restore(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }
}

/// Errors raised while applying a step to a fighter set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("step references {0}, which is not part of the fight")]
    FighterNotFound(FighterId),
}

impl FightError for ApplyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FighterNotFound(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FighterNotFound(_) => "APPLY_FIGHTER_NOT_FOUND",
        }
    }
}

/// The fighters of one fight, indexed by [`FighterId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FighterSet {
    fighters: Vec<Fighter>,
}

impl FighterSet {
    pub fn new(fighters: impl IntoIterator<Item = Fighter>) -> Self {
        Self {
            fighters: fighters.into_iter().collect(),
        }
    }

    pub fn get(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.iter().find(|f| f.id == id)
    }

    /// Like [`Self::get`] but failing with [`ApplyError::FighterNotFound`].
    pub fn fighter(&self, id: FighterId) -> Result<&Fighter, ApplyError> {
        self.get(id).ok_or(ApplyError::FighterNotFound(id))
    }

    fn fighter_mut(&mut self, id: FighterId) -> Result<&mut Fighter, ApplyError> {
        self.fighters
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(ApplyError::FighterNotFound(id))
    }

    pub fn contains(&self, id: FighterId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fighter> {
        self.fighters.iter()
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    pub fn into_inner(self) -> Vec<Fighter> {
        self.fighters
    }

    /// Apply one step's numeric and status effects.
    ///
    /// Every fighter the step references is resolved before anything is
    /// mutated, so a failing step leaves the set untouched. Hp is clamped to
    /// `0..=max_hp` and `death` is idempotent.
    pub fn apply(&mut self, step: &Step) -> Result<(), ApplyError> {
        for id in step.fighters() {
            self.fighter(id)?;
        }

        match *step {
            Step::Move { .. }
            | Step::MoveBack { .. }
            | Step::Evade { .. }
            | Step::Counter { .. }
            | Step::Reversal { .. }
            | Step::End { .. } => {}

            Step::Hit { target, damage, .. } => {
                self.fighter_mut(target)?.take_damage(damage);
            }
            Step::Bomb {
                brute,
                target,
                damage,
            } => {
                self.fighter_mut(brute)?.spent.insert(SpentSkills::BOMB);
                self.fighter_mut(target)?.take_damage(damage);
            }
            Step::StatusApplied { target, status, .. } => {
                self.fighter_mut(target)?.status.insert(status.into());
            }
            Step::Poison { brute, damage } => {
                self.fighter_mut(brute)?.take_damage(damage);
            }
            Step::Stunned { brute } => {
                self.fighter_mut(brute)?.status.remove(StatusFlags::STUNNED);
            }
            Step::Heal {
                brute,
                amount,
                poison_heal,
            } => {
                let fighter = self.fighter_mut(brute)?;
                fighter.restore(amount);
                fighter.spent.insert(SpentSkills::TRAGIC_POTION);
                if poison_heal {
                    fighter.status.remove(StatusFlags::POISONED);
                }
            }
            Step::Vampirism {
                brute,
                target,
                heal,
                damage,
            } => {
                self.fighter_mut(target)?.take_damage(damage);
                let actor = self.fighter_mut(brute)?;
                actor.restore(heal);
                actor.spent.insert(SpentSkills::VAMPIRISM);
            }
            Step::Death { brute } => {
                let fighter = self.fighter_mut(brute)?;
                fighter.dead = true;
                fighter.hp = 0;
            }
        }

        Ok(())
    }
}

impl From<[Fighter; 2]> for FighterSet {
    fn from(pair: [Fighter; 2]) -> Self {
        Self::new(pair)
    }
}

impl<'a> IntoIterator for &'a FighterSet {
    type Item = &'a Fighter;
    type IntoIter = core::slice::Iter<'a, Fighter>;

    fn into_iter(self) -> Self::IntoIter {
        self.fighters.iter()
    }
}

/// Resolve both brutes of a duel into fighters `0` (left) and `1` (right).
pub fn prepare_fighters(
    left: &BruteRecord,
    right: &BruteRecord,
    tables: &FightTables,
) -> [Fighter; 2] {
    let (left_stats, right_stats) = StatsResolver::new(tables).resolve_pair(left, right);
    [
        Fighter::new(FighterId::LEFT, left, left_stats),
        Fighter::new(FighterId::RIGHT, right, right_stats),
    ]
}
