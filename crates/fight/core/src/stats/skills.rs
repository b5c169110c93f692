//! Skill identifiers and skill sets.
//!
//! Brutes persist their unlocked skills as camelCase identifiers. Parsing is
//! lenient: identifiers the fight rules do not know about are simply absent
//! from the resulting [`SkillSet`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Skills that influence fight resolution.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    IntoStaticStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    // ========================================================================
    // Passive stat skills
    // ========================================================================
    /// Raises counter rate.
    SixthSense,
    /// Raises combo rate.
    FistsOfFury,
    /// Raises reversal rate.
    Hostility,
    /// Raises evasion.
    Untouchable,
    /// Shifts opening initiative.
    FirstStrike,
    /// Shifts opening initiative.
    Reconnaissance,
    /// Reduces incoming damage.
    Armor,

    // ========================================================================
    // One-shot active skills
    // ========================================================================
    /// Heals once when low, curing poison.
    TragicPotion,
    /// Drains the opponent once when low.
    Vampirism,
    /// Thrown once for flat damage.
    Bomb,

    // ========================================================================
    // On-hit skills
    // ========================================================================
    /// Hits may stun.
    Hammer,
    /// Hits may poison.
    Venom,
}

impl Skill {
    /// Wire identifier of this skill (e.g. `"sixthSense"`).
    pub fn identifier(self) -> &'static str {
        self.into()
    }

    /// Parse a persisted identifier, `None` for unknown skills.
    pub fn parse(identifier: &str) -> Option<Self> {
        identifier.parse().ok()
    }
}

bitflags! {
    /// Skills a fighter has unlocked.
    ///
    /// Membership tests and iteration are independent of the order the
    /// identifiers were persisted in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SkillSet: u16 {
        const SIXTH_SENSE    = 1 << 0;
        const FISTS_OF_FURY  = 1 << 1;
        const HOSTILITY      = 1 << 2;
        const UNTOUCHABLE    = 1 << 3;
        const FIRST_STRIKE   = 1 << 4;
        const RECONNAISSANCE = 1 << 5;
        const ARMOR          = 1 << 6;
        const TRAGIC_POTION  = 1 << 7;
        const VAMPIRISM      = 1 << 8;
        const BOMB           = 1 << 9;
        const HAMMER         = 1 << 10;
        const VENOM          = 1 << 11;
    }
}

impl From<Skill> for SkillSet {
    fn from(skill: Skill) -> Self {
        match skill {
            Skill::SixthSense => Self::SIXTH_SENSE,
            Skill::FistsOfFury => Self::FISTS_OF_FURY,
            Skill::Hostility => Self::HOSTILITY,
            Skill::Untouchable => Self::UNTOUCHABLE,
            Skill::FirstStrike => Self::FIRST_STRIKE,
            Skill::Reconnaissance => Self::RECONNAISSANCE,
            Skill::Armor => Self::ARMOR,
            Skill::TragicPotion => Self::TRAGIC_POTION,
            Skill::Vampirism => Self::VAMPIRISM,
            Skill::Bomb => Self::BOMB,
            Skill::Hammer => Self::HAMMER,
            Skill::Venom => Self::VENOM,
        }
    }
}

impl SkillSet {
    /// Build a set from persisted identifiers, ignoring unknown ones.
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identifiers
            .into_iter()
            .filter_map(|id| Skill::parse(id.as_ref()))
            .collect()
    }

    pub fn has(self, skill: Skill) -> bool {
        self.contains(skill.into())
    }

    /// Skills in declaration order.
    pub fn skills(self) -> impl Iterator<Item = Skill> {
        Skill::iter().filter(move |skill| self.has(*skill))
    }
}

impl FromIterator<Skill> for SkillSet {
    fn from_iter<T: IntoIterator<Item = Skill>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |set, skill| set | Self::from(skill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_identifiers() {
        assert_eq!(Skill::parse("sixthSense"), Some(Skill::SixthSense));
        assert_eq!(Skill::parse("tragicPotion"), Some(Skill::TragicPotion));
        assert_eq!(Skill::FistsOfFury.identifier(), "fistsOfFury");
    }

    #[test]
    fn every_skill_has_its_own_flag() {
        let all: SkillSet = Skill::iter().collect();
        assert_eq!(all, SkillSet::all());
        assert_eq!(all.skills().count(), Skill::iter().count());
    }

    #[test]
    fn unknown_identifiers_are_inert() {
        let set = SkillSet::from_identifiers(["hostility", "notASkill", ""]);
        assert_eq!(set, SkillSet::HOSTILITY);
        assert!(set.has(Skill::Hostility));
    }

    #[test]
    fn order_of_identifiers_is_irrelevant() {
        let a = SkillSet::from_identifiers(["bomb", "armor", "venom"]);
        let b = SkillSet::from_identifiers(["venom", "bomb", "armor", "armor"]);
        assert_eq!(a, b);
        assert_eq!(
            a.skills().collect::<Vec<_>>(),
            vec![Skill::Armor, Skill::Bomb, Skill::Venom]
        );
    }
}
