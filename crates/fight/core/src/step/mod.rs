//! The step catalog: the sole contract between simulation and playback.
//!
//! A step is one discrete, immutable event of a fight. Steps are serialized as
//! JSON objects with a camelCase `kind` discriminator and compact field names
//! (`b` actor, `t` target, `d` damage, ...). The catalog only grows; existing
//! kinds and field names never change meaning.

mod log;

pub use log::{StepLog, StepLogError};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::fighter::FighterId;

/// Lingering status a step can inflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    Poison,
    Stun,
}

/// One event of a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Step {
    /// `brute` runs into melee range of `target`.
    Move {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        target: FighterId,
    },
    /// `brute` walks back to its own side.
    MoveBack {
        #[serde(rename = "b")]
        brute: FighterId,
    },
    /// `brute` strikes `target`; `damage` is already clamped to the target's hp.
    Hit {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        target: FighterId,
        #[serde(rename = "d")]
        damage: u32,
    },
    /// `brute` dodges an attack from `attacker`.
    Evade {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        attacker: FighterId,
    },
    /// `brute` intercepts `target`'s attack. The attack is cancelled.
    Counter {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        target: FighterId,
    },
    /// `brute` retaliates after being hit by `target`.
    Reversal {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        target: FighterId,
    },
    /// `brute` throws its bomb at `target`.
    Bomb {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        target: FighterId,
        #[serde(rename = "d")]
        damage: u32,
    },
    /// `brute` inflicts `status` on `target`.
    StatusApplied {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        target: FighterId,
        #[serde(rename = "s")]
        status: StatusKind,
    },
    /// `brute` suffers poison damage at the start of its turn.
    Poison {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "d")]
        damage: u32,
    },
    /// `brute` loses its turn to a stun.
    Stunned {
        #[serde(rename = "b")]
        brute: FighterId,
    },
    /// `brute` drinks its tragic potion.
    Heal {
        brute: FighterId,
        amount: u32,
        #[serde(rename = "poisonHeal", default)]
        poison_heal: bool,
    },
    /// `brute` drains `damage` from `target` and recovers `heal`.
    Vampirism {
        #[serde(rename = "b")]
        brute: FighterId,
        #[serde(rename = "t")]
        target: FighterId,
        #[serde(rename = "h")]
        heal: u32,
        #[serde(rename = "d")]
        damage: u32,
    },
    Death {
        #[serde(rename = "b")]
        brute: FighterId,
    },
    /// Terminal marker.
    End {
        #[serde(rename = "w")]
        winner: FighterId,
        #[serde(rename = "l")]
        loser: FighterId,
        #[serde(default)]
        forced: bool,
    },
}

/// Discriminant of a [`Step`], spelled exactly like the wire `kind`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    IntoStaticStr,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Move,
    MoveBack,
    Hit,
    Evade,
    Counter,
    Reversal,
    Bomb,
    StatusApplied,
    Poison,
    Stunned,
    Heal,
    Vampirism,
    Death,
    End,
}

impl StepKind {
    /// Wire name of the kind (e.g. `"moveBack"`).
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parse a wire name, `None` for kinds this build does not know.
    pub fn parse(kind: &str) -> Option<Self> {
        kind.parse().ok()
    }
}

impl core::fmt::Display for StepKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Move { .. } => StepKind::Move,
            Step::MoveBack { .. } => StepKind::MoveBack,
            Step::Hit { .. } => StepKind::Hit,
            Step::Evade { .. } => StepKind::Evade,
            Step::Counter { .. } => StepKind::Counter,
            Step::Reversal { .. } => StepKind::Reversal,
            Step::Bomb { .. } => StepKind::Bomb,
            Step::StatusApplied { .. } => StepKind::StatusApplied,
            Step::Poison { .. } => StepKind::Poison,
            Step::Stunned { .. } => StepKind::Stunned,
            Step::Heal { .. } => StepKind::Heal,
            Step::Vampirism { .. } => StepKind::Vampirism,
            Step::Death { .. } => StepKind::Death,
            Step::End { .. } => StepKind::End,
        }
    }

    /// Acting fighter. For `end` this is the winner.
    pub fn actor(&self) -> FighterId {
        match *self {
            Step::Move { brute, .. }
            | Step::MoveBack { brute }
            | Step::Hit { brute, .. }
            | Step::Evade { brute, .. }
            | Step::Counter { brute, .. }
            | Step::Reversal { brute, .. }
            | Step::Bomb { brute, .. }
            | Step::StatusApplied { brute, .. }
            | Step::Poison { brute, .. }
            | Step::Stunned { brute }
            | Step::Heal { brute, .. }
            | Step::Vampirism { brute, .. }
            | Step::Death { brute } => brute,
            Step::End { winner, .. } => winner,
        }
    }

    /// Second fighter involved, if the kind has one.
    pub fn target(&self) -> Option<FighterId> {
        match *self {
            Step::Move { target, .. }
            | Step::Hit { target, .. }
            | Step::Counter { target, .. }
            | Step::Reversal { target, .. }
            | Step::Bomb { target, .. }
            | Step::StatusApplied { target, .. }
            | Step::Vampirism { target, .. } => Some(target),
            Step::Evade { attacker, .. } => Some(attacker),
            Step::End { loser, .. } => Some(loser),
            Step::MoveBack { .. }
            | Step::Poison { .. }
            | Step::Stunned { .. }
            | Step::Heal { .. }
            | Step::Death { .. } => None,
        }
    }

    /// Every fighter the step references.
    pub fn fighters(&self) -> impl Iterator<Item = FighterId> {
        core::iter::once(self.actor()).chain(self.target())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::End { .. })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    const A: FighterId = FighterId(0);
    const B: FighterId = FighterId(1);

    fn one_of_each() -> Vec<Step> {
        vec![
            Step::Move { brute: A, target: B },
            Step::MoveBack { brute: A },
            Step::Hit { brute: A, target: B, damage: 3 },
            Step::Evade { brute: B, attacker: A },
            Step::Counter { brute: B, target: A },
            Step::Reversal { brute: B, target: A },
            Step::Bomb { brute: A, target: B, damage: 9 },
            Step::StatusApplied { brute: A, target: B, status: StatusKind::Stun },
            Step::Poison { brute: B, damage: 2 },
            Step::Stunned { brute: B },
            Step::Heal { brute: A, amount: 15, poison_heal: false },
            Step::Vampirism { brute: A, target: B, heal: 4, damage: 4 },
            Step::Death { brute: B },
            Step::End { winner: A, loser: B, forced: false },
        ]
    }

    #[test]
    fn wire_kind_matches_step_kind() {
        let steps = one_of_each();
        assert_eq!(steps.len(), StepKind::COUNT);

        for (step, kind) in steps.iter().zip(StepKind::iter()) {
            assert_eq!(step.kind(), kind);
            let value = serde_json::to_value(step).unwrap();
            assert_eq!(value["kind"], kind.as_str(), "{step:?}");
        }
    }

    #[test]
    fn compact_field_names() {
        let hit = serde_json::to_value(Step::Hit { brute: A, target: B, damage: 7 }).unwrap();
        assert_eq!(hit, json!({ "kind": "hit", "b": 0, "t": 1, "d": 7 }));

        let heal = serde_json::to_value(Step::Heal { brute: B, amount: 15, poison_heal: true })
            .unwrap();
        assert_eq!(
            heal,
            json!({ "kind": "heal", "brute": 1, "amount": 15, "poisonHeal": true })
        );

        let status = serde_json::to_value(Step::StatusApplied {
            brute: A,
            target: B,
            status: StatusKind::Poison,
        })
        .unwrap();
        assert_eq!(status["s"], "poison");
    }

    #[test]
    fn decodes_historical_shapes() {
        let heal: Step =
            serde_json::from_value(json!({ "kind": "heal", "brute": 0, "amount": 5 })).unwrap();
        assert_eq!(heal, Step::Heal { brute: A, amount: 5, poison_heal: false });

        let end: Step = serde_json::from_value(json!({ "kind": "end", "w": 1, "l": 0 })).unwrap();
        assert_eq!(end, Step::End { winner: B, loser: A, forced: false });
    }

    #[test]
    fn actor_and_target() {
        let evade = Step::Evade { brute: B, attacker: A };
        assert_eq!(evade.actor(), B);
        assert_eq!(evade.target(), Some(A));
        assert_eq!(evade.fighters().collect::<Vec<_>>(), vec![B, A]);

        let stunned = Step::Stunned { brute: A };
        assert_eq!(stunned.fighters().collect::<Vec<_>>(), vec![A]);
    }

    #[test]
    fn kind_names_parse() {
        assert_eq!(StepKind::parse("statusApplied"), Some(StepKind::StatusApplied));
        assert_eq!(StepKind::parse("teleport"), None);
        assert_eq!(StepKind::MoveBack.to_string(), "moveBack");
    }
}
