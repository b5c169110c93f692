//! Defender reactions to an incoming attack.

use crate::fighter::Fighter;
use crate::rng::{FightRng, RngOracle};

/// How a defender answers one attack of a combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// Strikes first; the attack is cancelled and the combo ends.
    Counter,
    /// Dodges the attack.
    Evade,
    /// Takes the hit.
    None,
}

/// Roll the defender's reaction.
///
/// Counter is checked before evasion. A defender that cannot react (dead or
/// stunned) always takes the hit and consumes no draw.
pub fn defender_reaction<R: RngOracle>(defender: &Fighter, rng: &mut FightRng<R>) -> Reaction {
    if !defender.can_react() {
        return Reaction::None;
    }
    let actor = defender.id.0 as u32;

    if rng.chance(actor, defender.stats.counter_rate) {
        Reaction::Counter
    } else if rng.chance(actor, defender.stats.evasion) {
        Reaction::Evade
    } else {
        Reaction::None
    }
}

/// Whether a defender that was just hit retaliates.
pub fn reversal_triggers<R: RngOracle>(defender: &Fighter, rng: &mut FightRng<R>) -> bool {
    defender.can_react() && rng.chance(defender.id.0 as u32, defender.stats.reversal_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute::{BruteId, BruteRecord};
    use crate::config::FightTables;
    use crate::fighter::prepare_fighters;
    use crate::fighter::StatusFlags;
    use crate::stats::Rate;

    fn defender() -> Fighter {
        let tables = FightTables::default();
        let a = BruteRecord::new(BruteId(1), "A", 5, 50, 5, 5, 5);
        let b = BruteRecord::new(BruteId(2), "B", 5, 50, 5, 5, 5);
        let [_, right] = prepare_fighters(&a, &b, &tables);
        right
    }

    #[test]
    fn no_rates_means_no_reaction_and_no_draw() {
        let mut rng = FightRng::new(3);
        assert_eq!(defender_reaction(&defender(), &mut rng), Reaction::None);
        assert!(!reversal_triggers(&defender(), &mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn certain_counter_wins_over_evasion() {
        let mut fighter = defender();
        fighter.stats.counter_rate = Rate::CERTAIN;
        fighter.stats.evasion = Rate::CERTAIN;

        let mut rng = FightRng::new(3);
        assert_eq!(defender_reaction(&fighter, &mut rng), Reaction::Counter);
    }

    #[test]
    fn stunned_defender_cannot_react() {
        let mut fighter = defender();
        fighter.stats.evasion = Rate::CERTAIN;
        fighter.stats.reversal_rate = Rate::CERTAIN;
        fighter.status.insert(StatusFlags::STUNNED);

        let mut rng = FightRng::new(3);
        assert_eq!(defender_reaction(&fighter, &mut rng), Reaction::None);
        assert!(!reversal_triggers(&fighter, &mut rng));
    }
}
