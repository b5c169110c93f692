//! Damage and healing amounts.

use crate::config::FightTables;
use crate::fighter::Fighter;
use crate::stats::{EffectiveStats, Rate};

fn percent_of(amount: u32, percent: u32) -> u32 {
    ((amount as u64 * percent as u64) / 100).min(u32::MAX as u64) as u32
}

/// Calculate melee damage before the hp clamp.
///
/// # Formula
///
/// ```text
/// nominal = base_damage + strength × strength_damage_percent / 100
/// varied  = nominal × variance / 100
/// final   = max(1, varied - armor(varied))
/// ```
///
/// `variance` is the percent roll drawn from
/// `damage_variance_min..=damage_variance_max`.
pub fn calculate_damage(
    attacker: &EffectiveStats,
    defender: &EffectiveStats,
    variance: u32,
    tables: &FightTables,
) -> u32 {
    let nominal = tables
        .base_damage
        .saturating_add(percent_of(attacker.strength, tables.strength_damage_percent));
    let varied = percent_of(nominal, variance);

    mitigate(varied, defender.armor)
}

/// Remove the armor share of `raw`, never going below one point.
pub fn mitigate(raw: u32, armor: Rate) -> u32 {
    armor.complement().of(raw).max(1)
}

/// Never deal more damage than the target has hp left.
pub fn clamp_to_hp(damage: u32, hp: u32) -> u32 {
    damage.min(hp)
}

/// Bomb damage for a rolled base amount.
pub fn bomb_damage(roll: u32, defender: &EffectiveStats) -> u32 {
    mitigate(roll, defender.armor)
}

/// Poison tick for a fighter with `max_hp`.
pub fn poison_damage(max_hp: u32, tables: &FightTables) -> u32 {
    percent_of(max_hp, tables.poison_percent).max(1)
}

/// Hp restored by the tragic potion, limited to the missing hp.
pub fn potion_amount(fighter: &Fighter, tables: &FightTables) -> u32 {
    percent_of(fighter.max_hp, tables.tragic_potion_percent)
        .max(1)
        .min(fighter.missing_hp())
}

/// Hp drained by vampirism: a share of the actor's missing hp, limited to
/// what the target has left.
pub fn vampirism_drain(actor: &Fighter, target: &Fighter, tables: &FightTables) -> u32 {
    let drain = percent_of(actor.missing_hp(), tables.vampirism_damage_percent).max(1);
    clamp_to_hp(drain, target.hp)
}

/// Hp the actor recovers from a drain, given a percent roll, limited to its
/// missing hp.
pub fn vampirism_heal(drain: u32, roll_percent: u32, missing_hp: u32) -> u32 {
    percent_of(drain, roll_percent).min(missing_hp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute::{BruteId, BruteRecord};
    use crate::fighter::{FighterId, FighterSet, prepare_fighters};
    use crate::step::Step;

    fn stats(strength: u32, armor: u32) -> EffectiveStats {
        EffectiveStats {
            strength,
            armor: Rate::new(armor),
            ..EffectiveStats::default()
        }
    }

    #[test]
    fn melee_damage_follows_strength_and_variance() {
        let tables = FightTables::default();
        // 5 + 10 × 60% = 11
        assert_eq!(calculate_damage(&stats(10, 0), &stats(0, 0), 100, &tables), 11);
        // 11 × 120% = 13
        assert_eq!(calculate_damage(&stats(10, 0), &stats(0, 0), 120, &tables), 13);
    }

    #[test]
    fn armor_reduces_but_never_nullifies() {
        let tables = FightTables::default();
        // 11 - 25% = 8
        assert_eq!(calculate_damage(&stats(10, 0), &stats(0, 250), 100, &tables), 8);
        assert_eq!(mitigate(1, Rate::CERTAIN), 1);
        assert_eq!(mitigate(0, Rate::ZERO), 1);
    }

    #[test]
    fn damage_is_clamped_to_remaining_hp() {
        assert_eq!(clamp_to_hp(30, 12), 12);
        assert_eq!(clamp_to_hp(3, 12), 3);
    }

    #[test]
    fn poison_ticks_at_least_one() {
        let tables = FightTables::default();
        assert_eq!(poison_damage(100, &tables), 5);
        assert_eq!(poison_damage(3, &tables), 1);
    }

    #[test]
    fn survival_amounts_respect_missing_hp() {
        let tables = FightTables::default();
        let left = BruteRecord::new(BruteId(1), "L", 5, 100, 5, 5, 5);
        let right = BruteRecord::new(BruteId(2), "R", 5, 100, 5, 5, 5);
        let mut set: FighterSet = prepare_fighters(&left, &right, &tables).into();

        set.apply(&Step::Hit {
            brute: FighterId(1),
            target: FighterId(0),
            damage: 90,
        })
        .unwrap();
        set.apply(&Step::Hit {
            brute: FighterId(0),
            target: FighterId(1),
            damage: 95,
        })
        .unwrap();

        let actor = set.fighter(FighterId(0)).unwrap();
        let target = set.fighter(FighterId(1)).unwrap();

        assert_eq!(potion_amount(actor, &tables), 25);
        // 25% of 90 missing = 22, target only has 5
        assert_eq!(vampirism_drain(actor, target, &tables), 5);
        assert_eq!(vampirism_heal(20, 200, 90), 40);
        assert_eq!(vampirism_heal(20, 200, 30), 30);
    }
}
