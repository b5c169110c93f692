//! Timeline scheduling.
//!
//! Each fighter owns a `next_turn` tick. The fighter with the smallest tick
//! acts, then its tick advances by a speed-scaled turn cost. Ticks start at
//! the fighter's initiative plus a small jitter, so negative initiative
//! (e.g. `firstStrike`) simply means an earlier first turn.

use core::cmp::Reverse;

use crate::config::FightTables;
use crate::fighter::{Fighter, FighterId, FighterSet};
use crate::rng::{FightRng, RngOracle};
use crate::stats::EffectiveStats;

/// Position on the fight timeline.
pub type Tick = i64;

/// Timeline cost of one turn.
///
/// `max(1, interval × speed_scale / (speed_scale + speed))`
pub fn turn_cost(stats: &EffectiveStats, tables: &FightTables) -> Tick {
    let denominator = tables.speed_scale as u64 + stats.speed as u64;
    if denominator == 0 {
        return 1;
    }
    let cost = (stats.interval as u64 * tables.speed_scale as u64) / denominator;
    cost.max(1) as Tick
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    fighter: FighterId,
    next_turn: Tick,
    cost: Tick,
    speed: u32,
}

/// Turn order of one fight.
#[derive(Clone, Debug)]
pub struct Timeline {
    slots: Vec<Slot>,
}

impl Timeline {
    /// Place every fighter at its opening tick.
    ///
    /// Draws one jitter roll per fighter, in fighter order.
    pub fn new<R: RngOracle>(
        fighters: &FighterSet,
        rng: &mut FightRng<R>,
        tables: &FightTables,
    ) -> Self {
        let slots = fighters
            .iter()
            .map(|fighter: &Fighter| {
                let jitter = rng.range(fighter.id.0 as u32, 0, tables.initiative_jitter);
                Slot {
                    fighter: fighter.id,
                    next_turn: fighter.stats.initiative as Tick + jitter as Tick,
                    cost: turn_cost(&fighter.stats, tables),
                    speed: fighter.stats.speed,
                }
            })
            .collect();

        Self { slots }
    }

    /// Fighter due to act next, among the living.
    ///
    /// Ties go to the faster fighter, then to the lower id.
    pub fn peek(&self, fighters: &FighterSet) -> Option<FighterId> {
        self.slots
            .iter()
            .filter(|slot| fighters.get(slot.fighter).is_some_and(Fighter::is_alive))
            .min_by_key(|slot| (slot.next_turn, Reverse(slot.speed), slot.fighter))
            .map(|slot| slot.fighter)
    }

    /// Select the next fighter and advance its tick past this turn.
    pub fn pop(&mut self, fighters: &FighterSet) -> Option<FighterId> {
        let id = self.peek(fighters)?;
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.fighter == id) {
            slot.next_turn = slot.next_turn.saturating_add(slot.cost);
        }
        Some(id)
    }

    pub fn next_turn_of(&self, id: FighterId) -> Option<Tick> {
        self.slots
            .iter()
            .find(|slot| slot.fighter == id)
            .map(|slot| slot.next_turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute::{BruteId, BruteRecord};
    use crate::fighter::prepare_fighters;

    fn tables() -> FightTables {
        FightTables {
            initiative_jitter: 0,
            ..FightTables::default()
        }
    }

    #[test]
    fn faster_fighters_pay_less_per_turn() {
        let tables = tables();
        let slow = EffectiveStats {
            interval: 100,
            speed: 0,
            ..EffectiveStats::default()
        };
        let fast = EffectiveStats {
            interval: 100,
            speed: 50,
            ..EffectiveStats::default()
        };
        assert_eq!(turn_cost(&slow, &tables), 100);
        assert_eq!(turn_cost(&fast, &tables), 50);
    }

    #[test]
    fn first_strike_acts_first() {
        let tables = tables();
        let left = BruteRecord::new(BruteId(1), "L", 5, 50, 5, 5, 5);
        let right = BruteRecord::new(BruteId(2), "R", 5, 50, 5, 5, 5).with_skills(["firstStrike"]);
        let fighters: FighterSet = prepare_fighters(&left, &right, &tables).into();

        let mut rng = FightRng::new(1);
        let mut timeline = Timeline::new(&fighters, &mut rng, &tables);
        assert_eq!(timeline.pop(&fighters), Some(FighterId::RIGHT));
    }

    #[test]
    fn ties_go_to_speed_then_id() {
        let tables = tables();
        let left = BruteRecord::new(BruteId(1), "L", 5, 50, 5, 5, 5);
        let right = BruteRecord::new(BruteId(2), "R", 5, 50, 5, 5, 9);
        let fighters: FighterSet = prepare_fighters(&left, &right, &tables).into();
        let mut rng = FightRng::new(1);
        let timeline = Timeline::new(&fighters, &mut rng, &tables);
        assert_eq!(timeline.peek(&fighters), Some(FighterId::RIGHT));

        let twin = BruteRecord::new(BruteId(2), "R", 5, 50, 5, 5, 5);
        let fighters: FighterSet = prepare_fighters(&left, &twin, &tables).into();
        let timeline = Timeline::new(&fighters, &mut rng, &tables);
        assert_eq!(timeline.peek(&fighters), Some(FighterId::LEFT));
    }

    #[test]
    fn popping_advances_the_actor() {
        let tables = tables();
        let left = BruteRecord::new(BruteId(1), "L", 5, 50, 5, 5, 5);
        let right = BruteRecord::new(BruteId(2), "R", 5, 50, 5, 5, 5);
        let fighters: FighterSet = prepare_fighters(&left, &right, &tables).into();
        let mut rng = FightRng::new(1);
        let mut timeline = Timeline::new(&fighters, &mut rng, &tables);

        let order: Vec<_> = (0..4).filter_map(|_| timeline.pop(&fighters)).collect();
        assert_eq!(
            order,
            vec![FighterId::LEFT, FighterId::RIGHT, FighterId::LEFT, FighterId::RIGHT]
        );
        // cost = 100 × 50 / 55 = 90
        assert_eq!(timeline.next_turn_of(FighterId::LEFT), Some(180));
    }
}
