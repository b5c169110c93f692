//! Turn resolution.
//!
//! One turn of actor `A` against its opponent `T`, in priority order:
//!
//! 1. poison tick (may kill `A`)
//! 2. stun (turn lost)
//! 3. survival skills below the hp threshold (potion, then vampirism)
//! 4. bomb
//! 5. melee combo

use crate::combat::{self, Reaction};
use crate::fighter::{Fighter, FighterId};
use crate::rng::RngOracle;
use crate::stats::{Rate, Skill};
use crate::step::{StatusKind, Step};

use super::{SimulationError, Simulator};

impl<R: RngOracle> Simulator<'_, R> {
    fn is_alive(&self, id: FighterId) -> bool {
        self.fighters.get(id).is_some_and(Fighter::is_alive)
    }

    /// Emit `death` for a fighter whose hp reached zero.
    fn check_death(&mut self, id: FighterId) -> Result<bool, SimulationError> {
        let fighter = self.fighters.fighter(id)?;
        if fighter.hp == 0 && !fighter.dead {
            self.emit(Step::Death { brute: id })?;
            return Ok(true);
        }
        Ok(fighter.dead)
    }

    pub(super) fn play_turn(&mut self, actor: FighterId) -> Result<(), SimulationError> {
        let target = actor.opponent();

        if self.fighters.fighter(actor)?.is_poisoned() && self.poison_tick(actor)? {
            return Ok(());
        }

        if self.fighters.fighter(actor)?.is_stunned() {
            self.emit(Step::Stunned { brute: actor })?;
            return Ok(());
        }

        if self.try_survival(actor, target)? {
            return Ok(());
        }

        if self.try_bomb(actor, target)? {
            return Ok(());
        }

        self.melee(actor, target)
    }

    /// Returns `true` when the poison killed the actor.
    fn poison_tick(&mut self, actor: FighterId) -> Result<bool, SimulationError> {
        let fighter = self.fighters.fighter(actor)?;
        let damage = combat::clamp_to_hp(
            combat::poison_damage(fighter.max_hp, self.tables),
            fighter.hp,
        );
        self.emit(Step::Poison {
            brute: actor,
            damage,
        })?;
        self.check_death(actor)
    }

    fn try_survival(
        &mut self,
        actor: FighterId,
        target: FighterId,
    ) -> Result<bool, SimulationError> {
        let threshold = Rate::new(self.tables.survival_threshold);
        let fighter = self.fighters.fighter(actor)?;
        if fighter.hp_ratio() >= threshold {
            return Ok(false);
        }

        if fighter.can_use(Skill::TragicPotion) {
            let step = Step::Heal {
                brute: actor,
                amount: combat::potion_amount(fighter, self.tables),
                poison_heal: fighter.is_poisoned(),
            };
            self.emit(step)?;
            return Ok(true);
        }

        if fighter.can_use(Skill::Vampirism) {
            let missing = fighter.missing_hp();
            let opponent = self.fighters.fighter(target)?;
            let damage = combat::vampirism_drain(fighter, opponent, self.tables);
            let roll = self.rng.range(
                actor.0 as u32,
                self.tables.vampirism_heal_min,
                self.tables.vampirism_heal_max,
            );
            self.emit(Step::Vampirism {
                brute: actor,
                target,
                heal: combat::vampirism_heal(damage, roll, missing),
                damage,
            })?;
            self.check_death(target)?;
            return Ok(true);
        }

        Ok(false)
    }

    fn try_bomb(&mut self, actor: FighterId, target: FighterId) -> Result<bool, SimulationError> {
        if !self.fighters.fighter(actor)?.can_use(Skill::Bomb)
            || !self.rng.chance(actor.0 as u32, Rate::new(self.tables.bomb_rate))
        {
            return Ok(false);
        }

        let roll = self.rng.range(
            actor.0 as u32,
            self.tables.bomb_damage_min,
            self.tables.bomb_damage_max,
        );
        let defender = self.fighters.fighter(target)?;
        let damage = combat::clamp_to_hp(combat::bomb_damage(roll, &defender.stats), defender.hp);

        self.emit(Step::Bomb {
            brute: actor,
            target,
            damage,
        })?;
        self.check_death(target)?;
        Ok(true)
    }

    fn melee(&mut self, actor: FighterId, target: FighterId) -> Result<(), SimulationError> {
        self.emit(Step::Move {
            brute: actor,
            target,
        })?;

        let mut attacks = 0;
        loop {
            attacks += 1;

            let defender = self.fighters.fighter(target)?;
            match combat::defender_reaction(defender, &mut self.rng) {
                Reaction::Counter => {
                    self.emit(Step::Counter {
                        brute: target,
                        target: actor,
                    })?;
                    self.strike(target, actor)?;
                    break;
                }
                Reaction::Evade => {
                    self.emit(Step::Evade {
                        brute: target,
                        attacker: actor,
                    })?;
                }
                Reaction::None => {
                    if self.strike(actor, target)? {
                        break;
                    }
                    self.on_hit(actor, target)?;

                    let defender = self.fighters.fighter(target)?;
                    if combat::reversal_triggers(defender, &mut self.rng) {
                        self.emit(Step::Reversal {
                            brute: target,
                            target: actor,
                        })?;
                        if self.strike(target, actor)? {
                            break;
                        }
                    }
                }
            }

            if !self.is_alive(actor)
                || !self.is_alive(target)
                || attacks >= self.tables.max_combo_hits
            {
                break;
            }
            let combo = self.fighters.fighter(actor)?.stats.combo_rate;
            if !self.rng.chance(actor.0 as u32, combo) {
                break;
            }
        }

        if self.is_alive(actor) {
            self.emit(Step::MoveBack { brute: actor })?;
        }
        Ok(())
    }

    /// One melee blow. Returns `true` when it killed the defender.
    fn strike(
        &mut self,
        attacker: FighterId,
        defender: FighterId,
    ) -> Result<bool, SimulationError> {
        let variance = self.rng.range(
            attacker.0 as u32,
            self.tables.damage_variance_min,
            self.tables.damage_variance_max,
        );
        let (a, d) = (self.fighters.fighter(attacker)?, self.fighters.fighter(defender)?);
        let damage = combat::clamp_to_hp(
            combat::calculate_damage(&a.stats, &d.stats, variance, self.tables),
            d.hp,
        );

        self.emit(Step::Hit {
            brute: attacker,
            target: defender,
            damage,
        })?;
        self.check_death(defender)
    }

    /// On-hit skills of the attacker: `hammer` stuns, `venom` poisons.
    fn on_hit(&mut self, actor: FighterId, target: FighterId) -> Result<(), SimulationError> {
        let attacker = self.fighters.fighter(actor)?;
        let defender = self.fighters.fighter(target)?;
        let hammer = attacker.can_use(Skill::Hammer) && !defender.is_stunned();
        let venom = attacker.can_use(Skill::Venom) && !defender.is_poisoned();

        if hammer && self.rng.chance(actor.0 as u32, Rate::new(self.tables.hammer_stun_rate)) {
            self.emit(Step::StatusApplied {
                brute: actor,
                target,
                status: StatusKind::Stun,
            })?;
        }
        if venom && self.rng.chance(actor.0 as u32, Rate::new(self.tables.venom_poison_rate)) {
            self.emit(Step::StatusApplied {
                brute: actor,
                target,
                status: StatusKind::Poison,
            })?;
        }
        Ok(())
    }
}
