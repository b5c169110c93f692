//! Fight balance tables and simulation bounds.
//!
//! Every number that shapes a fight lives here rather than in the formulas.
//! Several of the stat rules (initiative, combo, evasion) are provisional, so
//! they are tunable constants behind [`crate::StatsResolver`] instead of
//! hard-coded truth. Rates are per-mille (`1000` = certain).

use serde::{Deserialize, Serialize};

/// Tunable fight parameters.
///
/// Tables are part of the simulation input: two simulations only agree when
/// they use identical tables, seed and brute records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FightTables {
    // ===== initiative / scheduling =====
    /// Initiative every brute starts from. Lower values act earlier.
    pub base_initiative: i32,
    /// Initiative modifier for `firstStrike`.
    pub first_strike_initiative: i32,
    /// Initiative modifier for `reconnaissance`.
    pub reconnaissance_initiative: i32,
    /// Random jitter (inclusive upper bound) added to the opening initiative.
    pub initiative_jitter: u32,
    /// Base interval between two turns of the same brute (hand combat).
    pub base_interval: u32,
    /// Speed scale: `cost = interval * speed_scale / (speed_scale + speed)`.
    pub speed_scale: u32,

    // ===== reaction rates (per-mille) =====
    /// Counter rate granted by `sixthSense`.
    pub sixth_sense_counter: u32,
    /// Combo rate per agility point relative to level (`agility * f / level`).
    pub combo_agility_factor: u32,
    /// Combo rate granted by `fistsOfFury`.
    pub fists_of_fury_combo: u32,
    /// Reversal rate granted by `hostility`.
    pub hostility_reversal: u32,
    /// Evasion per point of agility above the opponent's.
    pub evasion_per_agility: u32,
    /// Evasion granted by `untouchable`.
    pub untouchable_evasion: u32,
    /// Damage reduction granted by `armor`.
    pub armor_reduction: u32,

    // ===== caps (per-mille) =====
    pub counter_cap: u32,
    pub combo_cap: u32,
    pub reversal_cap: u32,
    pub evasion_cap: u32,
    /// Upper bound on consecutive hits in a single combo.
    pub max_combo_hits: u32,

    // ===== damage =====
    pub base_damage: u32,
    /// Percentage of strength added to melee damage.
    pub strength_damage_percent: u32,
    /// Damage variance roll bounds, in percent of the nominal damage.
    pub damage_variance_min: u32,
    pub damage_variance_max: u32,

    // ===== skills =====
    /// Below this hp per-mille survival skills (potion, vampirism) trigger.
    pub survival_threshold: u32,
    /// Percentage of max hp restored by `tragicPotion`.
    pub tragic_potion_percent: u32,
    /// Percentage of the user's missing hp drained by `vampirism`.
    pub vampirism_damage_percent: u32,
    /// Heal roll bounds for `vampirism`, in percent of the damage dealt.
    pub vampirism_heal_min: u32,
    pub vampirism_heal_max: u32,
    /// Chance per turn to throw the `bomb`.
    pub bomb_rate: u32,
    pub bomb_damage_min: u32,
    pub bomb_damage_max: u32,
    /// Chance per hit for `hammer` to stun.
    pub hammer_stun_rate: u32,
    /// Chance per hit for `venom` to poison.
    pub venom_poison_rate: u32,
    /// Percentage of max hp lost per poisoned turn.
    pub poison_percent: u32,

    // ===== bounds =====
    /// Turn count after which the fight is force-ended by hp ratio.
    pub max_turns: u32,
    /// Safety bound on emitted steps. Exceeding it is an internal error.
    pub max_steps: usize,
}

impl FightTables {
    pub const DEFAULT_MAX_TURNS: u32 = 500;
    pub const DEFAULT_MAX_STEPS: usize = 50_000;

    pub fn new() -> Self {
        Self {
            base_initiative: 0,
            first_strike_initiative: -20,
            reconnaissance_initiative: -10,
            initiative_jitter: 10,
            base_interval: 100,
            speed_scale: 50,

            sixth_sense_counter: 100,
            combo_agility_factor: 500,
            fists_of_fury_combo: 200,
            hostility_reversal: 330,
            evasion_per_agility: 10,
            untouchable_evasion: 300,
            armor_reduction: 250,

            counter_cap: 900,
            combo_cap: 600,
            reversal_cap: 900,
            evasion_cap: 700,
            max_combo_hits: 5,

            base_damage: 5,
            strength_damage_percent: 60,
            damage_variance_min: 80,
            damage_variance_max: 120,

            survival_threshold: 500,
            tragic_potion_percent: 25,
            vampirism_damage_percent: 25,
            vampirism_heal_min: 100,
            vampirism_heal_max: 200,
            bomb_rate: 300,
            bomb_damage_min: 15,
            bomb_damage_max: 25,
            hammer_stun_rate: 150,
            venom_poison_rate: 250,
            poison_percent: 5,

            max_turns: Self::DEFAULT_MAX_TURNS,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Overrides the turn limit (builder pattern).
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Overrides the step safety bound (builder pattern).
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl Default for FightTables {
    fn default() -> Self {
        Self::new()
    }
}
