//! Combat resolution.
//!
//! Pure formulas used by the simulator. Nothing here mutates a fighter: the
//! functions compute amounts and reactions, the simulator turns them into
//! steps, and [`crate::FighterSet::apply`] performs the change.
//!
//! # Core Functions
//!
//! - `calculate_damage`: melee damage with variance and armor
//! - `mitigate`: armor reduction with a floor of one
//! - `clamp_to_hp`: never deal more than the target has
//! - `defender_reaction`: counter / evade / take the hit

pub mod damage;
pub mod reaction;

pub use damage::{
    bomb_damage, calculate_damage, clamp_to_hp, mitigate, poison_damage, potion_amount,
    vampirism_drain, vampirism_heal,
};
pub use reaction::{Reaction, defender_reaction, reversal_triggers};
