//! Per-kind playback effects.
//!
//! Every handler follows the same contract: resolve the fighters involved
//! (fail fast), start animations, fire-and-forget sounds and floats, await
//! the signals that end the step, then apply the numeric change and settle
//! the fighters into their resting poses.

mod ending;
mod heal;
mod melee;
mod movement;
mod status;
mod vampirism;

use fight_core::Step;

use crate::error::Result;
use crate::session::Session;

/// Play one step to completion.
pub(crate) async fn dispatch(session: &mut Session, step: &Step) -> Result<()> {
    session.resolve(step)?;

    match *step {
        Step::Move { brute, target } => movement::run_in(session, brute, target).await,
        Step::MoveBack { brute } => movement::walk_back(session, brute).await,
        Step::Hit {
            brute,
            target,
            damage,
        } => melee::hit(session, step, brute, target, damage).await,
        Step::Evade { brute, .. } => melee::evade(session, step, brute).await,
        Step::Counter { brute, .. } => melee::block(session, step, brute, "counter.png").await,
        Step::Reversal { brute, .. } => melee::block(session, step, brute, "reversal.png").await,
        Step::Bomb {
            brute,
            target,
            damage,
        } => melee::bomb(session, step, brute, target, damage).await,
        Step::StatusApplied { target, status, .. } => {
            status::applied(session, step, target, status)
        }
        Step::Poison { brute, damage } => status::poison(session, step, brute, damage).await,
        Step::Stunned { brute } => status::stunned(session, step, brute).await,
        Step::Heal {
            brute,
            amount,
            poison_heal,
        } => heal::drink(session, step, brute, amount, poison_heal).await,
        Step::Vampirism {
            brute,
            target,
            heal,
            damage,
        } => vampirism::drain(session, step, brute, target, heal, damage).await,
        Step::Death { brute } => ending::death(session, step, brute).await,
        Step::End { winner, loser, .. } => ending::end(session, step, winner, loser),
    }
}
