use fight_core::FighterId;

use crate::animation::Animation;
use crate::error::Result;
use crate::session::Session;

/// Run into melee range of `target`.
pub(super) async fn run_in(
    session: &mut Session,
    brute: FighterId,
    target: FighterId,
) -> Result<()> {
    let destination = session.melee_position(target)?;
    session.settle(brute, Animation::Run)?;
    session.move_to(brute, destination).await?;
    session.rest(brute)
}

/// Turn around, run to a fresh spot on the own side, face the arena again.
pub(super) async fn walk_back(session: &mut Session, brute: FighterId) -> Result<()> {
    let view = session.view(brute)?;
    let (side, facing) = (view.side, view.flipped);
    let destination = session.random_position(side);

    session.set_flip(brute, !facing)?;
    session.settle(brute, Animation::Run)?;
    session.move_to(brute, destination).await?;
    session.set_flip(brute, facing)?;
    session.rest(brute)
}
