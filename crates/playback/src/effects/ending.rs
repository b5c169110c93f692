use fight_core::{FighterId, Step};

use crate::animation::Animation;
use crate::error::Result;
use crate::session::Session;

pub(super) async fn death(session: &mut Session, step: &Step, brute: FighterId) -> Result<()> {
    let fall = session.animate(brute, Animation::Death)?;
    session.sound("death");
    fall.wait().await?;

    session.apply(step)?;
    session.settle(brute, Animation::Dead)
}

pub(super) fn end(
    session: &mut Session,
    step: &Step,
    winner: FighterId,
    loser: FighterId,
) -> Result<()> {
    session.apply(step)?;
    session.settle(winner, Animation::Win)?;

    let pose = if session.fighter(loser)?.dead {
        Animation::Dead
    } else {
        Animation::Lose
    };
    session.settle(loser, pose)
}
