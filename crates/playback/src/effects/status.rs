use fight_core::{FighterId, StatusKind, Step};

use crate::animation::Animation;
use crate::error::Result;
use crate::render::TextStyle;
use crate::session::Session;

pub(super) fn applied(
    session: &mut Session,
    step: &Step,
    target: FighterId,
    status: StatusKind,
) -> Result<()> {
    let icon = match status {
        StatusKind::Poison => "poison.png",
        StatusKind::Stun => "stun.png",
    };
    session.float_icon(target, icon)?;
    session.apply(step)?;
    session.rest(target)
}

pub(super) async fn poison(
    session: &mut Session,
    step: &Step,
    brute: FighterId,
    damage: u32,
) -> Result<()> {
    let hurt = session.animate(brute, Animation::Hit)?;
    session.float_text(brute, format!("-{damage}"), TextStyle::POISON)?;
    hurt.wait().await?;

    session.apply(step)?;
    session.rest(brute)
}

pub(super) async fn stunned(session: &mut Session, step: &Step, brute: FighterId) -> Result<()> {
    let recover = session.animate(brute, Animation::Recover)?;
    recover.wait().await?;

    session.apply(step)?;
    session.rest(brute)
}
