use fight_core::{FighterId, Step};

use crate::animation::Animation;
use crate::error::Result;
use crate::render::TextStyle;
use crate::session::Session;

pub(super) async fn hit(
    session: &mut Session,
    step: &Step,
    brute: FighterId,
    target: FighterId,
    damage: u32,
) -> Result<()> {
    let strike = session.animate(brute, Animation::Strike)?;
    session.sound("hit");
    let hurt = session.animate(target, Animation::Hit)?;
    session.float_text(target, format!("-{damage}"), TextStyle::DAMAGE)?;

    strike.wait().await?;
    hurt.wait().await?;

    session.apply(step)?;
    session.rest(brute)?;
    session.rest(target)
}

pub(super) async fn evade(session: &mut Session, step: &Step, brute: FighterId) -> Result<()> {
    let dodge = session.animate(brute, Animation::Evade)?;
    session.sound("evade");
    dodge.wait().await?;

    session.apply(step)?;
    session.rest(brute)
}

/// Counter and reversal: a block with a marker icon. The retaliating strike
/// follows as its own `hit`.
pub(super) async fn block(
    session: &mut Session,
    step: &Step,
    brute: FighterId,
    icon: &str,
) -> Result<()> {
    let block = session.animate(brute, Animation::Block)?;
    session.sound("block");
    session.float_icon(brute, icon)?;
    block.wait().await?;

    session.apply(step)?;
    session.rest(brute)
}

pub(super) async fn bomb(
    session: &mut Session,
    step: &Step,
    brute: FighterId,
    target: FighterId,
    damage: u32,
) -> Result<()> {
    let throw = session.animate(brute, Animation::Throw)?;
    session.sound("skills/bomb");
    throw.wait().await?;

    let hurt = session.animate(target, Animation::Hit)?;
    session.float_text(target, format!("-{damage}"), TextStyle::DAMAGE)?;
    hurt.wait().await?;

    session.apply(step)?;
    session.rest(brute)?;
    session.rest(target)
}
