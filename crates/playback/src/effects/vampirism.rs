use fight_core::{FighterId, Step};

use crate::animation::Animation;
use crate::error::Result;
use crate::render::TextStyle;
use crate::session::Session;

/// The actor closes in, steals life from the target and walks back.
///
/// The step ends on the target's `stolen:end` frame event rather than on the
/// actor's animation completion.
pub(super) async fn drain(
    session: &mut Session,
    step: &Step,
    brute: FighterId,
    target: FighterId,
    heal: u32,
    damage: u32,
) -> Result<()> {
    let destination = session.melee_position(target)?;
    let side = session.view(brute)?.side;
    let facing = session.view(brute)?.flipped;

    session.settle(brute, Animation::Run)?;
    session.move_to(brute, destination).await?;

    session.set_flip(brute, !facing)?;
    let _steal = session.animate(brute, Animation::Steal)?;
    session.sound("skills/vampirism");

    // Armed before the animation starts so the event cannot be missed.
    let stolen = session
        .view_mut(target)?
        .controller
        .wait_for_event(Animation::Stolen.end_event())?;
    let _hurt = session.animate(target, Animation::Stolen)?;

    session.float_text(brute, format!("+{heal}"), TextStyle::HEAL)?;
    session.float_text(target, format!("-{damage}"), TextStyle::DAMAGE)?;

    stolen.wait().await?;

    session.set_flip(brute, facing)?;
    session.apply(step)?;
    session.rest(target)?;

    let home = session.random_position(side);
    session.settle(brute, Animation::Run)?;
    session.move_to(brute, home).await?;
    session.rest(brute)
}
