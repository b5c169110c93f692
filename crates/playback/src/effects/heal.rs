use fight_core::{FighterId, Step};

use crate::animation::Animation;
use crate::error::Result;
use crate::render::TextStyle;
use crate::session::Session;

pub(super) async fn drink(
    session: &mut Session,
    step: &Step,
    brute: FighterId,
    amount: u32,
    poison_heal: bool,
) -> Result<()> {
    let drink = session.animate(brute, Animation::Drink)?;
    session.sound("skills/tragicPotion");
    session.float_text(brute, format!("+{amount}"), TextStyle::HEAL)?;
    if poison_heal {
        session.float_icon(brute, "cure.png")?;
    }
    drink.wait().await?;

    session.apply(step)?;
    session.rest(brute)
}
