//! Transient state of one playback session.
//!
//! A session owns the fighters being replayed, one [`AnimationController`] per
//! fighter, their on-stage positions and the cosmetic RNG. It is created per
//! `play` call and torn down when the call returns.

use std::collections::BTreeMap;
use std::sync::Arc;

use fight_core::{Fighter, FighterId, FighterSet, Side, Step};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::animation::{Animation, AnimationController, AnimationWait};
use crate::config::PlaybackConfig;
use crate::error::{PlaybackError, Result};
use crate::float::{FloatContent, FloatHandle, float_up};
use crate::render::{Point, Renderer, TextStyle, Tween};
use crate::speed::SpeedRef;

/// On-stage representation of a fighter.
#[derive(Debug)]
pub(crate) struct FighterView {
    pub controller: AnimationController,
    pub position: Point,
    pub side: Side,
    pub flipped: bool,
}

pub(crate) struct Session {
    renderer: Arc<dyn Renderer>,
    speed: SpeedRef,
    config: PlaybackConfig,
    fighters: FighterSet,
    views: BTreeMap<FighterId, FighterView>,
    rng: StdRng,
    floats: Vec<FloatHandle>,
}

impl Session {
    /// Load assets and place every fighter on stage.
    pub async fn open(
        renderer: Arc<dyn Renderer>,
        speed: SpeedRef,
        config: PlaybackConfig,
        fighters: Vec<Fighter>,
    ) -> Result<Self> {
        renderer
            .load_spritesheet(&config.spritesheet)
            .await
            .map_err(|source| PlaybackError::SpritesheetMissing {
                name: config.spritesheet.clone(),
                source,
            })?;

        let mut session = Self {
            rng: StdRng::seed_from_u64(config.layout_seed),
            renderer,
            speed,
            config,
            fighters: FighterSet::new(fighters),
            views: BTreeMap::new(),
            floats: Vec::new(),
        };

        let placements: Vec<(FighterId, Side)> =
            session.fighters.iter().map(|f| (f.id, f.side)).collect();
        for (id, side) in placements {
            let position = session.random_position(side);
            let fighter = session.fighters.fighter(id)?;
            let node = session.renderer.spawn_fighter(fighter, position)?;
            // Right-side fighters face left.
            let flipped = side == Side::Right;
            session.renderer.set_flip(node, flipped)?;

            let controller = AnimationController::new(
                id,
                node,
                Arc::clone(&session.renderer),
                session.speed.clone(),
            );
            session.views.insert(
                id,
                FighterView {
                    controller,
                    position,
                    side,
                    flipped,
                },
            );
            session.rest(id)?;
        }

        Ok(session)
    }

    pub fn fighter(&self, id: FighterId) -> Result<&Fighter> {
        self.fighters
            .get(id)
            .ok_or(PlaybackError::FighterNotFound(id))
    }

    pub fn view(&self, id: FighterId) -> Result<&FighterView> {
        self.views.get(&id).ok_or(PlaybackError::FighterNotFound(id))
    }

    pub fn view_mut(&mut self, id: FighterId) -> Result<&mut FighterView> {
        self.views
            .get_mut(&id)
            .ok_or(PlaybackError::FighterNotFound(id))
    }

    /// Fail fast unless every fighter of `step` is on stage.
    pub fn resolve(&self, step: &Step) -> Result<()> {
        for id in step.fighters() {
            self.fighter(id)?;
            self.view(id)?;
        }
        Ok(())
    }

    /// Start an animation and return its completion signal.
    pub fn animate(&mut self, id: FighterId, animation: Animation) -> Result<AnimationWait> {
        self.view_mut(id)?.controller.set_animation(animation)
    }

    /// Settle into the resting pose that matches the fighter's state.
    pub fn rest(&mut self, id: FighterId) -> Result<()> {
        let fighter = self.fighter(id)?;
        let pose = if fighter.dead {
            Animation::Dead
        } else if fighter.is_stunned() {
            Animation::Stun
        } else {
            Animation::Idle
        };
        self.settle(id, pose)
    }

    pub fn settle(&mut self, id: FighterId, pose: Animation) -> Result<()> {
        self.view_mut(id)?.controller.settle(pose)
    }

    /// Apply a step's numeric change and refresh the affected hp bars.
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        self.fighters.apply(step)?;

        let duration = self.speed.scale(self.config.hp_bar_duration());
        for id in step.fighters() {
            let fighter = self.fighter(id)?;
            if let Err(err) = self
                .renderer
                .update_hp_bar(id, fighter.hp, fighter.max_hp, duration)
            {
                warn!(fighter = %id, %err, "failed to update hp bar");
            }
        }
        Ok(())
    }

    /// Fire-and-forget sound cue.
    pub fn sound(&self, cue: &str) {
        if let Err(err) = self.renderer.play_sound(cue, self.speed.get()) {
            warn!(cue, %err, "failed to play sound");
        }
    }

    /// Point above a fighter's head.
    fn head(&self, id: FighterId) -> Result<Point> {
        let view = self.view(id)?;
        Ok(Point::new(
            view.position.x,
            view.position.y - self.config.fighter_height,
        ))
    }

    fn float(&mut self, anchor: Point, content: FloatContent) {
        self.floats.retain(|f| !f.is_finished());
        let handle = float_up(
            Arc::clone(&self.renderer),
            anchor,
            content,
            self.config.float_duration(),
            &self.speed,
            self.config.float,
        );
        self.floats.push(handle);
    }

    pub fn float_text(&mut self, id: FighterId, text: String, style: TextStyle) -> Result<()> {
        let anchor = self.head(id)?;
        self.float(anchor, FloatContent::text(text, style));
        Ok(())
    }

    /// Status icon, offset to the side of the fighter's head.
    pub fn float_icon(&mut self, id: FighterId, texture: &str) -> Result<()> {
        let head = self.head(id)?;
        let anchor = Point::new(head.x - self.config.icon_offset, head.y);
        let size = self.config.icon_size;
        self.float(anchor, FloatContent::icon(texture, size));
        Ok(())
    }

    pub fn set_flip(&mut self, id: FighterId, flipped: bool) -> Result<()> {
        let renderer = Arc::clone(&self.renderer);
        let view = self.view_mut(id)?;
        renderer.set_flip(view.controller.node(), flipped)?;
        view.flipped = flipped;
        Ok(())
    }

    /// Linear, speed-scaled move. Awaited by the sequencer.
    pub async fn move_to(&mut self, id: FighterId, destination: Point) -> Result<()> {
        let duration = self.speed.scale(self.config.move_duration());
        let renderer = Arc::clone(&self.renderer);

        let view = self.view_mut(id)?;
        let tween = Tween::new(view.controller.node(), duration).to_point(destination);
        view.controller.set_tweening(true);
        let result = renderer.tween(tween).await;
        view.controller.set_tweening(false);
        result?;

        view.position = destination;
        Ok(())
    }

    /// Spot in melee range of `target`, on the attacker's side of it.
    pub fn melee_position(&self, target: FighterId) -> Result<Point> {
        let view = self.view(target)?;
        let half = self.config.fighter_width / 2.0;
        let x = match view.side {
            Side::Right => view.position.x - half,
            Side::Left => view.position.x + half,
        };
        Ok(Point::new(x, view.position.y - 1.0))
    }

    /// Random spot inside a side's area.
    pub fn random_position(&mut self, side: Side) -> Point {
        let area = self.config.area(side);
        let x = if area.min_x < area.max_x {
            self.rng.gen_range(area.min_x..area.max_x)
        } else {
            area.min_x
        };
        let y = if area.min_y < area.max_y {
            self.rng.gen_range(area.min_y..area.max_y)
        } else {
            area.min_y
        };
        Point::new(x, y)
    }

    /// Drop every armed signal. Later renderer callbacks become no-ops.
    pub fn teardown(&mut self) {
        for view in self.views.values_mut() {
            view.controller.teardown();
        }
    }

    /// Stop floats that are still drifting.
    pub fn abort_floats(&mut self) {
        for float in self.floats.drain(..) {
            float.abort();
        }
    }

    /// Final fighter states. Floats still drifting are left to finish.
    pub fn into_fighters(mut self) -> Vec<Fighter> {
        self.floats.clear();
        std::mem::take(&mut self.fighters).into_inner()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
        self.abort_floats();
    }
}
