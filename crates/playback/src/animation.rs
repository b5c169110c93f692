//! Per-fighter animation state machine.
//!
//! ```text
//!   set_animation(action)          renderer completes
//! Idle(pose) ───────────────▶ Acting(action) ───────────────▶ (awaiting side)
//!     ▲                                                          │
//!     └──────────────────────── settle(pose) ◀───────────────────┘
//! ```
//!
//! Every `set_animation` arms a fresh one-shot completion signal and bumps the
//! controller's generation. The renderer resolves signals through the
//! [`AnimationEvents`] handle it was given, which remembers the generation it
//! belongs to: callbacks for superseded animations, duplicate callbacks and
//! callbacks arriving after teardown are ignored.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fight_core::FighterId;
use strum::{EnumString, IntoStaticStr};
use tokio::sync::oneshot;

use crate::error::{PlaybackError, Result};
use crate::render::{NodeId, Renderer};
use crate::speed::SpeedRef;

/// Named sprite animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Animation {
    // resting poses (looping)
    Idle,
    Run,
    Stun,
    Dead,
    Win,
    Lose,

    // actions (complete once)
    Strike,
    Hit,
    Evade,
    Block,
    Drink,
    Steal,
    Stolen,
    Throw,
    Recover,
    Death,
}

impl Animation {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Looping animations never report completion.
    pub const fn is_looping(self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Run | Self::Stun | Self::Dead | Self::Win | Self::Lose
        )
    }

    /// Frame event fired on the last frame, e.g. `stolen:end`.
    pub fn end_event(self) -> String {
        format!("{}:end", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle(Animation),
    Acting(Animation),
}

#[derive(Debug)]
struct EventWaiter {
    name: String,
    armed_at: u64,
    tx: oneshot::Sender<()>,
}

#[derive(Debug, Default)]
struct Signals {
    generation: u64,
    torn_down: bool,
    completion: Option<oneshot::Sender<()>>,
    waiters: Vec<EventWaiter>,
}

fn lock(signals: &Mutex<Signals>) -> MutexGuard<'_, Signals> {
    signals.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Callback handle given to the renderer for one animation.
#[derive(Clone, Debug)]
pub struct AnimationEvents {
    signals: Arc<Mutex<Signals>>,
    generation: u64,
}

impl AnimationEvents {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Report that the animation finished. Returns `false` when the report was
    /// stale or redundant.
    pub fn complete(&self) -> bool {
        let mut signals = lock(&self.signals);
        if signals.torn_down || signals.generation != self.generation {
            return false;
        }
        match signals.completion.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Report a named frame event. Resolves every waiter armed for `name`
    /// before this animation started.
    pub fn event(&self, name: &str) -> bool {
        let mut signals = lock(&self.signals);
        if signals.torn_down {
            return false;
        }

        let generation = self.generation;
        let (ready, pending): (Vec<_>, Vec<_>) = signals
            .waiters
            .drain(..)
            .partition(|w| w.name == name && w.armed_at < generation);
        signals.waiters = pending;

        let mut resolved = false;
        for waiter in ready {
            resolved |= waiter.tx.send(()).is_ok();
        }
        resolved
    }
}

/// Pending completion or named event.
#[derive(Debug)]
#[must_use = "dropping a wait discards the signal"]
pub struct AnimationWait {
    fighter: FighterId,
    rx: oneshot::Receiver<()>,
}

impl AnimationWait {
    /// Resolves when the renderer reports the signal.
    ///
    /// Fails with [`PlaybackError::SignalDropped`] if the signal was superseded
    /// or the controller was torn down first.
    pub async fn wait(self) -> Result<()> {
        self.rx
            .await
            .map_err(|_| PlaybackError::SignalDropped {
                fighter: self.fighter,
            })
    }
}

/// Animation state of one fighter on stage.
pub struct AnimationController {
    fighter: FighterId,
    node: NodeId,
    renderer: Arc<dyn Renderer>,
    speed: SpeedRef,
    signals: Arc<Mutex<Signals>>,
    state: AnimationState,
    tweening: bool,
}

impl AnimationController {
    pub fn new(
        fighter: FighterId,
        node: NodeId,
        renderer: Arc<dyn Renderer>,
        speed: SpeedRef,
    ) -> Self {
        Self {
            fighter,
            node,
            renderer,
            speed,
            signals: Arc::new(Mutex::new(Signals::default())),
            state: AnimationState::Idle(Animation::Idle),
            tweening: false,
        }
    }

    pub fn fighter(&self) -> FighterId {
        self.fighter
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        lock(&self.signals).generation
    }

    pub fn is_tweening(&self) -> bool {
        self.tweening
    }

    pub fn set_tweening(&mut self, tweening: bool) {
        self.tweening = tweening;
    }

    pub fn is_torn_down(&self) -> bool {
        lock(&self.signals).torn_down
    }

    /// Start `animation` and arm its completion signal.
    ///
    /// A previously armed completion signal is dropped.
    pub fn set_animation(&mut self, animation: Animation) -> Result<AnimationWait> {
        let (tx, rx) = oneshot::channel();
        let generation = {
            let mut signals = lock(&self.signals);
            if signals.torn_down {
                return Err(PlaybackError::TornDown);
            }
            signals.generation += 1;
            signals.completion = Some(tx);
            signals.generation
        };

        self.state = if animation.is_looping() {
            AnimationState::Idle(animation)
        } else {
            AnimationState::Acting(animation)
        };

        let events = AnimationEvents {
            signals: Arc::clone(&self.signals),
            generation,
        };
        self.renderer
            .play_animation(self.node, animation, self.speed.get(), events)?;

        Ok(AnimationWait {
            fighter: self.fighter,
            rx,
        })
    }

    /// Arm a waiter for a named frame event of a later animation.
    pub fn wait_for_event(&mut self, name: impl Into<String>) -> Result<AnimationWait> {
        let (tx, rx) = oneshot::channel();
        let mut signals = lock(&self.signals);
        if signals.torn_down {
            return Err(PlaybackError::TornDown);
        }
        let armed_at = signals.generation;
        signals.waiters.push(EventWaiter {
            name: name.into(),
            armed_at,
            tx,
        });

        Ok(AnimationWait {
            fighter: self.fighter,
            rx,
        })
    }

    /// Return to a resting pose without waiting.
    pub fn settle(&mut self, pose: Animation) -> Result<()> {
        let _ = self.set_animation(pose)?;
        Ok(())
    }

    /// Drop every armed signal and ignore all later callbacks.
    pub fn teardown(&mut self) {
        let mut signals = lock(&self.signals);
        signals.torn_down = true;
        signals.completion = None;
        signals.waiters.clear();
        self.tweening = false;
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("fighter", &self.fighter)
            .field("node", &self.node)
            .field("state", &self.state)
            .field("tweening", &self.tweening)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use fight_core::{BruteId, BruteRecord, FightTables, prepare_fighters};

    use super::*;
    use crate::render::{HeadlessRenderer, Point};

    fn controller() -> (AnimationController, Arc<HeadlessRenderer>) {
        let renderer = Arc::new(HeadlessRenderer::builder().manual_animations().build());
        let record = BruteRecord::new(BruteId(1), "Ares", 5, 60, 5, 5, 5);
        let [fighter, _] = prepare_fighters(&record, &record, &FightTables::default());
        let node = renderer.spawn_fighter(&fighter, Point::default()).unwrap();

        let controller =
            AnimationController::new(fighter.id, node, renderer.clone(), SpeedRef::default());
        (controller, renderer)
    }

    #[test]
    fn controllers_drive_a_spawned_node() {
        let (mut controller, renderer) = controller();
        controller.settle(Animation::Idle).unwrap();
        assert_eq!(renderer.animations(), vec![(controller.node(), Animation::Idle)]);
        assert_eq!(renderer.live_nodes(), 1);
    }

    #[tokio::test]
    async fn completion_resolves_once() {
        let (mut controller, renderer) = controller();
        let wait = controller.set_animation(Animation::Drink).unwrap();
        assert_eq!(controller.state(), AnimationState::Acting(Animation::Drink));

        let events = renderer.take_pending_animations().pop().unwrap().2;
        assert!(events.complete());
        assert!(!events.complete());
        wait.wait().await.unwrap();
    }

    #[tokio::test]
    async fn newer_animation_supersedes_older() {
        let (mut controller, renderer) = controller();
        let first = controller.set_animation(Animation::Strike).unwrap();
        let second = controller.set_animation(Animation::Hit).unwrap();

        let mut pending = renderer.take_pending_animations();
        let second_events = pending.pop().unwrap().2;
        let first_events = pending.pop().unwrap().2;

        assert!(!first_events.complete());
        assert!(first.wait().await.is_err());
        assert!(second_events.complete());
        second.wait().await.unwrap();
    }

    #[tokio::test]
    async fn named_events_only_fire_for_later_animations() {
        let (mut controller, renderer) = controller();
        let _stale = controller.set_animation(Animation::Stolen).unwrap();
        let waiter = controller.wait_for_event("stolen:end").unwrap();
        let _fresh = controller.set_animation(Animation::Stolen).unwrap();

        let mut pending = renderer.take_pending_animations();
        let fresh = pending.pop().unwrap().2;
        let stale = pending.pop().unwrap().2;

        assert!(!stale.event("stolen:end"));
        assert!(fresh.event("stolen:end"));
        waiter.wait().await.unwrap();
    }

    #[tokio::test]
    async fn callbacks_after_teardown_are_noops() {
        let (mut controller, renderer) = controller();
        let wait = controller.set_animation(Animation::Death).unwrap();
        let events = renderer.take_pending_animations().pop().unwrap().2;

        controller.teardown();
        assert!(!events.complete());
        assert!(!events.event("death:end"));
        assert!(matches!(
            wait.wait().await,
            Err(PlaybackError::SignalDropped { .. })
        ));
        assert!(matches!(
            controller.set_animation(Animation::Idle),
            Err(PlaybackError::TornDown)
        ));
    }

    #[test]
    fn animation_names() {
        assert_eq!(Animation::Stolen.end_event(), "stolen:end");
        assert!(Animation::Idle.is_looping());
        assert!(!Animation::Drink.is_looping());
    }
}
