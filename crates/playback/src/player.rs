//! Sequential step playback.
//!
//! [`StepPlayer`] walks a [`StepLog`] one step at a time. Each step is raced
//! against the cancellation signal; decorative effects started by a step are
//! never awaited.

use std::sync::Arc;

use fight_core::{FightError, Fighter, FighterId, StepLog};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info};

use crate::config::PlaybackConfig;
use crate::effects;
use crate::error::{PlaybackError, Result};
use crate::events::{EventBus, PlaybackEvent, Topic};
use crate::log::decode_step_log;
use crate::render::Renderer;
use crate::session::Session;
use crate::speed::SpeedRef;

/// How a playback session ended.
#[derive(Debug)]
pub enum PlaybackOutcome {
    /// Every step settled.
    Completed {
        steps: usize,
        winner: FighterId,
        loser: FighterId,
        forced: bool,
        /// Fighters after the last step was applied.
        fighters: Vec<Fighter>,
    },
    /// The session was cancelled before step `cursor` settled.
    Cancelled { cursor: usize },
}

impl PlaybackOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Cloneable control surface of a [`StepPlayer`].
#[derive(Clone, Debug)]
pub struct PlaybackHandle {
    cancel_tx: Arc<watch::Sender<u64>>,
    bus: EventBus,
}

impl PlaybackHandle {
    /// Cancel every session running at the time of the call.
    ///
    /// Sessions started afterwards are unaffected.
    pub fn cancel(&self) {
        self.cancel_tx.send_modify(|epoch| *epoch = epoch.wrapping_add(1));
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<PlaybackEvent> {
        self.bus.subscribe(topic)
    }
}

/// Plays step logs through a [`Renderer`].
pub struct StepPlayer {
    renderer: Arc<dyn Renderer>,
    speed: SpeedRef,
    config: PlaybackConfig,
    bus: EventBus,
    cancel_tx: Arc<watch::Sender<u64>>,
}

impl StepPlayer {
    pub fn builder() -> StepPlayerBuilder {
        StepPlayerBuilder::default()
    }

    pub fn handle(&self) -> PlaybackHandle {
        PlaybackHandle {
            cancel_tx: Arc::clone(&self.cancel_tx),
            bus: self.bus.clone(),
        }
    }

    pub fn speed(&self) -> &SpeedRef {
        &self.speed
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<PlaybackEvent> {
        self.bus.subscribe(topic)
    }

    /// Decode a JSON step log and play it.
    pub async fn play_json(&self, json: &str, fighters: Vec<Fighter>) -> Result<PlaybackOutcome> {
        let log = decode_step_log(json)?;
        self.play(&log, fighters).await
    }

    /// Play `log` from the first step with `fighters` in their pre-fight state.
    pub async fn play(&self, log: &StepLog, fighters: Vec<Fighter>) -> Result<PlaybackOutcome> {
        let mut cancelled = self.cancel_tx.subscribe();
        cancelled.borrow_and_update();

        info!(
            steps = log.len(),
            speed = self.speed.get(),
            "playback session starting"
        );

        let mut session = match Session::open(
            Arc::clone(&self.renderer),
            self.speed.clone(),
            self.config.clone(),
            fighters,
        )
        .await
        {
            Ok(session) => session,
            Err(err) => return Err(self.fail(0, err)),
        };
        self.bus.publish(PlaybackEvent::SessionStarted { steps: log.len() });

        for (index, step) in log.iter().enumerate() {
            let kind = step.kind();
            if cancelled.has_changed().unwrap_or(false) {
                return Ok(self.cancel(session, index));
            }

            self.bus.publish(PlaybackEvent::StepStarted { index, kind });
            debug!(index, %kind, "dispatching step");

            let settled = tokio::select! {
                biased;
                Ok(()) = cancelled.changed() => None,
                result = effects::dispatch(&mut session, step) => Some(result),
            };

            match settled {
                None => return Ok(self.cancel(session, index)),
                Some(Err(err)) => {
                    session.teardown();
                    session.abort_floats();
                    return Err(self.fail(index, err));
                }
                Some(Ok(())) => {
                    debug!(index, %kind, "step settled");
                    self.bus.publish(PlaybackEvent::StepSettled { index, kind });
                }
            }
        }

        session.teardown();
        self.bus.publish(PlaybackEvent::SessionFinished {
            cursor: log.len(),
            cancelled: false,
        });

        let (winner, loser, forced) = log.outcome();
        info!(steps = log.len(), %winner, forced, "playback session finished");

        Ok(PlaybackOutcome::Completed {
            steps: log.len(),
            winner,
            loser,
            forced,
            fighters: session.into_fighters(),
        })
    }

    fn cancel(&self, mut session: Session, cursor: usize) -> PlaybackOutcome {
        session.teardown();
        session.abort_floats();
        info!(cursor, "playback session cancelled");
        self.bus.publish(PlaybackEvent::SessionFinished {
            cursor,
            cancelled: true,
        });
        PlaybackOutcome::Cancelled { cursor }
    }

    fn fail(&self, cursor: usize, err: PlaybackError) -> PlaybackError {
        error!(
            cursor,
            severity = %err.severity(),
            code = err.error_code(),
            %err,
            "playback session failed"
        );
        self.bus.publish(PlaybackEvent::SessionFailed {
            cursor,
            error: err.to_string(),
        });
        err
    }
}

/// Builder for [`StepPlayer`].
#[derive(Default)]
pub struct StepPlayerBuilder {
    renderer: Option<Arc<dyn Renderer>>,
    speed: Option<SpeedRef>,
    config: PlaybackConfig,
    bus: Option<EventBus>,
}

impl StepPlayerBuilder {
    /// Set the rendering backend (required).
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Set a rendering backend shared with the caller.
    pub fn shared_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Speed reference read by every timed operation. Defaults to 1.0.
    pub fn speed(mut self, speed: SpeedRef) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn config(mut self, config: PlaybackConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish on an existing bus instead of a private one.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn build(self) -> Result<StepPlayer> {
        let renderer = self.renderer.ok_or(PlaybackError::RendererNotSet)?;
        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_capacity));
        let (cancel_tx, _) = watch::channel(0);

        Ok(StepPlayer {
            renderer,
            speed: self.speed.unwrap_or_default(),
            config: self.config,
            bus,
            cancel_tx: Arc::new(cancel_tx),
        })
    }
}
