//! Topic-based playback event bus.

use fight_core::StepKind;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Channel an event is published on.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Start, finish and failure of a playback session.
    Session,
    /// One pair of events per dispatched step.
    Step,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    SessionStarted { steps: usize },
    StepStarted { index: usize, kind: StepKind },
    StepSettled { index: usize, kind: StepKind },
    /// `cursor` is the index of the first step that did not settle.
    SessionFinished { cursor: usize, cancelled: bool },
    SessionFailed { cursor: usize, error: String },
}

impl PlaybackEvent {
    pub fn topic(&self) -> Topic {
        match self {
            PlaybackEvent::StepStarted { .. } | PlaybackEvent::StepSettled { .. } => Topic::Step,
            PlaybackEvent::SessionStarted { .. }
            | PlaybackEvent::SessionFinished { .. }
            | PlaybackEvent::SessionFailed { .. } => Topic::Session,
        }
    }
}

/// One broadcast channel per [`Topic`]. Events without subscribers are
/// dropped; slow subscribers observe `Lagged`.
#[derive(Clone, Debug)]
pub struct EventBus {
    session: broadcast::Sender<PlaybackEvent>,
    step: broadcast::Sender<PlaybackEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    /// `capacity` is per topic and raised to at least one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            session: broadcast::channel(capacity).0,
            step: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<PlaybackEvent> {
        match topic {
            Topic::Session => &self.session,
            Topic::Step => &self.step,
        }
    }

    pub fn publish(&self, event: PlaybackEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!(?topic, "playback event dropped, no subscribers");
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<PlaybackEvent> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
