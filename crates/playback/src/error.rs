//! Unified error types surfaced by the playback API.
//!
//! Structural failures (unknown step kinds, missing fighters, missing assets)
//! abort a session and are returned as [`PlaybackError`]. Cosmetic failures
//! never reach this type: they are logged where they happen and playback
//! carries on.
use fight_core::{ApplyError, ErrorSeverity, FightError, FighterId, StepLogError};
use thiserror::Error;

use crate::render::NodeId;

pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Failures reported by a [`crate::Renderer`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("asset `{0}` is not loaded")]
    AssetMissing(String),

    #[error("render node {0:?} does not exist")]
    NodeNotFound(NodeId),

    #[error("renderer backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("step {index} has unknown kind `{kind}`")]
    UnknownStepKind { index: usize, kind: String },

    #[error("step {index} is malformed: {message}")]
    MalformedStep { index: usize, message: String },

    #[error("step log is not a JSON array of steps")]
    MalformedJson(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidLog(#[from] StepLogError),

    #[error("{0} is not part of this playback session")]
    FighterNotFound(FighterId),

    #[error("spritesheet `{name}` could not be loaded")]
    SpritesheetMissing {
        name: String,
        #[source]
        source: RenderError,
    },

    #[error("rendering failed")]
    Render(#[from] RenderError),

    #[error("animation signal for {fighter} was dropped before it resolved")]
    SignalDropped { fighter: FighterId },

    #[error("session was torn down")]
    TornDown,

    #[error("step player built without a renderer")]
    RendererNotSet,
}

impl From<ApplyError> for PlaybackError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::FighterNotFound(id) => Self::FighterNotFound(id),
        }
    }
}

impl FightError for PlaybackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownStepKind { .. }
            | Self::MalformedStep { .. }
            | Self::MalformedJson(_)
            | Self::InvalidLog(_) => ErrorSeverity::Validation,
            Self::FighterNotFound(_) | Self::SpritesheetMissing { .. } | Self::Render(_) => {
                ErrorSeverity::Fatal
            }
            Self::SignalDropped { .. } => ErrorSeverity::Internal,
            Self::TornDown => ErrorSeverity::Recoverable,
            Self::RendererNotSet => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStepKind { .. } => "PLAYBACK_UNKNOWN_STEP_KIND",
            Self::MalformedStep { .. } => "PLAYBACK_MALFORMED_STEP",
            Self::MalformedJson(_) => "PLAYBACK_MALFORMED_JSON",
            Self::InvalidLog(_) => "PLAYBACK_INVALID_LOG",
            Self::FighterNotFound(_) => "PLAYBACK_FIGHTER_NOT_FOUND",
            Self::SpritesheetMissing { .. } => "PLAYBACK_SPRITESHEET_MISSING",
            Self::Render(_) => "PLAYBACK_RENDER",
            Self::SignalDropped { .. } => "PLAYBACK_SIGNAL_DROPPED",
            Self::TornDown => "PLAYBACK_TORN_DOWN",
            Self::RendererNotSet => "PLAYBACK_RENDERER_NOT_SET",
        }
    }
}
