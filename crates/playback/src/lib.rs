//! Timed playback of fight step logs.
//!
//! A [`StepPlayer`] consumes a [`fight_core::StepLog`] strictly in order and
//! turns every step into animations, movement tweens, sounds and floating
//! effects on a [`Renderer`]. Each step's awaits resolve before the next step
//! starts; decorative effects are detached and never block the sequence.
//!
//! Modules are organized by responsibility:
//! - [`player`] hosts the sequencer, its builder and the cancellation handle
//! - [`animation`] is the per-fighter animation state machine
//! - [`float`] spawns fire-and-forget floating text and icons
//! - [`render`] defines the rendering seam and a headless implementation
//! - [`events`] provides the topic-based playback event bus
//! - [`log`] decodes JSON step logs with precise error reporting
pub mod animation;
pub mod config;
pub mod error;
pub mod events;
pub mod float;
pub mod log;
pub mod player;
pub mod render;
pub mod speed;

mod effects;
mod session;

pub use animation::{
    Animation, AnimationController, AnimationEvents, AnimationState, AnimationWait,
};
pub use config::{Area, PlaybackConfig};
pub use error::{PlaybackError, RenderError, Result};
pub use events::{EventBus, PlaybackEvent, Topic};
pub use float::{FloatContent, FloatHandle, FloatLayout, float_up};
pub use log::decode_step_log;
pub use player::{PlaybackHandle, PlaybackOutcome, StepPlayer, StepPlayerBuilder};
pub use render::{
    Easing, HeadlessRenderer, HeadlessRendererBuilder, NodeId, Point, RenderCommand, Renderer,
    TextStyle, Tween, TweenProperty,
};
pub use speed::{PlaybackSpeed, SpeedRef};
