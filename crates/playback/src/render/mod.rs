//! Rendering collaborator seam.
//!
//! Playback decides what happens and how long it logically lasts; drawing
//! pixels and playing audio is delegated to a [`Renderer`]. Methods that take
//! time are async and resolve when the visual operation completes. Animation
//! completion is reported back through the [`AnimationEvents`] handle passed
//! to [`Renderer::play_animation`].

mod headless;

pub use headless::{HeadlessRenderer, HeadlessRendererBuilder, RenderCommand};

use std::time::Duration;

use async_trait::async_trait;
use fight_core::{Fighter, FighterId};
use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationEvents};
use crate::error::RenderError;

/// Handle of an element on stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    #[default]
    Linear,
    EaseOut,
}

/// Numeric node property a tween can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    X,
    Y,
    Alpha,
}

/// Interpolate node properties to target values over a duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub node: NodeId,
    pub targets: Vec<(TweenProperty, f32)>,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(node: NodeId, duration: Duration) -> Self {
        Self {
            node,
            targets: Vec::new(),
            duration,
            easing: Easing::Linear,
        }
    }

    #[must_use]
    pub fn to(mut self, property: TweenProperty, value: f32) -> Self {
        self.targets.push((property, value));
        self
    }

    /// Tween `x` and `y` to `point`.
    #[must_use]
    pub fn to_point(self, point: Point) -> Self {
        self.to(TweenProperty::X, point.x).to(TweenProperty::Y, point.y)
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: u16,
    /// `0xRRGGBB`
    pub color: u32,
}

impl TextStyle {
    pub const HEAL: Self = Self {
        size: 20,
        color: 0x00ff00,
    };
    pub const DAMAGE: Self = Self {
        size: 20,
        color: 0xff0000,
    };
    pub const POISON: Self = Self {
        size: 20,
        color: 0x8b00ff,
    };
}

/// Drawing and audio backend.
///
/// Implementations must be cheap to call from the playback task: long
/// operations belong in the returned futures, not in the synchronous methods.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Load a named spritesheet. Playback cannot start without it.
    async fn load_spritesheet(&self, name: &str) -> Result<(), RenderError>;

    /// Start a sound cue at the given playback rate. Never awaited.
    fn play_sound(&self, cue: &str, speed: f32) -> Result<(), RenderError>;

    fn spawn_fighter(&self, fighter: &Fighter, at: Point) -> Result<NodeId, RenderError>;

    fn spawn_text(&self, text: &str, style: TextStyle, at: Point) -> Result<NodeId, RenderError>;

    fn spawn_icon(&self, texture: &str, size: f32, at: Point) -> Result<NodeId, RenderError>;

    /// Run a tween to completion.
    async fn tween(&self, tween: Tween) -> Result<(), RenderError>;

    fn set_flip(&self, node: NodeId, flipped: bool) -> Result<(), RenderError>;

    fn update_hp_bar(
        &self,
        fighter: FighterId,
        hp: u32,
        max_hp: u32,
        duration: Duration,
    ) -> Result<(), RenderError>;

    /// Start an animation on a fighter node.
    ///
    /// The renderer reports named frame events and completion through
    /// `events`. Looping animations never complete.
    fn play_animation(
        &self,
        node: NodeId,
        animation: Animation,
        speed: f32,
        events: AnimationEvents,
    ) -> Result<(), RenderError>;

    fn destroy(&self, node: NodeId) -> Result<(), RenderError>;
}
