//! Recording renderer driven by tokio timers.
//!
//! Draws nothing. Every call is recorded as a [`RenderCommand`]; tweens sleep
//! for their duration and non-looping animations complete after a nominal
//! duration divided by the playback speed. Used by tests and by dry-run
//! replays.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use fight_core::{Fighter, FighterId};

use super::{NodeId, Point, Renderer, TextStyle, Tween};
use crate::animation::{Animation, AnimationEvents};
use crate::error::RenderError;

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    LoadSpritesheet(String),
    Sound {
        cue: String,
        speed: f32,
    },
    SpawnFighter {
        fighter: FighterId,
        node: NodeId,
        at: Point,
    },
    SpawnText {
        node: NodeId,
        text: String,
        style: TextStyle,
        at: Point,
    },
    SpawnIcon {
        node: NodeId,
        texture: String,
        at: Point,
    },
    Tween(Tween),
    Flip {
        node: NodeId,
        flipped: bool,
    },
    HpBar {
        fighter: FighterId,
        hp: u32,
        max_hp: u32,
    },
    Animation {
        node: NodeId,
        animation: Animation,
        speed: f32,
    },
    Destroy(NodeId),
}

type PendingAnimation = (NodeId, Animation, AnimationEvents);

#[derive(Default)]
struct State {
    commands: Vec<RenderCommand>,
    next_node: u64,
    live: HashSet<NodeId>,
    pending: Vec<PendingAnimation>,
}

/// Headless [`Renderer`] implementation.
#[derive(Clone)]
pub struct HeadlessRenderer {
    state: Arc<Mutex<State>>,
    spritesheets: Option<HashSet<String>>,
    durations: HashMap<Animation, Duration>,
    default_duration: Duration,
    manual: bool,
    fail_cosmetics: bool,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HeadlessRendererBuilder {
        HeadlessRendererBuilder::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, command: RenderCommand) {
        self.state().commands.push(command);
    }

    fn alloc(&self) -> NodeId {
        let mut state = self.state();
        state.next_node += 1;
        let node = NodeId(state.next_node);
        state.live.insert(node);
        node
    }

    fn check_live(&self, node: NodeId) -> Result<(), RenderError> {
        if self.state().live.contains(&node) {
            Ok(())
        } else {
            Err(RenderError::NodeNotFound(node))
        }
    }

    fn cosmetic(&self, what: &str) -> Result<(), RenderError> {
        if self.fail_cosmetics {
            Err(RenderError::Backend(format!("{what} unavailable")))
        } else {
            Ok(())
        }
    }

    /// Nominal (speed 1.0) duration of an animation.
    pub fn duration_of(&self, animation: Animation) -> Duration {
        self.durations
            .get(&animation)
            .copied()
            .unwrap_or(self.default_duration)
    }

    /// Every call recorded so far.
    pub fn commands(&self) -> Vec<RenderCommand> {
        self.state().commands.clone()
    }

    /// Texts spawned so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.state()
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::SpawnText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Icon textures spawned so far, in order.
    pub fn icons(&self) -> Vec<String> {
        self.state()
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::SpawnIcon { texture, .. } => Some(texture.clone()),
                _ => None,
            })
            .collect()
    }

    /// Sound cues played so far, in order.
    pub fn sounds(&self) -> Vec<String> {
        self.state()
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Sound { cue, .. } => Some(cue.clone()),
                _ => None,
            })
            .collect()
    }

    /// Animations started so far, in order.
    pub fn animations(&self) -> Vec<(NodeId, Animation)> {
        self.state()
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Animation {
                    node, animation, ..
                } => Some((*node, *animation)),
                _ => None,
            })
            .collect()
    }

    /// Number of nodes currently on stage.
    pub fn live_nodes(&self) -> usize {
        self.state().live.len()
    }

    /// Take the callback handles of animations started in manual mode.
    pub fn take_pending_animations(&self) -> Vec<PendingAnimation> {
        std::mem::take(&mut self.state().pending)
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for HeadlessRenderer {
    async fn load_spritesheet(&self, name: &str) -> Result<(), RenderError> {
        self.record(RenderCommand::LoadSpritesheet(name.to_string()));
        match &self.spritesheets {
            Some(available) if !available.contains(name) => {
                Err(RenderError::AssetMissing(name.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn play_sound(&self, cue: &str, speed: f32) -> Result<(), RenderError> {
        self.cosmetic("audio")?;
        self.record(RenderCommand::Sound {
            cue: cue.to_string(),
            speed,
        });
        Ok(())
    }

    fn spawn_fighter(&self, fighter: &Fighter, at: Point) -> Result<NodeId, RenderError> {
        let node = self.alloc();
        self.record(RenderCommand::SpawnFighter {
            fighter: fighter.id,
            node,
            at,
        });
        Ok(node)
    }

    fn spawn_text(&self, text: &str, style: TextStyle, at: Point) -> Result<NodeId, RenderError> {
        self.cosmetic("text")?;
        let node = self.alloc();
        self.record(RenderCommand::SpawnText {
            node,
            text: text.to_string(),
            style,
            at,
        });
        Ok(node)
    }

    fn spawn_icon(&self, texture: &str, _size: f32, at: Point) -> Result<NodeId, RenderError> {
        self.cosmetic("icons")?;
        let node = self.alloc();
        self.record(RenderCommand::SpawnIcon {
            node,
            texture: texture.to_string(),
            at,
        });
        Ok(node)
    }

    async fn tween(&self, tween: Tween) -> Result<(), RenderError> {
        self.check_live(tween.node)?;
        let duration = tween.duration;
        self.record(RenderCommand::Tween(tween));
        tokio::time::sleep(duration).await;
        Ok(())
    }

    fn set_flip(&self, node: NodeId, flipped: bool) -> Result<(), RenderError> {
        self.check_live(node)?;
        self.record(RenderCommand::Flip { node, flipped });
        Ok(())
    }

    fn update_hp_bar(
        &self,
        fighter: FighterId,
        hp: u32,
        max_hp: u32,
        _duration: Duration,
    ) -> Result<(), RenderError> {
        self.record(RenderCommand::HpBar {
            fighter,
            hp,
            max_hp,
        });
        Ok(())
    }

    fn play_animation(
        &self,
        node: NodeId,
        animation: Animation,
        speed: f32,
        events: AnimationEvents,
    ) -> Result<(), RenderError> {
        self.check_live(node)?;
        self.record(RenderCommand::Animation {
            node,
            animation,
            speed,
        });

        if self.manual {
            self.state().pending.push((node, animation, events));
            return Ok(());
        }
        if animation.is_looping() {
            return Ok(());
        }

        let duration = self.duration_of(animation).div_f32(speed.max(f32::EPSILON));
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            events.event(&animation.end_event());
            events.complete();
        });
        Ok(())
    }

    fn destroy(&self, node: NodeId) -> Result<(), RenderError> {
        if !self.state().live.remove(&node) {
            return Err(RenderError::NodeNotFound(node));
        }
        self.record(RenderCommand::Destroy(node));
        Ok(())
    }
}

/// Builder for [`HeadlessRenderer`].
pub struct HeadlessRendererBuilder {
    spritesheets: Option<HashSet<String>>,
    durations: HashMap<Animation, Duration>,
    default_duration: Duration,
    manual: bool,
    fail_cosmetics: bool,
}

impl Default for HeadlessRendererBuilder {
    fn default() -> Self {
        Self {
            spritesheets: None,
            durations: HashMap::new(),
            default_duration: Duration::from_millis(500),
            manual: false,
            fail_cosmetics: false,
        }
    }
}

impl HeadlessRendererBuilder {
    /// Restrict loadable spritesheets. By default every name loads.
    pub fn spritesheets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spritesheets = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Nominal duration of one animation.
    pub fn animation_duration(mut self, animation: Animation, duration: Duration) -> Self {
        self.durations.insert(animation, duration);
        self
    }

    /// Nominal duration of animations without an explicit entry.
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Never complete animations; collect their callbacks instead
    /// (see [`HeadlessRenderer::take_pending_animations`]).
    pub fn manual_animations(mut self) -> Self {
        self.manual = true;
        self
    }

    /// Make text, icon and audio calls fail.
    pub fn fail_cosmetics(mut self) -> Self {
        self.fail_cosmetics = true;
        self
    }

    pub fn build(self) -> HeadlessRenderer {
        HeadlessRenderer {
            state: Arc::new(Mutex::new(State::default())),
            spritesheets: self.spritesheets,
            durations: self.durations,
            default_duration: self.default_duration,
            manual: self.manual,
            fail_cosmetics: self.fail_cosmetics,
        }
    }
}
