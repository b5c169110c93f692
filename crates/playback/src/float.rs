//! Fire-and-forget floating text and icons.
//!
//! A float is spawned above an anchor, drifts upward while fading out, and is
//! destroyed when the tween ends. The sequencer never awaits floats and a
//! failing float never fails playback: errors are logged here and dropped.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::RenderError;
use crate::render::{Easing, NodeId, Point, Renderer, TextStyle, Tween, TweenProperty};
use crate::speed::SpeedRef;

#[derive(Clone, Debug, PartialEq)]
pub enum FloatContent {
    Text { text: String, style: TextStyle },
    Icon { texture: String, size: f32 },
}

impl FloatContent {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self::Text {
            text: text.into(),
            style,
        }
    }

    pub fn icon(texture: impl Into<String>, size: f32) -> Self {
        Self::Icon {
            texture: texture.into(),
            size,
        }
    }
}

/// Geometry shared by every float.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatLayout {
    /// Upward travel over the float's lifetime.
    pub distance: f32,
    /// Horizontal bounds the spawn position is clamped to.
    pub min_x: f32,
    pub max_x: f32,
}

impl Default for FloatLayout {
    fn default() -> Self {
        Self {
            distance: 100.0,
            min_x: 20.0,
            max_x: 480.0,
        }
    }
}

/// Handle of a running float. Dropping it does not cancel the float.
#[derive(Debug)]
pub struct FloatHandle {
    task: JoinHandle<()>,
    lifetime: Duration,
}

impl FloatHandle {
    /// Speed-scaled duration of the fade tween.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the float early. Its node is still destroyed.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait until the float is gone.
    pub async fn finished(self) {
        let _ = self.task.await;
    }
}

/// Destroys a node exactly once, including when the owning task is aborted.
struct DisposeGuard {
    renderer: Arc<dyn Renderer>,
    node: NodeId,
}

impl Drop for DisposeGuard {
    fn drop(&mut self) {
        if let Err(err) = self.renderer.destroy(self.node) {
            warn!(node = ?self.node, %err, "failed to dispose float");
        }
    }
}

fn spawn_node(
    renderer: &dyn Renderer,
    content: &FloatContent,
    at: Point,
) -> Result<NodeId, RenderError> {
    match content {
        FloatContent::Text { text, style } => renderer.spawn_text(text, *style, at),
        FloatContent::Icon { texture, size } => renderer.spawn_icon(texture, *size, at),
    }
}

/// Spawn a float above `anchor`, lasting `base / speed`.
pub fn float_up(
    renderer: Arc<dyn Renderer>,
    anchor: Point,
    content: FloatContent,
    base: Duration,
    speed: &SpeedRef,
    layout: FloatLayout,
) -> FloatHandle {
    let lifetime = speed.scale(base);
    let at = Point::new(anchor.x.clamp(layout.min_x, layout.max_x), anchor.y);

    let task = tokio::spawn(async move {
        let node = match spawn_node(renderer.as_ref(), &content, at) {
            Ok(node) => node,
            Err(err) => {
                warn!(%err, ?content, "failed to spawn float");
                return;
            }
        };
        let _guard = DisposeGuard {
            renderer: Arc::clone(&renderer),
            node,
        };

        let tween = Tween::new(node, lifetime)
            .to(TweenProperty::Y, at.y - layout.distance)
            .to(TweenProperty::Alpha, 0.0)
            .easing(Easing::Linear);
        if let Err(err) = renderer.tween(tween).await {
            warn!(node = ?node, %err, "float tween failed");
        }
    });

    FloatHandle { task, lifetime }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::render::{HeadlessRenderer, RenderCommand};
    use crate::speed::PlaybackSpeed;

    #[tokio::test(start_paused = true)]
    async fn lifetime_halves_when_speed_doubles() {
        let renderer = Arc::new(HeadlessRenderer::new());
        let speed = PlaybackSpeed::new(1.0);
        let base = Duration::from_secs(2);

        let start = Instant::now();
        let slow = float_up(
            renderer.clone(),
            Point::new(100.0, 200.0),
            FloatContent::text("+1", TextStyle::HEAL),
            base,
            &speed.reader(),
            FloatLayout::default(),
        );
        slow.finished().await;
        let slow_elapsed = start.elapsed();

        speed.set(2.0);
        let start = Instant::now();
        let fast = float_up(
            renderer.clone(),
            Point::new(100.0, 200.0),
            FloatContent::text("+1", TextStyle::HEAL),
            base,
            &speed.reader(),
            FloatLayout::default(),
        );
        assert_eq!(fast.lifetime(), Duration::from_secs(1));
        fast.finished().await;

        assert_eq!(slow_elapsed, Duration::from_secs(2));
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(renderer.live_nodes(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn spawn_position_is_clamped_and_tween_fades() {
        let renderer = Arc::new(HeadlessRenderer::new());
        let layout = FloatLayout::default();
        float_up(
            renderer.clone(),
            Point::new(-50.0, 300.0),
            FloatContent::icon("cure.png", 30.0),
            Duration::from_secs(2),
            &SpeedRef::default(),
            layout,
        )
        .finished()
        .await;

        let commands = renderer.commands();
        assert!(matches!(
            &commands[0],
            RenderCommand::SpawnIcon { at, .. } if at.x == layout.min_x
        ));
        let RenderCommand::Tween(tween) = &commands[1] else {
            panic!("expected tween, got {:?}", commands[1]);
        };
        assert_eq!(
            tween.targets,
            vec![(TweenProperty::Y, 200.0), (TweenProperty::Alpha, 0.0)]
        );
        assert!(matches!(commands[2], RenderCommand::Destroy(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_float_is_disposed_once() {
        let renderer = Arc::new(HeadlessRenderer::new());
        let handle = float_up(
            renderer.clone(),
            Point::new(100.0, 100.0),
            FloatContent::text("-3", TextStyle::DAMAGE),
            Duration::from_secs(2),
            &SpeedRef::default(),
            FloatLayout::default(),
        );
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(renderer.live_nodes(), 1);

        handle.abort();
        handle.finished().await;

        let destroys = renderer
            .commands()
            .iter()
            .filter(|c| matches!(c, RenderCommand::Destroy(_)))
            .count();
        assert_eq!(destroys, 1);
        assert_eq!(renderer.live_nodes(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn spawn_failures_are_swallowed() {
        let renderer = Arc::new(HeadlessRenderer::builder().fail_cosmetics().build());
        float_up(
            renderer.clone(),
            Point::new(100.0, 100.0),
            FloatContent::text("+5", TextStyle::HEAL),
            Duration::from_secs(2),
            &SpeedRef::default(),
            FloatLayout::default(),
        )
        .finished()
        .await;

        assert!(renderer.texts().is_empty());
        assert_eq!(renderer.live_nodes(), 0);
    }
}
