//! Shared playback speed.
//!
//! The speed multiplier is owned by a [`PlaybackSpeed`] (the user-facing
//! control) and read through cheap [`SpeedRef`] clones by every timed
//! operation. A duration is scaled by the value read when the operation
//! starts; tweens already in flight keep their original duration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Read-only view of the playback speed.
#[derive(Clone, Debug)]
pub struct SpeedRef {
    bits: Arc<AtomicU32>,
}

impl SpeedRef {
    /// A speed nobody can change.
    pub fn fixed(speed: f32) -> Self {
        PlaybackSpeed::new(speed).reader()
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// `nominal / speed`, using the speed as of now.
    pub fn scale(&self, nominal: Duration) -> Duration {
        nominal.div_f32(self.get())
    }
}

impl Default for SpeedRef {
    fn default() -> Self {
        Self::fixed(1.0)
    }
}

/// Writer side of the playback speed.
#[derive(Debug)]
pub struct PlaybackSpeed {
    bits: Arc<AtomicU32>,
}

impl PlaybackSpeed {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 16.0;

    pub fn new(speed: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(Self::sanitize(speed).to_bits())),
        }
    }

    /// Change the speed. Non-finite values reset to `1.0`; others are clamped
    /// to [`Self::MIN`]..=[`Self::MAX`].
    pub fn set(&self, speed: f32) {
        self.bits
            .store(Self::sanitize(speed).to_bits(), Ordering::Release);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn reader(&self) -> SpeedRef {
        SpeedRef {
            bits: Arc::clone(&self.bits),
        }
    }

    fn sanitize(speed: f32) -> f32 {
        if speed.is_finite() {
            speed.clamp(Self::MIN, Self::MAX)
        } else {
            1.0
        }
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self::new(1.0)
    }
}
