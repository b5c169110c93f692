//! Playback timings and stage layout.

use std::time::Duration;

use fight_core::Side;
use serde::{Deserialize, Serialize};

use crate::float::FloatLayout;

/// Rectangle fighters may stand in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

/// Nominal (speed 1.0) timings and layout of a playback session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Spritesheet every session loads before the first step.
    pub spritesheet: String,

    pub move_duration_ms: u64,
    pub float_duration_ms: u64,
    pub hp_bar_duration_ms: u64,

    pub fighter_width: f32,
    pub fighter_height: f32,
    pub icon_size: f32,
    /// Horizontal offset of status icons from the fighter's anchor.
    pub icon_offset: f32,

    pub float: FloatLayout,
    pub left_area: Area,
    pub right_area: Area,

    /// Seed of the cosmetic position RNG.
    pub layout_seed: u64,
    /// Capacity of each event topic.
    pub event_capacity: usize,
}

impl PlaybackConfig {
    pub fn move_duration(&self) -> Duration {
        Duration::from_millis(self.move_duration_ms)
    }

    pub fn float_duration(&self) -> Duration {
        Duration::from_millis(self.float_duration_ms)
    }

    pub fn hp_bar_duration(&self) -> Duration {
        Duration::from_millis(self.hp_bar_duration_ms)
    }

    pub fn area(&self, side: Side) -> Area {
        match side {
            Side::Left => self.left_area,
            Side::Right => self.right_area,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            spritesheet: "misc".to_string(),
            move_duration_ms: 250,
            float_duration_ms: 2000,
            hp_bar_duration_ms: 300,
            fighter_width: 60.0,
            fighter_height: 80.0,
            icon_size: 30.0,
            icon_offset: 35.0,
            float: FloatLayout::default(),
            left_area: Area {
                min_x: 40.0,
                max_x: 180.0,
                min_y: 220.0,
                max_y: 300.0,
            },
            right_area: Area {
                min_x: 320.0,
                max_x: 460.0,
                min_y: 220.0,
                max_y: 300.0,
            },
            layout_seed: 0,
            event_capacity: 128,
        }
    }
}
