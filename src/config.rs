//! Game tunables.
//!
//! Every number the game plays by lives here.  `GameConfig::default()` is the
//! only configuration the binary uses; tests build variants of it.

use std::ops::Range;
use std::time::Duration;

use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Play area size in pixels.
    pub width: i32,
    pub height: i32,
    /// Vertical clamp for the gun and the balloon (inclusive).
    pub min_y: i32,
    pub max_y: i32,
    pub player_x: i32,
    pub balloon_x: i32,
    /// Starting y for both the gun and the balloon.
    pub initial_y: i32,
    /// Pixels per frame for vertical movement.
    pub move_speed: i32,
    /// Pixels per frame for bullets; negative travels left.
    pub bullet_speed: i32,
    /// Bullet spawn point relative to the gun.
    pub bullet_offset: (i32, i32),
    pub hit_radius: i32,
    /// Balloon direction cooldown, milliseconds, half-open.
    pub cooldown_ms: Range<u64>,
    pub fps: u32,
    /// Frames a movement key stays held without a fresh press or repeat,
    /// once the terminal has started auto-repeating it.  `None` when the
    /// terminal reports key releases.
    pub hold_window_frames: Option<u64>,
    /// Frames a freshly pressed key stays held before its first repeat.
    /// Covers the keyboard's repeat delay (up to ~660 ms).
    pub first_hold_frames: u64,
    /// Minimum frames between shots.  `None` when the terminal reports key
    /// releases, since auto-repeat then never arrives as a press.
    pub fire_cooldown_frames: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 500,
            height: 300,
            min_y: 0,
            max_y: 268,
            player_x: 468,
            balloon_x: 5,
            initial_y: 138,
            move_speed: 5,
            bullet_speed: -50,
            bullet_offset: (-16, 5),
            hit_radius: 20,
            cooldown_ms: 500..3000,
            fps: 30,
            hold_window_frames: Some(4),
            first_hold_frames: 20,
            fire_cooldown_frames: Some(8),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidConfig("play area must be non-empty"));
        }
        if self.min_y > self.max_y {
            return Err(GameError::InvalidConfig("min_y exceeds max_y"));
        }
        if !(self.min_y..=self.max_y).contains(&self.initial_y) {
            return Err(GameError::InvalidConfig("initial_y is outside the clamp range"));
        }
        if self.bullet_speed >= 0 {
            return Err(GameError::InvalidConfig("bullets must travel left"));
        }
        if self.cooldown_ms.is_empty() {
            return Err(GameError::InvalidConfig("cooldown range is empty"));
        }
        if matches!(self.hold_window_frames, Some(w) if w > self.first_hold_frames) {
            return Err(GameError::InvalidConfig(
                "first_hold_frames is shorter than the hold window",
            ));
        }
        if self.fps == 0 {
            return Err(GameError::InvalidConfig("fps must be positive"));
        }
        Ok(())
    }

    /// Wall-clock budget of one frame.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
