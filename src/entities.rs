//! Game entity types and their movement rules.
//!
//! Entities know how to move themselves and nothing else: spawning, scoring
//! and collisions live in `compute`.

use crate::compute::DirectionTimer;
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed per-frame velocity for a movement speed.  Screen y grows
    /// downward, so `Up` is negative.
    pub fn velocity(self, speed: i32) -> i32 {
        match self {
            Direction::Up => -speed,
            Direction::Down => speed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Ctrl+C: the terminal's stand-in for closing the window.
    Closed,
    QuitKey,
    BalloonHit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Terminated(EndReason),
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// A point that moves along one axis at a fixed per-frame velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub velocity: i32,
}

impl Body {
    pub fn at(x: i32, y: i32) -> Self {
        Body { x, y, velocity: 0 }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn advance_vertical(&mut self, min_y: i32, max_y: i32) {
        self.y = (self.y + self.velocity).clamp(min_y, max_y);
    }

    fn advance_horizontal(&mut self) {
        self.x += self.velocity;
    }
}

// ── Gun & balloon ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub body: Body,
    pub speed: i32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Player {
            body: Body::at(config.player_x, config.initial_y),
            speed: config.move_speed,
        }
    }

    pub fn set_velocity(&mut self, direction: Direction) {
        self.body.velocity = direction.velocity(self.speed);
    }

    pub fn stop(&mut self) {
        self.body.velocity = 0;
    }

    pub fn advance(&mut self, min_y: i32, max_y: i32) {
        self.body.advance_vertical(min_y, max_y);
    }
}

#[derive(Clone, Debug)]
pub struct Balloon {
    pub body: Body,
    pub speed: i32,
    pub timer: DirectionTimer,
}

impl Balloon {
    pub fn new(config: &GameConfig, timer: DirectionTimer) -> Self {
        Balloon {
            body: Body::at(config.balloon_x, config.initial_y),
            speed: config.move_speed,
            timer,
        }
    }

    pub fn set_velocity(&mut self, direction: Direction) {
        self.body.velocity = direction.velocity(self.speed);
    }

    pub fn stop(&mut self) {
        self.body.velocity = 0;
    }

    /// Give the direction timer its chance to flip, then point the balloon
    /// the way the rising flag says.
    pub fn steer(&mut self, now_ms: u64) {
        self.timer.maybe_toggle(now_ms);
        let direction = if self.timer.rising() {
            Direction::Up
        } else {
            Direction::Down
        };
        self.set_velocity(direction);
    }

    pub fn advance(&mut self, min_y: i32, max_y: i32) {
        self.body.advance_vertical(min_y, max_y);
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A bullet flies horizontally at constant velocity for its whole life and
/// is never clamped; leaving the play area is handled by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub body: Body,
}

impl Bullet {
    pub fn new(x: i32, y: i32, velocity: i32) -> Self {
        Bullet {
            body: Body { x, y, velocity },
        }
    }

    pub fn set_velocity(&mut self, velocity: i32) {
        self.body.velocity = velocity;
    }

    pub fn advance(&mut self) {
        self.body.advance_horizontal();
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    MoveUp,
    MoveDown,
    Fire,
    Quit,
}

/// A held movement key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldKey {
    /// Frame the key was last seen pressed or repeated.
    pub last_seen: u64,
    /// Whether the terminal has auto-repeated it since the first press.
    pub repeating: bool,
}

/// Movement keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: Option<HeldKey>,
    pub down: Option<HeldKey>,
}

impl HeldKeys {
    pub fn slot(&mut self, direction: Direction) -> &mut Option<HeldKey> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.up.is_none() && self.down.is_none()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One game session.  Cloneable so the per-frame update can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub balloon: Balloon,
    pub bullets: Vec<Bullet>,
    /// Bullets that left the play area without hitting the balloon.
    pub misses: u32,
    pub held: HeldKeys,
    /// Frame of the most recent shot.
    pub last_fire: Option<u64>,
    pub status: GameStatus,
    pub frame: u64,
}
