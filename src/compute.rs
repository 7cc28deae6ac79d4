//! Pure game-logic functions.
//!
//! Every state transition takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  Randomness comes only from
//! the balloon's own seeded RNG, which travels inside the state, so a session
//! replays identically from the same seed and the same clock readings.

use std::ops::Range;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::entities::{
    Balloon, Bullet, Control, Direction, EndReason, GameState, GameStatus, HeldKey, HeldKeys,
    Player,
};
use crate::error::Result;

// ── Collision ─────────────────────────────────────────────────────────────────

/// True when the two points are strictly closer than `radius`.
///
/// Compares squared distances so the boundary is exact: points exactly
/// `radius` apart do not collide.
pub fn collides(a: (i32, i32), b: (i32, i32), radius: i32) -> bool {
    let dx = i64::from(a.0) - i64::from(b.0);
    let dy = i64::from(a.1) - i64::from(b.1);
    let r = i64::from(radius);
    dx * dx + dy * dy < r * r
}

// ── Balloon direction timer ───────────────────────────────────────────────────

/// Flips the balloon's rising flag once a randomly drawn cooldown has passed.
#[derive(Clone, Debug)]
pub struct DirectionTimer {
    rising: bool,
    last_toggle_ms: u64,
    cooldown_ms: u64,
    range: Range<u64>,
    rng: StdRng,
}

impl DirectionTimer {
    /// Start a timer at `now_ms` with its first cooldown drawn from `range`.
    /// `range` must be non-empty (`GameConfig::validate` guarantees it).
    pub fn new(seed: u64, now_ms: u64, range: Range<u64>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cooldown_ms = rng.gen_range(range.clone());
        DirectionTimer {
            rising: false,
            last_toggle_ms: now_ms,
            cooldown_ms,
            range,
            rng,
        }
    }

    /// Same as `new` but with a known first cooldown.
    pub fn with_cooldown(seed: u64, now_ms: u64, cooldown_ms: u64, range: Range<u64>) -> Self {
        DirectionTimer {
            rising: false,
            last_toggle_ms: now_ms,
            cooldown_ms,
            range,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Flip the rising flag if the cooldown has elapsed since the last flip,
    /// then draw the next cooldown.  Returns whether a flip happened.
    pub fn maybe_toggle(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_toggle_ms) < self.cooldown_ms {
            return false;
        }
        self.rising = !self.rising;
        self.last_toggle_ms = now_ms;
        self.cooldown_ms = self.rng.gen_range(self.range.clone());
        trace!(
            "balloon now {} for at least {}ms",
            if self.rising { "rising" } else { "falling" },
            self.cooldown_ms
        );
        true
    }

    pub fn rising(&self) -> bool {
        self.rising
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    pub fn last_toggle_ms(&self) -> u64 {
        self.last_toggle_ms
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session.  `seed` feeds the balloon's RNG; `now_ms` is the
/// session clock reading the first cooldown counts from.
pub fn init_state(config: GameConfig, seed: u64, now_ms: u64) -> Result<GameState> {
    config.validate()?;
    info!("new session, seed {seed}");
    let timer = DirectionTimer::new(seed, now_ms, config.cooldown_ms.clone());
    Ok(GameState {
        player: Player::new(&config),
        balloon: Balloon::new(&config, timer),
        bullets: Vec::new(),
        misses: 0,
        held: HeldKeys::default(),
        last_fire: None,
        status: GameStatus::Running,
        frame: 0,
        config,
    })
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn movement(control: Control) -> Option<Direction> {
    match control {
        Control::MoveUp => Some(Direction::Up),
        Control::MoveDown => Some(Direction::Down),
        Control::Fire | Control::Quit => None,
    }
}

/// Point the gun at whichever movement keys are still held.  With both held
/// the most recent press already set the velocity, so it is left alone.
fn resolve_movement(player: &mut Player, held: &HeldKeys) {
    match (held.up.is_some(), held.down.is_some()) {
        (false, false) => player.stop(),
        (true, false) => player.set_velocity(Direction::Up),
        (false, true) => player.set_velocity(Direction::Down),
        (true, true) => {}
    }
}

/// Holding Space on a terminal without release reporting arrives as a
/// stream of presses; keep those to the fire cooldown.
fn fire_cooling_down(state: &GameState) -> bool {
    match (state.config.fire_cooldown_frames, state.last_fire) {
        (Some(cooldown), Some(last)) => state.frame.saturating_sub(last) < cooldown,
        _ => false,
    }
}

/// A key went down (or, with `repeat`, is being held and auto-repeated).
/// Repeats keep a movement key alive but never fire or quit.  A press of a
/// movement key that is already held is the terminal auto-repeating it.
pub fn press(state: &GameState, control: Control, repeat: bool) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }
    let mut next = state.clone();

    if let Some(direction) = movement(control) {
        let slot = next.held.slot(direction);
        let was_held = slot.is_some();
        *slot = Some(HeldKey {
            last_seen: state.frame,
            repeating: was_held,
        });
        if !repeat || !was_held {
            next.player.set_velocity(direction);
            debug!("holding {direction:?}");
        }
        return next;
    }

    if repeat {
        return next;
    }
    match control {
        Control::Fire => {
            if fire_cooling_down(state) {
                return next;
            }
            let (dx, dy) = state.config.bullet_offset;
            let gun = state.player.body;
            next.bullets.push(Bullet::new(gun.x + dx, gun.y + dy, state.config.bullet_speed));
            next.last_fire = Some(state.frame);
            debug!("fired from y={}, {} bullets in flight", gun.y + dy, next.bullets.len());
        }
        Control::Quit => next.status = GameStatus::Terminated(EndReason::QuitKey),
        Control::MoveUp | Control::MoveDown => {}
    }
    next
}

/// A key came back up.  Only movement keys care: the gun stops once no
/// movement key is left held, or turns to the one still held.
pub fn release(state: &GameState, control: Control) -> GameState {
    let Some(direction) = movement(control) else {
        return state.clone();
    };
    if state.status != GameStatus::Running {
        return state.clone();
    }
    let mut next = state.clone();
    *next.held.slot(direction) = None;
    resolve_movement(&mut next.player, &next.held);
    debug!("released {direction:?}");
    next
}

/// The window was closed (Ctrl+C in the terminal).
pub fn close(state: &GameState) -> GameState {
    GameState {
        status: GameStatus::Terminated(EndReason::Closed),
        ..state.clone()
    }
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Drop movement keys that have gone quiet for too long.  Until the first
/// auto-repeat arrives the key gets `first_hold_frames`, afterwards only the
/// hold window.
fn expire_held_keys(state: &mut GameState) {
    let Some(window) = state.config.hold_window_frames else {
        return;
    };
    let first_hold = state.config.first_hold_frames;
    if state.held.is_empty() {
        return;
    }
    let frame = state.frame;
    let mut changed = false;
    for direction in [Direction::Up, Direction::Down] {
        let slot = state.held.slot(direction);
        let expired = slot.is_some_and(|key| {
            let limit = if key.repeating { window } else { first_hold };
            frame.saturating_sub(key.last_seen) > limit
        });
        if expired {
            *slot = None;
            changed = true;
        }
    }
    if changed {
        resolve_movement(&mut state.player, &state.held);
    }
}

/// Advance the simulation by one frame at session time `now_ms`.
///
/// Order: balloon steering, gun, balloon, then bullets.  A bullet that ends
/// the frame within hit range of the balloon terminates the session on this
/// frame; a bullet at or past the left edge is dropped and counted as a miss.
pub fn tick(state: &GameState, now_ms: u64) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }
    let mut next = state.clone();
    let cfg = &state.config;

    expire_held_keys(&mut next);

    // ── 1. Steer and move the gun and balloon ─────────────────────────────────
    next.balloon.steer(now_ms);
    next.player.advance(cfg.min_y, cfg.max_y);
    next.balloon.advance(cfg.min_y, cfg.max_y);

    // ── 2. Move bullets, collecting survivors into a fresh vector ────────────
    let target = next.balloon.body.position();
    let mut survivors = Vec::with_capacity(state.bullets.len());
    let mut misses = 0;
    let mut pending = state.bullets.iter();

    for bullet in pending.by_ref() {
        let mut bullet = *bullet;
        bullet.advance();
        if collides(target, bullet.body.position(), cfg.hit_radius) {
            survivors.push(bullet);
            next.status = GameStatus::Terminated(EndReason::BalloonHit);
            break;
        }
        if bullet.body.x <= 0 {
            misses += 1;
            debug!("miss at y={}", bullet.body.y);
        } else {
            survivors.push(bullet);
        }
    }
    // Bullets after a hit are left where they were.
    survivors.extend(pending.copied());

    next.bullets = survivors;
    next.misses = state.misses + misses;
    next.frame = state.frame + 1;
    next
}
