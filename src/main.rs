use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;

use balloon_shooter::compute::{init_state, tick};
use balloon_shooter::config::GameConfig;
use balloon_shooter::display::{self, Sprites};
use balloon_shooter::entities::{GameState, GameStatus};
use balloon_shooter::input::apply_key;

const ASSET_DIR: &str = "assets";

// ── Input ─────────────────────────────────────────────────────────────────────

/// Drain every pending terminal event (non-blocking) into the state, in
/// arrival order.
fn drain_input(state: &GameState) -> std::io::Result<GameState> {
    let mut state = state.clone();
    while state.status == GameStatus::Running && event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            state = apply_key(&state, key);
        }
    }
    Ok(state)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until the session terminates.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    sprites: &Sprites,
    clock: Instant,
) -> balloon_shooter::Result<GameState> {
    let budget = state.config.frame_budget();

    loop {
        let frame_start = Instant::now();

        state = drain_input(&state)?;
        if state.status != GameStatus::Running {
            return Ok(state);
        }

        state = tick(&state, clock.elapsed().as_millis() as u64);
        if state.status != GameStatus::Running {
            return Ok(state);
        }

        display::render(out, &state, sprites)?;

        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let sprites = Sprites::load(Path::new(ASSET_DIR)).context("loading sprites")?;
    let mut config = GameConfig::default();
    display::check_terminal_size(&config, terminal::size()?)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(display::TITLE))?;
    out.execute(cursor::Hide)?;

    // Key-release events make the hold window unnecessary; terminals without
    // them fall back to expiring quiet movement keys.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if keyboard_enhanced {
        config.hold_window_frames = None;
        config.fire_cooldown_frames = None;
    }

    let clock = Instant::now();
    let result = init_state(config, rand::random(), 0)
        .map_err(anyhow::Error::from)
        .and_then(|state| Ok(game_loop(&mut out, state, &sprites, clock)?));

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = result?;
    if let GameStatus::Terminated(reason) = state.status {
        info!("session over ({reason:?}) after {} frames, {} misses", state.frame, state.misses);
    }
    Ok(())
}
