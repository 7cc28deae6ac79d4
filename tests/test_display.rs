use std::io::{self, Write};
use std::path::Path;

use balloon_shooter::compute::{init_state, press};
use balloon_shooter::config::GameConfig;
use balloon_shooter::display::*;
use balloon_shooter::entities::Control;
use balloon_shooter::GameError;

fn sprites() -> Sprites {
    Sprites::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
        .expect("bundled sprites load")
}

fn rendered(misses: u32, fire: bool) -> String {
    let mut state = init_state(GameConfig::default(), 5, 0).unwrap();
    state.misses = misses;
    if fire {
        state = press(&state, Control::Fire, false);
    }
    let mut buf = Vec::new();
    render(&mut buf, &state, &sprites()).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn play_area_fits_fifty_by_fifteen() {
    let config = GameConfig::default();
    assert_eq!(grid_size(&config), (50, 15));
    assert_eq!(required_size(&config), (52, 17));
}

#[test]
fn small_terminal_is_rejected() {
    let config = GameConfig::default();
    assert!(check_terminal_size(&config, (80, 24)).is_ok());
    assert!(check_terminal_size(&config, (52, 17)).is_ok());
    assert!(matches!(
        check_terminal_size(&config, (51, 24)),
        Err(GameError::TerminalTooSmall { needed: (52, 17), actual: (51, 24) })
    ));
}

#[test]
fn frame_shows_misses_and_quit_hint() {
    let frame = rendered(3, false);
    assert!(frame.contains("Misses: 3"));
    assert!(frame.contains("Press Q to quit"));
}

#[test]
fn frame_draws_sprites() {
    let sprites = sprites();
    let frame = rendered(0, true);
    for sprite in [&sprites.gun, &sprites.balloon, &sprites.bullet] {
        assert!(frame.contains(sprite.rows()[0].as_str()));
    }
}

#[test]
fn missing_sprite_dir_is_fatal() {
    let err = Sprites::load(Path::new("no/such/dir")).unwrap_err();
    assert!(matches!(err, GameError::Sprite { .. }));
}

#[test]
fn blank_sprite_is_rejected() {
    let err = Sprite::parse(Path::new("blank.txt"), "  \n\n").unwrap_err();
    assert!(matches!(err, GameError::EmptySprite(_)));
}

#[test]
fn sprite_keeps_rows_and_trims_trailing_space() {
    let sprite = Sprite::parse(Path::new("b.txt"), "(@)  \n |\n").unwrap();
    assert_eq!(sprite.rows(), &["(@)".to_string(), " |".to_string()]);
}

/// A writer whose terminal has gone away.
struct ClosedTerminal;

impl Write for ClosedTerminal {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
    }
}

#[test]
fn render_reports_write_failure_as_io_error() {
    let state = init_state(GameConfig::default(), 5, 0).unwrap();
    let err = render(&mut ClosedTerminal, &state, &sprites()).unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}
