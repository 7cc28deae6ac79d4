use balloon_shooter::compute::init_state;
use balloon_shooter::config::GameConfig;
use balloon_shooter::entities::*;
use balloon_shooter::input::*;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn make_state() -> GameState {
    init_state(GameConfig::default(), 42, 0).expect("default config is valid")
}

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
}

// ── control_for ───────────────────────────────────────────────────────────────

#[test]
fn mapped_keys() {
    assert_eq!(control_for(KeyCode::Up), Some(Control::MoveUp));
    assert_eq!(control_for(KeyCode::Down), Some(Control::MoveDown));
    assert_eq!(control_for(KeyCode::Char(' ')), Some(Control::Fire));
    assert_eq!(control_for(KeyCode::Char('q')), Some(Control::Quit));
    assert_eq!(control_for(KeyCode::Char('Q')), Some(Control::Quit));
    assert_eq!(control_for(KeyCode::Left), None);
    assert_eq!(control_for(KeyCode::Esc), None);
}

// ── apply_key ─────────────────────────────────────────────────────────────────

#[test]
fn q_quits_either_case() {
    for c in ['q', 'Q'] {
        let s = apply_key(&make_state(), key(KeyCode::Char(c), KeyEventKind::Press));
        assert_eq!(s.status, GameStatus::Terminated(EndReason::QuitKey));
    }
}

#[test]
fn ctrl_c_closes() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    let s = apply_key(&make_state(), ctrl_c);
    assert_eq!(s.status, GameStatus::Terminated(EndReason::Closed));
}

#[test]
fn plain_c_is_ignored() {
    let s = apply_key(&make_state(), key(KeyCode::Char('c'), KeyEventKind::Press));
    assert_eq!(s.status, GameStatus::Running);
}

#[test]
fn arrows_press_and_release() {
    let s = apply_key(&make_state(), key(KeyCode::Up, KeyEventKind::Press));
    assert_eq!(s.player.body.velocity, -5);
    assert!(s.held.up.is_some());

    let s = apply_key(&s, key(KeyCode::Up, KeyEventKind::Release));
    assert_eq!(s.player.body.velocity, 0);
    assert!(s.held.is_empty());

    let s = apply_key(&s, key(KeyCode::Down, KeyEventKind::Press));
    assert_eq!(s.player.body.velocity, 5);
}

#[test]
fn space_fires_on_press_only() {
    let s = apply_key(&make_state(), key(KeyCode::Char(' '), KeyEventKind::Press));
    assert_eq!(s.bullets.len(), 1);

    let s = apply_key(&make_state(), key(KeyCode::Char(' '), KeyEventKind::Repeat));
    assert!(s.bullets.is_empty());

    let s = apply_key(&make_state(), key(KeyCode::Char(' '), KeyEventKind::Release));
    assert!(s.bullets.is_empty());
}

#[test]
fn unknown_key_changes_nothing() {
    let before = make_state();
    let after = apply_key(&before, key(KeyCode::Char('x'), KeyEventKind::Press));
    assert_eq!(after.status, before.status);
    assert_eq!(after.player, before.player);
    assert_eq!(after.held, before.held);
    assert!(after.bullets.is_empty());
}
