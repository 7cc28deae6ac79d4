//! Keyboard mapping: terminal key events to game transitions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::{close, press, release};
use crate::entities::{Control, GameState};

pub fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Up => Some(Control::MoveUp),
        KeyCode::Down => Some(Control::MoveDown),
        KeyCode::Char(' ') => Some(Control::Fire),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Control::Quit),
        _ => None,
    }
}

/// Apply one key event.  Ctrl+C closes the session; unmapped keys change
/// nothing.
pub fn apply_key(state: &GameState, key: KeyEvent) -> GameState {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return close(state);
    }
    let Some(control) = control_for(key.code) else {
        return state.clone();
    };
    match key.kind {
        KeyEventKind::Press => press(state, control, false),
        KeyEventKind::Repeat => press(state, control, true),
        KeyEventKind::Release => release(state, control),
    }
}
