//! Key mapping from terminal events to racket controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A logical control the player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Left,
    Right,
    Confirm,
    Quit,
}

impl Binding {
    pub fn index(&self) -> usize {
        match self {
            Binding::Left => 0,
            Binding::Right => 1,
            Binding::Confirm => 2,
            Binding::Quit => 3,
        }
    }
}

/// Map a key to the control it drives.
pub fn binding_for(key: KeyEvent) -> Option<Binding> {
    if should_quit(key) {
        return Some(Binding::Quit);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(Binding::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(Binding::Right)
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(Binding::Confirm),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
