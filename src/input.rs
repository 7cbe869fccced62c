//! Keyboard translation - terminal key events to abstract commands.
//!
//! This is the only place that knows about key codes. The simulation core
//! consumes [`Command`] values and has no dependency on any input
//! technology. Soft drop release handling (for terminals without key-release
//! events) is the runner's concern, not this mapping's.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Command;

/// Map a key press to a game command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
            Some(Command::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
            Some(Command::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
            Some(Command::SoftDropOn)
        }

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
            Some(Command::Rotate)
        }

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Command::Restart),

        _ => None,
    }
}

/// Map a key release. Only soft drop cares about releases.
pub fn map_key_release(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
            Some(Command::SoftDropOff)
        }
        _ => None,
    }
}

/// Whether a key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
