//! Key bindings.
//!
//! | Command      | Keys                    |
//! |--------------|-------------------------|
//! | move left    | Left, A, H              |
//! | move right   | Right, D, L             |
//! | soft drop    | Down, S, J              |
//! | rotate       | Up, W, K                |
//! | hard drop    | Space                   |
//! | pause/resume | P, Esc                  |
//! | start        | Enter, N                |
//! | quit         | Q, Ctrl-C               |
//! | key help     | F1, ?                   |

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key to the engine command it triggers, if any.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Command::Rotate),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Esc => Some(Command::TogglePause),
        KeyCode::Enter | KeyCode::Char('n') => Some(Command::Start),
        _ => None,
    }
}

/// Press or auto-repeat; releases are ignored.
pub fn is_press(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// F1 or `?` shows or hides the key list. The view owns it, not the engine.
pub fn is_help_key(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::F(1) | KeyCode::Char('?'))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
