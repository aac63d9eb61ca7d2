use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Overwrite the pending heading
    Steer(Direction),
    Restart,
    Quit,
    None,
}

/// Maps a key press onto a [`KeyAction`]. Arrows and WASD steer, in either case.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match code {
        KeyCode::Up | KeyCode::Char('w') => KeyAction::Steer(Direction::North),
        KeyCode::Down | KeyCode::Char('s') => KeyAction::Steer(Direction::South),
        KeyCode::Left | KeyCode::Char('a') => KeyAction::Steer(Direction::West),
        KeyCode::Right | KeyCode::Char('d') => KeyAction::Steer(Direction::East),
        KeyCode::Char('r') => KeyAction::Restart,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
