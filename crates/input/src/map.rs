//! Key mapping from terminal events to driver commands.

use crate::types::Command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A terminal event the game loop cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Command(Command),
    Quit,
    /// The terminal was resized to (columns, rows).
    Resize(u16, u16),
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::NudgeLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::NudgeRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Command::NudgeDown),

        // Rotation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(Command::Rotate),

        // Game control
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char('+') => Some(Command::SpeedUp),
        KeyCode::Char('-') => Some(Command::SpeedDown),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::NewSession),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map any terminal event. Key releases and repeats are dropped.
pub fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if should_quit(key) {
                Some(InputEvent::Quit)
            } else {
                handle_key_event(key).map(InputEvent::Command)
            }
        }
        Event::Resize(cols, rows) => Some(InputEvent::Resize(cols, rows)),
        _ => None,
    }
}
