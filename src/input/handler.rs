use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

/// What a key press means to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward a command to the engine
    Command(Command),
    /// Leave the game
    Quit,
    /// Key has no binding
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Command(Command::SetDirection(Direction::Up)),
            KeyCode::Down => KeyAction::Command(Command::SetDirection(Direction::Down)),
            KeyCode::Left => KeyAction::Command(Command::SetDirection(Direction::Left)),
            KeyCode::Right => KeyAction::Command(Command::SetDirection(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Command(Command::SetDirection(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Command(Command::SetDirection(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Command(Command::SetDirection(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Command(Command::SetDirection(Direction::Right))
            }

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Command(Command::TogglePause),
            KeyCode::Char(' ') => KeyAction::Command(Command::Reset),
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::Command(Command::ToggleSound),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
