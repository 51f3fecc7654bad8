use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameState, MenuAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Menu(MenuAction),
    Quit,
    None,
}

impl KeyAction {
    /// Outside a round the vertical steering keys move the menu cursor
    pub fn for_state(self, state: GameState) -> KeyAction {
        match (self, state) {
            (KeyAction::Steer(_), GameState::Playing) => self,
            (KeyAction::Steer(Direction::Up), _) => KeyAction::Menu(MenuAction::Up),
            (KeyAction::Steer(Direction::Down), _) => KeyAction::Menu(MenuAction::Down),
            (KeyAction::Steer(_), _) => KeyAction::None,
            _ => self,
        }
    }
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
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            // Menus
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Menu(MenuAction::Select),
            KeyCode::Esc => KeyAction::Menu(MenuAction::Cancel),
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Menu(MenuAction::Pause),

            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
