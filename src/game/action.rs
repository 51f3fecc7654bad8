use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        *self == other.opposite()
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector (dx, dy) for this direction, y growing downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Menu navigation produced by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Select,
    /// Escape: leave the current screen
    Cancel,
    /// Toggle pause while a round is running
    Pause,
}

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Difficulty,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Start, MenuItem::Difficulty, MenuItem::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Difficulty => "Difficulty",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Entries of the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverItem {
    PlayAgain,
    MainMenu,
}

impl GameOverItem {
    pub const ALL: [GameOverItem; 2] = [GameOverItem::PlayAgain, GameOverItem::MainMenu];

    pub fn label(&self) -> &'static str {
        match self {
            GameOverItem::PlayAgain => "Play again",
            GameOverItem::MainMenu => "Main menu",
        }
    }
}
