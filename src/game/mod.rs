//! Core simulation for the grid snake game
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies beyond the high-score file.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod highscore;
pub mod score;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, GameOverItem, MenuAction, MenuItem};
pub use config::{Difficulty, GameConfig};
pub use engine::{GameEngine, GameEvent, Snapshot, StepInfo, StepResult};
pub use error::GameError;
pub use food::FoodSpawner;
pub use highscore::HighScoreStore;
pub use score::ScoreTracker;
pub use state::{CollisionType, Field, Food, FoodKind, GameState, Position, Snake};
