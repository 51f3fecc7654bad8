use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::GameError;
use super::state::Field;

/// Named difficulty tier selecting the base tick rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Base ticks per second
    pub fn tick_rate(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }

    /// Next tier in the menu cycle, wrapping Hard back to Easy
    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the field in pixels
    pub field_width: i32,
    /// Height of the field in pixels
    pub field_height: i32,
    /// Side of one grid cell in pixels; also the wall thickness
    pub cell_size: i32,
    /// Difficulty selected when the menu first opens
    pub difficulty: Difficulty,
    /// How many direction changes may wait for the next tick
    pub input_buffer_depth: usize,
    /// Where the top-5 list is kept; `None` keeps it in memory only
    pub high_score_path: Option<PathBuf>,
    /// Seed for food placement, random when absent
    pub seed: Option<u64>,
    /// Ring the terminal bell on food and crashes
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800,
            field_height: 600,
            cell_size: 20,
            difficulty: Difficulty::Medium,
            input_buffer_depth: 3,
            high_score_path: Some(PathBuf::from("highscores.txt")),
            seed: None,
            sound: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field size
    pub fn new(field_width: i32, field_height: i32, cell_size: i32) -> Self {
        Self {
            field_width,
            field_height,
            cell_size,
            ..Default::default()
        }
    }

    /// Small in-memory field for tests: 10x10 cells of 20px, fixed seed
    pub fn small() -> Self {
        Self {
            high_score_path: None,
            seed: Some(7),
            sound: false,
            ..Self::new(200, 200, 20)
        }
    }

    /// Read a JSON configuration file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        Ok(config)
    }

    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height, self.cell_size)
    }

    /// Check that the field is grid aligned and has room to play
    pub fn validate(&self) -> Result<(), GameError> {
        if self.cell_size <= 0 {
            return Err(GameError::InvalidField(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.field_width % self.cell_size != 0 || self.field_height % self.cell_size != 0 {
            return Err(GameError::InvalidField(format!(
                "{}x{} is not a multiple of the {}px cell",
                self.field_width, self.field_height, self.cell_size
            )));
        }
        let field = self.field();
        // the starting snake trails two cells left of the centre
        let (cols, rows) = field.playable_cells();
        if cols < 5 || rows < 1 {
            return Err(GameError::InvalidField(format!(
                "playable area of {}x{} cells is too small",
                cols, rows
            )));
        }
        if self.input_buffer_depth == 0 {
            return Err(GameError::InvalidField(
                "input buffer depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
