use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::{FoodKind, GameEvent, GameState};

/// Per-session statistics built from drained game events
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub session_best: u32,
    pub games_played: u32,
    pub food_eaten: HashMap<FoodKind, u32>,
    round_score: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            session_best: 0,
            games_played: 0,
            food_eaten: HashMap::new(),
            round_score: 0,
            running: false,
        }
    }

    /// Refresh the round clock; frozen while paused or between rounds
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::StateChanged {
                from: GameState::Menu | GameState::GameOver,
                to: GameState::Playing,
            } => self.on_game_start(),
            GameEvent::StateChanged {
                from: GameState::Playing,
                to: GameState::Paused,
            } => self.running = false,
            GameEvent::StateChanged {
                from: GameState::Paused,
                to: GameState::Playing,
            } => {
                // resume without counting the paused time
                self.start_time = Instant::now() - self.elapsed_time;
                self.running = true;
            }
            GameEvent::StateChanged {
                to: GameState::Menu,
                ..
            } => self.running = false,
            GameEvent::StateChanged {
                to: GameState::GameOver,
                ..
            } => self.on_game_over(),
            GameEvent::FoodEaten { kind, points } => {
                *self.food_eaten.entry(kind).or_insert(0) += 1;
                self.round_score += points;
            }
            _ => {}
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.round_score = 0;
        self.food_eaten.clear();
        self.running = true;
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.running = false;
        self.games_played += 1;
        if self.round_score > self.session_best {
            self.session_best = self.round_score;
        }
    }

    pub fn eaten(&self, kind: FoodKind) -> u32 {
        self.food_eaten.get(&kind).copied().unwrap_or(0)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
