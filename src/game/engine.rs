use std::collections::VecDeque;
use std::time::Duration;

use super::{
    action::{Direction, GameOverItem, MenuAction, MenuItem},
    collision,
    config::{Difficulty, GameConfig},
    error::GameError,
    food::FoodSpawner,
    highscore::HighScoreStore,
    score::ScoreTracker,
    state::{CollisionType, Field, Food, FoodKind, GameState, Position, Snake},
};

/// Something that happened during a tick or a menu action.
///
/// Drained by the front-end for sound and session statistics; nothing here
/// feeds back into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten { kind: FoodKind, points: u32 },
    SpeedUp { tick_rate: u32 },
    Collision(CollisionType),
    StateChanged { from: GameState, to: GameState },
    NewHighScore { score: u32, rank: usize },
    /// The snake filled every cell; the round ended without a crash
    FieldCleared,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepInfo {
    /// Kind of food eaten this step
    pub ate_food: Option<FoodKind>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepResult {
    /// Whether the step ended the round
    pub terminated: bool,
    pub info: StepInfo,
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub field: Field,
    pub segments: &'a VecDeque<Position>,
    pub direction: Direction,
    pub food: Food,
    pub score: u32,
    pub length: usize,
    pub state: GameState,
    pub difficulty: Difficulty,
    pub tick_rate: u32,
    pub high_scores: &'a [u32],
    /// Highlighted entry of the menu or game-over screen
    pub cursor: usize,
    pub last_collision: Option<CollisionType>,
}

/// Owns every piece of mutable game state and drives the state machine
pub struct GameEngine {
    field: Field,
    state: GameState,
    difficulty: Difficulty,
    snake: Snake,
    food: Food,
    score: ScoreTracker,
    spawner: FoodSpawner,
    high_scores: HighScoreStore,
    cursor: usize,
    last_collision: Option<CollisionType>,
    events: Vec<GameEvent>,
    quit_requested: bool,
}

impl GameEngine {
    /// Create an engine sitting on the main menu
    pub fn new(config: &GameConfig, high_scores: HighScoreStore) -> Result<Self, GameError> {
        config.validate()?;

        let field = config.field();
        let snake = Snake::centered(&field).with_pending_capacity(config.input_buffer_depth);
        let mut spawner = FoodSpawner::new(config.seed);
        let food = spawner.spawn(&snake, &field)?;

        Ok(Self {
            field,
            state: GameState::Menu,
            difficulty: config.difficulty,
            snake,
            food,
            score: ScoreTracker::new(config.difficulty.tick_rate()),
            spawner,
            high_scores,
            cursor: 0,
            last_collision: None,
            events: Vec::new(),
            quit_requested: false,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Test hook for staging a board. Bypasses the round's invariants.
    #[doc(hidden)]
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    /// Test hook for placing food. The position is not checked.
    #[doc(hidden)]
    pub fn set_food(&mut self, food: Food) {
        self.food = food;
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn tick_rate(&self) -> u32 {
        self.score.tick_rate()
    }

    /// Time between two ticks at the current rate
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate().max(1)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn high_scores(&self) -> &HighScoreStore {
        &self.high_scores
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            field: self.field,
            segments: self.snake.segments(),
            direction: self.snake.direction(),
            food: self.food,
            score: self.score.score(),
            length: self.snake.len(),
            state: self.state,
            difficulty: self.difficulty,
            tick_rate: self.score.tick_rate(),
            high_scores: self.high_scores.scores(),
            cursor: self.cursor,
            last_collision: self.last_collision,
        }
    }

    /// Change the difficulty; only allowed on the main menu
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.state != GameState::Menu {
            return false;
        }
        self.difficulty = difficulty;
        self.score.reset(difficulty.tick_rate());
        tracing::info!(difficulty = difficulty.label(), "difficulty changed");
        true
    }

    /// Buffer a direction change for the next ticks. Ignored outside a round.
    pub fn submit_direction(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.snake.submit(direction)
    }

    pub fn submit_menu_action(&mut self, action: MenuAction) -> Result<(), GameError> {
        match (self.state, action) {
            (GameState::Menu, MenuAction::Up) => self.move_cursor(-1, MenuItem::ALL.len()),
            (GameState::Menu, MenuAction::Down) => self.move_cursor(1, MenuItem::ALL.len()),
            (GameState::Menu, MenuAction::Select) => match MenuItem::ALL[self.cursor] {
                MenuItem::Start => self.start_round()?,
                MenuItem::Difficulty => {
                    self.set_difficulty(self.difficulty.next());
                }
                MenuItem::Quit => {
                    tracing::info!("quit requested");
                    self.quit_requested = true;
                }
            },
            (GameState::Menu, MenuAction::Cancel | MenuAction::Pause) => {}

            (GameState::Playing, MenuAction::Pause) => self.set_state(GameState::Paused),
            (GameState::Playing, MenuAction::Cancel) => {
                tracing::info!(score = self.score(), "round abandoned");
                self.enter_menu();
            }
            (GameState::Playing, MenuAction::Up | MenuAction::Down | MenuAction::Select) => {}

            (GameState::Paused, MenuAction::Pause | MenuAction::Select) => {
                self.set_state(GameState::Playing)
            }
            (GameState::Paused, MenuAction::Cancel) => self.enter_menu(),
            (GameState::Paused, MenuAction::Up | MenuAction::Down) => {}

            (GameState::GameOver, MenuAction::Up) => {
                self.move_cursor(-1, GameOverItem::ALL.len())
            }
            (GameState::GameOver, MenuAction::Down) => {
                self.move_cursor(1, GameOverItem::ALL.len())
            }
            (GameState::GameOver, MenuAction::Select) => match GameOverItem::ALL[self.cursor] {
                GameOverItem::PlayAgain => self.start_round()?,
                GameOverItem::MainMenu => self.enter_menu(),
            },
            (GameState::GameOver, MenuAction::Cancel) => self.enter_menu(),
            (GameState::GameOver, MenuAction::Pause) => {}
        }
        Ok(())
    }

    /// Execute one step of the game.
    ///
    /// Does nothing unless a round is running. When the snake fills the field
    /// the round is ended and `SpawnExhausted` is returned.
    pub fn tick(&mut self) -> Result<StepResult, GameError> {
        if self.state != GameState::Playing {
            return Ok(StepResult::default());
        }

        let direction = self
            .snake
            .next_direction()
            .unwrap_or(self.snake.direction());
        let food = self.food;
        let grew = self.snake.advance(direction, food.position);

        let mut result = StepResult::default();

        if grew {
            let points = food.kind.points();
            result.info.ate_food = Some(food.kind);
            self.events.push(GameEvent::FoodEaten {
                kind: food.kind,
                points,
            });

            if let Some(tick_rate) = self.score.award(points) {
                tracing::debug!(tick_rate, score = self.score(), "speed up");
                self.events.push(GameEvent::SpeedUp { tick_rate });
            }

            match self.spawner.spawn(&self.snake, &self.field) {
                Ok(next) => self.food = next,
                Err(GameError::SpawnExhausted) => {
                    tracing::info!(score = self.score(), "field cleared");
                    self.events.push(GameEvent::FieldCleared);
                    self.finish_round();
                    return Err(GameError::SpawnExhausted);
                }
                Err(err) => return Err(err),
            }
        }

        if let Some(collision_type) = collision::detect(&self.snake, &self.field) {
            tracing::info!(?collision_type, score = self.score(), "snake crashed");
            self.last_collision = Some(collision_type);
            self.events.push(GameEvent::Collision(collision_type));
            self.finish_round();

            result.terminated = true;
            result.info.collision_type = Some(collision_type);
        }

        Ok(result)
    }

    fn start_round(&mut self) -> Result<(), GameError> {
        self.snake.reset(&self.field);
        self.score.reset(self.difficulty.tick_rate());
        self.food = self.spawner.spawn(&self.snake, &self.field)?;
        self.last_collision = None;
        self.cursor = 0;
        self.set_state(GameState::Playing);
        Ok(())
    }

    /// Commit the score and show the game-over screen
    fn finish_round(&mut self) {
        let score = self.score();
        match self.high_scores.commit(score) {
            Ok(Some(rank)) => {
                tracing::info!(score, rank, "new high score");
                self.events.push(GameEvent::NewHighScore { score, rank });
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "failed to save high scores"),
        }
        self.cursor = 0;
        self.set_state(GameState::GameOver);
    }

    fn enter_menu(&mut self) {
        self.cursor = 0;
        self.score.reset(self.difficulty.tick_rate());
        self.set_state(GameState::Menu);
    }

    fn move_cursor(&mut self, step: isize, len: usize) {
        let len = len as isize;
        self.cursor = (self.cursor as isize + step).rem_euclid(len) as usize;
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        tracing::info!(?from, ?to, "state changed");
        self.state = to;
        self.events.push(GameEvent::StateChanged { from, to });
    }

    #[cfg(test)]
    pub(crate) fn score_mut(&mut self) -> &mut ScoreTracker {
        &mut self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::new(&GameConfig::small(), HighScoreStore::in_memory()).unwrap()
    }

    fn playing() -> GameEngine {
        let mut engine = engine();
        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert_eq!(engine.state(), GameState::Playing);
        engine
    }

    /// Food tucked into a corner, out of the snake's way
    fn park_food(engine: &mut GameEngine) {
        engine.set_food(Food::new(Position::new(20, 160), FoodKind::Normal));
    }

    #[test]
    fn test_starts_on_menu() {
        let engine = engine();
        assert_eq!(engine.state(), GameState::Menu);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().len(), 3);
        assert_eq!(engine.tick_rate(), 15);
    }

    #[test]
    fn test_tick_outside_round_is_noop() {
        let mut engine = engine();
        let head = engine.snake().head();
        let result = engine.tick().unwrap();
        assert_eq!(result, StepResult::default());
        assert_eq!(engine.snake().head(), head);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = playing();
        park_food(&mut engine);
        let head = engine.snake().head();

        let result = engine.tick().unwrap();

        assert!(!result.terminated);
        assert_eq!(result.info.ate_food, None);
        assert_eq!(engine.snake().head(), head.moved_by(20, 0));
        assert_eq!(engine.snake().len(), 3);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = playing();
        let ahead = engine.snake().head().moved_by(20, 0);
        engine.set_food(Food::new(ahead, FoodKind::Bonus));

        let result = engine.tick().unwrap();

        assert_eq!(result.info.ate_food, Some(FoodKind::Bonus));
        assert_eq!(engine.score(), 20);
        assert_eq!(engine.snake().len(), 4);
        assert!(!engine.snake().contains(engine.food().position));
        assert!(
            engine
                .drain_events()
                .contains(&GameEvent::FoodEaten {
                    kind: FoodKind::Bonus,
                    points: 20
                })
        );
    }

    #[test]
    fn test_one_buffered_turn_per_tick() {
        let mut engine = playing();
        park_food(&mut engine);
        let head = engine.snake().head();
        assert!(engine.submit_direction(Direction::Up));
        assert!(engine.submit_direction(Direction::Left));

        engine.tick().unwrap();
        assert_eq!(engine.snake().direction(), Direction::Up);
        assert_eq!(engine.snake().head(), head.moved_by(0, -20));

        engine.tick().unwrap();
        assert_eq!(engine.snake().direction(), Direction::Left);
        assert_eq!(engine.snake().head(), head.moved_by(-20, -20));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = playing();
        park_food(&mut engine);
        engine.submit_direction(Direction::Left);

        engine.tick().unwrap();

        assert_eq!(engine.snake().direction(), Direction::Right);
    }

    #[test]
    fn test_directions_ignored_outside_round() {
        let mut engine = engine();
        assert!(!engine.submit_direction(Direction::Up));
        assert!(engine.snake().pending().is_empty());
    }

    #[test]
    fn test_wall_collision_ends_round() {
        let mut engine = playing();
        park_food(&mut engine);
        // head starts at column 5 of a 10 wide field, wall at column 9
        for _ in 0..3 {
            assert!(!engine.tick().unwrap().terminated);
        }
        let result = engine.tick().unwrap();

        assert!(result.terminated);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(engine.state(), GameState::GameOver);
        assert_eq!(engine.high_scores().scores(), &[0]);
    }

    #[test]
    fn test_self_collision_ends_round() {
        let mut engine = playing();
        park_food(&mut engine);
        // five segments heading right; down, left, up runs the head into its own body
        *engine.snake_mut() = Snake::new(Position::new(100, 100), Direction::Right, 5, 20);
        engine.submit_direction(Direction::Down);
        engine.submit_direction(Direction::Left);
        engine.submit_direction(Direction::Up);

        engine.tick().unwrap();
        engine.tick().unwrap();
        let result = engine.tick().unwrap();

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(engine.state(), GameState::GameOver);
    }

    #[test]
    fn test_speed_up_when_score_lands_on_fifty() {
        let mut engine = playing();
        engine.score_mut().set_score(40);
        let ahead = engine.snake().head().moved_by(20, 0);
        engine.set_food(Food::new(ahead, FoodKind::Normal));

        engine.tick().unwrap();

        assert_eq!(engine.score(), 50);
        assert_eq!(engine.tick_rate(), 17);
        assert!(
            engine
                .drain_events()
                .contains(&GameEvent::SpeedUp { tick_rate: 17 })
        );
    }

    #[test]
    fn test_tick_interval_follows_rate() {
        let engine = engine();
        assert_eq!(engine.tick_interval(), Duration::from_secs(1) / 15);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut engine = playing();
        park_food(&mut engine);
        engine.submit_menu_action(MenuAction::Pause).unwrap();
        assert_eq!(engine.state(), GameState::Paused);

        let head = engine.snake().head();
        engine.tick().unwrap();
        assert_eq!(engine.snake().head(), head);

        engine.submit_menu_action(MenuAction::Pause).unwrap();
        assert_eq!(engine.state(), GameState::Playing);
    }

    #[test]
    fn test_cancel_discards_round_without_commit() {
        let mut engine = playing();
        let ahead = engine.snake().head().moved_by(20, 0);
        engine.set_food(Food::new(ahead, FoodKind::Normal));
        engine.tick().unwrap();

        engine.submit_menu_action(MenuAction::Cancel).unwrap();

        assert_eq!(engine.state(), GameState::Menu);
        assert!(engine.high_scores().scores().is_empty());
    }

    #[test]
    fn test_difficulty_cycles_from_menu_only() {
        let mut engine = engine();
        engine.submit_menu_action(MenuAction::Down).unwrap();
        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert_eq!(engine.difficulty(), Difficulty::Easy);

        engine.submit_menu_action(MenuAction::Up).unwrap();
        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!(engine.tick_rate(), 10);
        assert!(!engine.set_difficulty(Difficulty::Hard));
        assert_eq!(engine.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_quit_from_menu() {
        let mut engine = engine();
        engine.submit_menu_action(MenuAction::Up).unwrap();
        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert!(engine.should_quit());
    }

    #[test]
    fn test_game_over_menu() {
        let mut engine = playing();
        park_food(&mut engine);
        while engine.state() == GameState::Playing {
            engine.tick().unwrap();
        }

        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().len(), 3);

        park_food(&mut engine);
        while engine.state() == GameState::Playing {
            engine.tick().unwrap();
        }
        engine.submit_menu_action(MenuAction::Down).unwrap();
        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert_eq!(engine.state(), GameState::Menu);
    }

    #[test]
    fn test_filling_the_field_ends_round() {
        let config = GameConfig {
            high_score_path: None,
            ..GameConfig::new(140, 60, 20)
        };
        let mut engine = GameEngine::new(&config, HighScoreStore::in_memory()).unwrap();
        engine.submit_menu_action(MenuAction::Select).unwrap();
        // 5x1 playable strip: the snake covers columns 1 to 3, food fills 4 then 5
        engine.set_food(Food::new(Position::new(80, 20), FoodKind::Normal));
        engine.tick().unwrap();
        engine.set_food(Food::new(Position::new(100, 20), FoodKind::Normal));

        assert!(matches!(engine.tick(), Err(GameError::SpawnExhausted)));
        assert_eq!(engine.state(), GameState::GameOver);
        assert_eq!(engine.high_scores().scores(), &[20]);
        assert!(engine.drain_events().contains(&GameEvent::FieldCleared));
    }

    #[test]
    fn test_repeated_score_is_not_announced() {
        let mut engine = playing();
        park_food(&mut engine);
        while engine.state() == GameState::Playing {
            engine.tick().unwrap();
        }
        assert!(
            engine
                .drain_events()
                .contains(&GameEvent::NewHighScore { score: 0, rank: 0 })
        );

        engine.submit_menu_action(MenuAction::Select).unwrap();
        park_food(&mut engine);
        while engine.state() == GameState::Playing {
            engine.tick().unwrap();
        }
        assert!(
            !engine
                .drain_events()
                .iter()
                .any(|event| matches!(event, GameEvent::NewHighScore { .. }))
        );
        assert_eq!(engine.high_scores().scores(), &[0]);
    }

    #[test]
    fn test_state_change_events() {
        let mut engine = engine();
        engine.submit_menu_action(MenuAction::Select).unwrap();
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::StateChanged {
                from: GameState::Menu,
                to: GameState::Playing
            }]
        );
        assert!(engine.drain_events().is_empty());
    }
}
