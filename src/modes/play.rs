use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::{GameConfig, GameEngine, GameError, GameEvent, HighScoreStore};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Rings the terminal bell for the events that would play a sound
pub struct Bell {
    enabled: bool,
}

impl Bell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn wants(&self, event: &GameEvent) -> bool {
        self.enabled
            && matches!(
                event,
                GameEvent::FoodEaten { .. } | GameEvent::Collision(_) | GameEvent::FieldCleared
            )
    }

    /// Write failures are ignored; sound never affects the game
    pub fn play(&self, event: &GameEvent) {
        if self.wants(event) {
            let mut out = stderr();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

/// Interactive terminal session
pub struct PlayMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    bell: Bell,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let high_scores = match &config.high_score_path {
            Some(path) => HighScoreStore::load(path)
                .with_context(|| format!("Failed to load high scores from {:?}", path))?,
            None => HighScoreStore::in_memory(),
        };
        let engine = GameEngine::new(config, high_scores).context("Failed to create game")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            bell: Bell::new(config.sound),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Tick period follows the engine's rate, which changes with score
        let mut tick_rate = self.engine.tick_rate();
        let mut tick_timer = fixed_rate_timer(self.engine.tick_interval(), false);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine.snapshot(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.engine.tick_rate() != tick_rate {
                tick_rate = self.engine.tick_rate();
                tick_timer = tick_timer_for(&self.engine);
            }

            if self.should_quit || self.engine.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self
                .input_handler
                .handle_key_event(key)
                .for_state(self.engine.state());

            match action {
                KeyAction::Steer(direction) => {
                    self.engine.submit_direction(direction);
                }
                KeyAction::Menu(menu_action) => {
                    self.engine
                        .submit_menu_action(menu_action)
                        .context("Failed to start a round")?;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        self.dispatch_events();
        Ok(())
    }

    fn update_game(&mut self) {
        match self.engine.tick() {
            Ok(_) => {}
            Err(GameError::SpawnExhausted) => {
                tracing::info!(score = self.engine.score(), "snake filled the field");
            }
            Err(err) => tracing::error!(%err, "tick failed"),
        }
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.engine.drain_events() {
            self.metrics.on_event(&event);
            self.bell.play(&event);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn tick_timer_for(engine: &GameEngine) -> Interval {
    fixed_rate_timer(engine.tick_interval(), true)
}

/// Interval that skips missed ticks instead of bursting to catch up
fn fixed_rate_timer(period: Duration, delay_first: bool) -> Interval {
    let mut timer = if delay_first {
        interval_at(Instant::now() + period, period)
    } else {
        interval(period)
    };
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, FoodKind, GameState, MenuAction};

    fn config() -> GameConfig {
        GameConfig::small()
    }

    #[test]
    fn test_game_initialization() {
        let mode = PlayMode::new(&config()).unwrap();
        assert_eq!(mode.engine.state(), GameState::Menu);
        assert_eq!(mode.engine.score(), 0);
    }

    #[test]
    fn test_corrupted_high_scores_fail_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        std::fs::write(&path, "10\nten\n").unwrap();
        let config = GameConfig {
            high_score_path: Some(path),
            ..config()
        };

        let err = PlayMode::new(&config).err().unwrap();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_round_updates_metrics() {
        let mut mode = PlayMode::new(&config()).unwrap();
        mode.engine.submit_menu_action(MenuAction::Select).unwrap();
        mode.dispatch_events();

        while mode.engine.state() == GameState::Playing {
            mode.update_game();
        }
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_bell_filters_events() {
        let bell = Bell::new(true);
        assert!(bell.wants(&GameEvent::Collision(CollisionType::Wall)));
        assert!(bell.wants(&GameEvent::FoodEaten {
            kind: FoodKind::Normal,
            points: 10
        }));
        assert!(!bell.wants(&GameEvent::SpeedUp { tick_rate: 17 }));
        assert!(!Bell::new(false).wants(&GameEvent::Collision(CollisionType::Wall)));
    }

    #[tokio::test]
    async fn test_tick_timer_waits_one_period() {
        let period = Duration::from_millis(20);
        let started = Instant::now();
        let mut timer = fixed_rate_timer(period, true);
        timer.tick().await;
        assert!(started.elapsed() >= period);
    }
}
