use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use std::collections::HashSet;

use crate::game::{CollisionType, FoodKind, GameOverItem, GameState, MenuItem, Position, Snapshot};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        match snapshot.state {
            GameState::Menu => {
                let menu = self.render_menu(snapshot);
                frame.render_widget(menu, centered(chunks[1], 40, 12));
            }
            GameState::Playing => {
                let grid = self.render_grid(snapshot);
                frame.render_widget(grid, chunks[1]);
            }
            GameState::Paused => {
                let grid = self.render_grid(snapshot);
                frame.render_widget(grid, chunks[1]);

                let area = centered(chunks[1], 30, 5);
                frame.render_widget(Clear, area);
                frame.render_widget(self.render_paused(), area);
            }
            GameState::GameOver => {
                let game_over = self.render_game_over(snapshot, metrics);
                frame.render_widget(game_over, centered(chunks[1], 44, 20));
            }
        }

        let controls = self.render_controls(snapshot.state);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let field = snapshot.field;
        let (cols, rows) = field.cells();
        let head = snapshot.segments.front().copied();
        let body: HashSet<Position> = snapshot.segments.iter().skip(1).copied().collect();

        let mut lines = Vec::with_capacity(rows as usize);
        for row in 0..rows {
            let mut spans = Vec::with_capacity(cols as usize);

            for col in 0..cols {
                let pos = Position::from_cell(col, row, field.cell_size);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food.position {
                    food_span(snapshot.food.kind)
                } else if !field.is_playable(pos) {
                    Span::styled("██", Style::default().fg(Color::Blue))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.length.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/s", snapshot.tick_rate),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Difficulty: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.difficulty.label(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (index, item) in MenuItem::ALL.iter().enumerate() {
            let label = match item {
                MenuItem::Difficulty => format!("{}: {}", item.label(), snapshot.difficulty.label()),
                _ => item.label().to_string(),
            };
            text.push(menu_line(label, index == snapshot.cursor));
        }

        if let Some(best) = snapshot.high_scores.first() {
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(best.to_string(), Style::default().fg(Color::White)),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let cause = match snapshot.last_collision {
            Some(CollisionType::Wall) => "You hit the wall",
            Some(CollisionType::SelfCollision) => "You bit yourself",
            None => "The field is full",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Eaten: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "{} normal, {} bonus, {} special",
                    metrics.eaten(FoodKind::Normal),
                    metrics.eaten(FoodKind::Bonus),
                    metrics.eaten(FoodKind::Special)
                )),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "High Scores",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        ];

        for (rank, score) in snapshot.high_scores.iter().enumerate() {
            let style = if *score == snapshot.score {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            text.push(Line::from(Span::styled(
                format!("{}. {:>6}", rank + 1, score),
                style,
            )));
        }

        text.push(Line::from(""));
        for (index, item) in GameOverItem::ALL.iter().enumerate() {
            text.push(menu_line(item.label().to_string(), index == snapshot.cursor));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: GameState) -> Paragraph<'_> {
        let text = match state {
            GameState::Playing | GameState::Paused => vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("P", Style::default().fg(Color::Cyan)),
                Span::raw(" to pause | "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" for menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
            GameState::Menu | GameState::GameOver => vec![Line::from(vec![
                Span::styled("↑↓", Style::default().fg(Color::Cyan)),
                Span::raw(" to choose | "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to select | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn food_span(kind: FoodKind) -> Span<'static> {
    let (glyph, color) = match kind {
        FoodKind::Normal => ("● ", Color::Red),
        FoodKind::Bonus => ("◆ ", Color::Yellow),
        FoodKind::Special => ("★ ", Color::Magenta),
    };
    Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn menu_line(label: String, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {} <", label),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(label, Style::default().fg(Color::White)))
    }
}

/// Rect of at most `width` x `height` centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
