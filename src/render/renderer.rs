use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::collections::HashSet;

use crate::game::{Coordinate, GameStatus, coord_to_id};
use crate::metrics::GameMetrics;

use super::BoardView;

pub struct Renderer {
    rows: i32,
    columns: i32,
}

impl Renderer {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: rows as i32,
            columns: columns as i32,
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        view: &BoardView,
        status: GameStatus,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], view, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // Render game grid or game over screen
        if status == GameStatus::Ended {
            let game_over = self.render_game_over(game_area, view);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, view, status == GameStatus::Paused);
            frame.render_widget(grid, game_area);
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, view: &BoardView, paused: bool) -> Paragraph<'_> {
        let body: HashSet<_> = view.snake.iter().collect();
        let mut lines = Vec::with_capacity(self.rows as usize);

        for row in 0..self.rows {
            let mut spans = Vec::with_capacity(self.columns as usize);

            for column in 0..self.columns {
                let cell = coord_to_id(Coordinate::new(row, column));

                let span = if view.head() == Some(&cell) {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if view.apples.contains(&cell) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let (title, border_color) = if paused {
            (" Snake - PAUSED ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, view: &BoardView, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.snake.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, view: &BoardView) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CellId, GameListener};
    use ratatui::{Terminal, backend::TestBackend};

    fn id(row: i32, column: i32) -> CellId {
        coord_to_id(Coordinate::new(row, column))
    }

    fn draw(view: &BoardView, status: GameStatus) -> String {
        let renderer = Renderer::new(5, 5);
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, view, status, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn view() -> BoardView {
        let mut view = BoardView::new();
        view.on_render(&[id(2, 2), id(3, 2)], &[id(0, 4)]);
        view.on_score_changed(7);
        view
    }

    #[test]
    fn test_running_board() {
        let screen = draw(&view(), GameStatus::Running);

        assert!(screen.contains("Score: 7"));
        assert!(screen.contains("■"));
        assert!(screen.contains("□"));
        assert!(screen.contains("●"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_paused_board() {
        let screen = draw(&view(), GameStatus::Paused);
        assert!(screen.contains("PAUSED"));
    }

    #[test]
    fn test_game_over_panel() {
        let screen = draw(&view(), GameStatus::Ended);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 7"));
        assert!(!screen.contains("■"));
    }
}
