use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{BoundaryPolicy, Cell, Round, RoundSummary, ScoreStore, TileBuffer, TileKind};

/// Draws a round from its tile buffer. Rows go top to bottom from the
/// largest y, so North points up on screen.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<S: ScoreStore, R: Rng>(&self, frame: &mut Frame, round: &Round<S, TileBuffer, R>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let summary = round.summary();
        frame.render_widget(self.render_stats(round, summary), chunks[0]);

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if summary.game_over {
            frame.render_widget(self.render_game_over(summary), board_area);
        } else {
            frame.render_widget(self.render_board(round), board_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_board<S: ScoreStore, R: Rng>(&self, round: &Round<S, TileBuffer, R>) -> Paragraph<'static> {
        let grid = round.grid();
        let head = round.state().snake.head().ok();
        let tiles = round.tiles();

        let lines: Vec<Line> = (grid.min_y()..=grid.max_y())
            .rev()
            .map(|y| {
                let spans: Vec<Span> = (grid.min_x()..=grid.max_x())
                    .map(|x| {
                        let cell = Cell::new(x, y);
                        if Some(cell) == head {
                            return Span::styled(
                                "■ ",
                                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                            );
                        }

                        match tiles.get(cell) {
                            Some(TileKind::Body) => Span::styled("□ ", Style::default().fg(Color::Green)),
                            Some(TileKind::Apple) => Span::styled(
                                "O ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            Some(TileKind::Wall) => Span::styled("▓ ", Style::default().fg(Color::Gray)),
                            None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if round.config().boundary == BoundaryPolicy::Wrap {
            " Snake (wrap) "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<S: ScoreStore, R: Rng>(
        &self,
        round: &Round<S, TileBuffer, R>,
        summary: RoundSummary,
    ) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(summary.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(summary.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(round.state().snake.count().to_string(), value),
            Span::raw("    "),
            Span::styled("Delay: ", label),
            Span::styled(format!("{}ms", round.tick_interval().as_millis()), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, summary: RoundSummary) -> Paragraph<'static> {
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled("GAME OVER", bold(Color::Red))]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(summary.score.to_string(), bold(Color::White)),
                Span::raw("   "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(summary.best_score.to_string(), bold(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("R", bold(Color::Green)),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled("Q", bold(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
