use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::game::{Round, ScoreStore};
use crate::input::{KeyAction, map_key};
use crate::render::Renderer;
use crate::schedule::RoundTimers;

/// What the loop should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Restarted,
    Quit,
}

/// Keyboard-driven play in the terminal
pub struct HumanMode<S> {
    round: Round<S>,
    renderer: Renderer,
}

impl<S: ScoreStore> HumanMode<S> {
    pub fn new(round: Round<S>) -> Self {
        Self {
            round,
            renderer: Renderer::new(),
        }
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

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut timers = RoundTimers::arm(self.round.apple_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match self.handle_event(event)? {
                            Control::Continue => {}
                            Control::Restarted => {
                                timers = RoundTimers::arm(self.round.apple_interval());
                            }
                            Control::Quit => break,
                        }
                    }
                }

                // Both periodic processes stop with the round
                due = timers.next(), if self.round.is_running() => {
                    timers.fire(&mut self.round, due);
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.round);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => break,
            }
        }

        let summary = self.round.summary();
        info!(score = summary.score, best = summary.best_score, "leaving game");

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<Control> {
        let Event::Key(key) = event else {
            return Ok(Control::Continue);
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(Control::Continue);
        }

        match map_key(key) {
            KeyAction::Steer(direction) => self.round.set_direction(direction),
            KeyAction::Restart => {
                self.round.restart().context("Failed to restart round")?;
                return Ok(Control::Restarted);
            }
            KeyAction::Quit => return Ok(Control::Quit),
            KeyAction::None => {}
        }

        Ok(Control::Continue)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, GameConfig, MemoryStore};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn mode() -> HumanMode<MemoryStore> {
        let round = Round::new(GameConfig::default(), MemoryStore::new(), None).unwrap();
        HumanMode::new(round)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_last_steer_before_tick_wins() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Left, KeyEventKind::Press)).unwrap();
        mode.handle_event(key(KeyCode::Right, KeyEventKind::Press)).unwrap();
        mode.round.advance();

        assert_eq!(mode.round.state().direction, Direction::East);
        assert_eq!(mode.round.state().snake.head(), Ok(Cell::new(1, 0)));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut mode = mode();
        let control = mode
            .handle_event(key(KeyCode::Left, KeyEventKind::Release))
            .unwrap();

        assert_eq!(control, Control::Continue);
        assert_eq!(mode.round.state().direction, Direction::North);
    }

    #[test]
    fn test_restart_key_resets_round() {
        let mut mode = mode();
        mode.round.set_direction(Direction::South);
        mode.round.advance();
        assert!(!mode.round.is_running());

        let control = mode
            .handle_event(key(KeyCode::Char('r'), KeyEventKind::Press))
            .unwrap();

        assert_eq!(control, Control::Restarted);
        assert!(mode.round.is_running());
        assert_eq!(mode.round.summary().score, 0);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        let control = mode
            .handle_event(key(KeyCode::Char('q'), KeyEventKind::Press))
            .unwrap();
        assert_eq!(control, Control::Quit);
    }
}
