use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    style::Print,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameStatus, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{BoardView, Renderer};

/// Render at 30 FPS (33ms per frame)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode {
    engine: GameEngine<BoardView>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Set when the tick timer has to start a fresh interval
    rearm_timer: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let renderer = Renderer::new(config.board_rows, config.board_columns);
        let engine =
            GameEngine::new(config, BoardView::new()).context("Failed to start game engine")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
            rearm_timer: false,
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
        let mut tick_timer = self.tick_timer();
        let mut render_timer = interval(RENDER_INTERVAL);

        info!(
            tick_ms = self.engine.config().tick_interval_ms,
            "Entering game loop"
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only polled while the game is running
                _ = tick_timer.tick(), if self.engine.status() == GameStatus::Running => {
                    self.update_game(terminal)?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let status = self.engine.status();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.listener(), status, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.rearm_timer {
                // The next tick is a whole interval away, never an immediate catch-up
                tick_timer.reset();
                self.rearm_timer = false;
            }

            if self.should_quit {
                info!(score = self.engine.score(), "Quitting");
                break;
            }
        }

        Ok(())
    }

    fn tick_timer(&self) -> Interval {
        let mut timer = interval(self.engine.config().tick_interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.engine.set_direction(direction);
                }
                KeyAction::TogglePause => self.toggle_pause(),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn toggle_pause(&mut self) {
        match self.engine.toggle_pause() {
            GameStatus::Paused => self.metrics.on_pause(),
            GameStatus::Running => {
                self.metrics.on_resume();
                self.rearm_timer = true;
            }
            GameStatus::Ended => {}
        }
    }

    fn update_game(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let outcome = self.engine.tick().context("Game tick failed")?;

        match outcome {
            TickOutcome::AteApple => {
                self.metrics.on_score(self.engine.score());
                if self.engine.listener_mut().take_bell() {
                    // Terminal bell stands in for the eating sound
                    execute!(terminal.backend_mut(), Print('\u{7}'))
                        .context("Failed to ring bell")?;
                }
            }
            TickOutcome::Ended => {
                self.metrics.on_game_over(self.engine.score());
            }
            TickOutcome::Moved | TickOutcome::Skipped => {}
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        debug!("Restart requested");
        self.engine.reset();
        self.metrics.on_game_start();
        self.rearm_timer = true;
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
