use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace, warn};

use super::{
    cell_id::{CellId, coord_to_id},
    config::GameConfig,
    coord::{Coordinate, wrap_add},
    direction::Direction,
    error::GameError,
    listener::{GameListener, NoopListener},
    state::{GameState, GameStatus, Snake},
};

/// What a call to [`GameEngine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was paused or over; nothing changed
    Skipped,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto an apple and grew
    AteApple,
    /// The snake ran into itself; the game is over
    Ended,
}

/// The game engine that owns the state and applies all game rules
pub struct GameEngine<L: GameListener = NoopListener> {
    config: GameConfig,
    state: GameState,
    listener: L,
    rng: StdRng,
}

impl GameEngine<NoopListener> {
    /// Engine without any front end attached
    pub fn headless(config: GameConfig) -> Result<Self, GameError> {
        Self::new(config, NoopListener)
    }
}

impl<L: GameListener> GameEngine<L> {
    /// Validate the configuration and start a game
    pub fn new(config: GameConfig, listener: L) -> Result<Self, GameError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = Self::initial_state(&config);

        let mut engine = Self {
            config,
            state,
            listener,
            rng,
        };
        engine.start();
        Ok(engine)
    }

    fn initial_state(config: &GameConfig) -> GameState {
        GameState::new(
            Snake::new(config.initial_snake()),
            config.initial_direction,
            config.board_rows,
            config.board_columns,
            config.tick_interval_ms,
        )
    }

    fn start(&mut self) {
        self.spawn_apple();
        info!(
            rows = self.config.board_rows,
            columns = self.config.board_columns,
            length = self.state.snake.len(),
            "Game started"
        );
        self.notify_render();
        self.listener.on_score_changed(self.state.score);
    }

    /// Throw the current game away and start over from the configured state
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
        self.start();
    }

    /// Queue a turn for the next tick.
    ///
    /// A turn straight back into the neck, measured against the direction the
    /// snake last moved in, is ignored, as is any input once the game is over.
    /// Returns whether the turn was queued.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.state.status == GameStatus::Ended {
            return false;
        }
        if self.state.direction.is_opposite(requested) {
            trace!(?requested, current = ?self.state.direction, "Ignoring reverse turn");
            return false;
        }

        self.state.pending_direction = Some(requested);
        true
    }

    /// Returns whether the game went from running to paused
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.state.status = GameStatus::Paused;
        debug!("Paused");
        true
    }

    /// Returns whether the game went from paused to running
    pub fn resume(&mut self) -> bool {
        if self.state.status != GameStatus::Paused {
            return false;
        }
        self.state.status = GameStatus::Running;
        debug!("Resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> GameStatus {
        match self.state.status {
            GameStatus::Running => {
                self.pause();
            }
            GameStatus::Paused => {
                self.resume();
            }
            GameStatus::Ended => {}
        }
        self.state.status
    }

    /// Advance the game by one step.
    ///
    /// The self-collision test runs against the whole body before the tail
    /// moves, so stepping onto the cell the tail is about to leave is fatal.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if !self.state.is_running() {
            return Ok(TickOutcome::Skipped);
        }

        if let Some(next) = self.state.pending_direction.take() {
            self.state.direction = next;
        }

        let (rows, columns) = self.config.dimensions();
        let head = self.state.snake.head_coord()?;
        let new_head = coord_to_id(wrap_add(head, self.state.direction.delta(), rows, columns));

        if self.state.snake.occupies(&new_head) {
            self.state.status = GameStatus::Ended;
            info!(
                score = self.state.score,
                length = self.state.snake.len(),
                cell = %new_head,
                "Snake ran into itself"
            );
            self.listener.on_game_ended();
            return Ok(TickOutcome::Ended);
        }

        let ate_apple = self.state.apples.remove(&new_head);
        trace!(head = %new_head, direction = ?self.state.direction, ate_apple, "Tick");
        self.state.snake.advance(new_head, ate_apple);

        if ate_apple {
            self.state.score += 1;
            debug!(score = self.state.score, length = self.state.snake.len(), "Apple eaten");
            // After the move, so the replacement can never land under the new head
            self.spawn_apple();
        }

        self.notify_render();

        if ate_apple {
            self.listener.on_score_changed(self.state.score);
            self.listener.on_apple_eaten();
            Ok(TickOutcome::AteApple)
        } else {
            Ok(TickOutcome::Moved)
        }
    }

    /// Place one apple on a random free cell.
    ///
    /// Rejection sampling with no attempt limit: cheap while the board is mostly
    /// empty, increasingly slow as the snake fills it. Only a completely full
    /// board is special-cased, where nothing is placed.
    fn spawn_apple(&mut self) -> Option<CellId> {
        let occupied = self.state.snake.len() + self.state.apples.len();
        if occupied >= self.config.cell_count() {
            warn!(occupied, "No free cell left for an apple");
            return None;
        }

        let (rows, columns) = self.config.dimensions();
        loop {
            let row = self.rng.gen_range(0..rows);
            let column = self.rng.gen_range(0..columns);
            let cell = coord_to_id(Coordinate::new(row, column));

            if !self.state.is_occupied(&cell) {
                debug!(cell = %cell, "Apple spawned");
                self.state.apples.insert(cell.clone());
                return Some(cell);
            }
        }
    }

    fn notify_render(&mut self) {
        let apples = self.state.apple_cells();
        self.listener.on_render(&self.state.snake.body, &apples);
    }

    /// Read-only view of the current game
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}
