use std::collections::HashSet;

use super::{
    cell_id::{CellId, id_to_coord},
    coord::Coordinate,
    direction::Direction,
    error::GameError,
};

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<CellId>,
}

impl Snake {
    /// Create a snake from its segments, head first.
    ///
    /// Callers guarantee `body` is non-empty; [`GameConfig::validate`] does this
    /// for every configured starting snake.
    ///
    /// [`GameConfig::validate`]: super::GameConfig::validate
    pub fn new(body: Vec<CellId>) -> Self {
        let snake = Self { body };
        debug_assert!(!snake.is_empty(), "snake needs at least one segment");
        snake
    }

    pub fn head(&self) -> &CellId {
        &self.body[0]
    }

    pub fn head_coord(&self) -> Result<Coordinate, GameError> {
        id_to_coord(self.head())
    }

    pub fn tail(&self) -> &CellId {
        &self.body[self.body.len() - 1]
    }

    /// Whether any segment, tail included, occupies `cell`
    pub fn occupies(&self, cell: &CellId) -> bool {
        self.body.contains(cell)
    }

    /// Put a new head in front; drop the tail unless growing
    pub fn advance(&mut self, new_head: CellId, grow: bool) {
        if !grow {
            self.body.pop();
        }
        self.body.insert(0, new_head);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Whether the engine advances on tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    Ended,
}

/// Complete game state, owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apples: HashSet<CellId>,
    /// Direction the snake moved in on its last tick
    pub direction: Direction,
    /// Latest accepted turn, applied on the next tick
    pub pending_direction: Option<Direction>,
    pub score: u32,
    pub status: GameStatus,
    pub board_rows: usize,
    pub board_columns: usize,
    pub tick_interval_ms: u64,
}

impl GameState {
    pub fn new(
        snake: Snake,
        direction: Direction,
        board_rows: usize,
        board_columns: usize,
        tick_interval_ms: u64,
    ) -> Self {
        Self {
            snake,
            apples: HashSet::new(),
            direction,
            pending_direction: None,
            score: 0,
            status: GameStatus::Running,
            board_rows,
            board_columns,
            tick_interval_ms,
        }
    }

    /// Check if a cell holds a snake segment or an apple
    pub fn is_occupied(&self, cell: &CellId) -> bool {
        self.snake.occupies(cell) || self.apples.contains(cell)
    }

    /// Apple cells in a stable order, for rendering and notifications
    pub fn apple_cells(&self) -> Vec<CellId> {
        let mut apples: Vec<CellId> = self.apples.iter().cloned().collect();
        apples.sort();
        apples
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
