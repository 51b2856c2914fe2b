use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use super::{
    cell_id::{CellId, coord_to_id, id_to_coord},
    coord::{Coordinate, wrap_add},
    direction::Direction,
    error::GameError,
};

/// Largest board side accepted, keeps every coordinate comfortably inside `i32`
pub const MAX_BOARD_SIDE: usize = 1024;

/// Configuration for the game, fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rows on the board
    pub board_rows: usize,
    /// Number of columns on the board
    pub board_columns: usize,
    /// Time between two ticks while running
    pub tick_interval_ms: u64,
    /// Direction the snake travels in at start and after reset
    pub initial_direction: Direction,
    /// Length of the generated starting snake, ignored when `initial_snake` is set
    pub initial_snake_length: usize,
    /// Explicit starting snake, head first
    pub initial_snake: Option<Vec<CellId>>,
    /// Seed for apple placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_rows: 21,
            board_columns: 21,
            tick_interval_ms: 100,
            initial_direction: Direction::Up,
            initial_snake_length: 3,
            initial_snake: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            board_rows: rows,
            board_columns: columns,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Board size as signed `(rows, columns)`, the form coordinate math works in
    pub fn dimensions(&self) -> (i32, i32) {
        (self.board_rows as i32, self.board_columns as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.board_rows * self.board_columns
    }

    /// The snake every game starts with, head first.
    ///
    /// Without an explicit `initial_snake` the head sits in the middle of the
    /// board and the body trails straight behind it, so every turn except the
    /// reverse is safe on the first tick.
    pub fn initial_snake(&self) -> Vec<CellId> {
        if let Some(snake) = &self.initial_snake {
            return snake.clone();
        }

        let (rows, columns) = self.dimensions();
        let back = self.initial_direction.opposite().delta();
        let mut segment = Coordinate::new(rows / 2, columns / 2);
        let mut body = Vec::with_capacity(self.initial_snake_length);

        for _ in 0..self.initial_snake_length {
            body.push(coord_to_id(segment));
            segment = wrap_add(segment, back, rows, columns);
        }

        body
    }

    /// Check that an engine can start from this configuration
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid =
            |msg: String| -> Result<(), GameError> { Err(GameError::InvalidConfig(msg)) };

        if self.board_rows == 0 || self.board_columns == 0 {
            return invalid(format!(
                "board must have at least one row and column, got {}x{}",
                self.board_rows, self.board_columns
            ));
        }
        if self.board_rows > MAX_BOARD_SIDE || self.board_columns > MAX_BOARD_SIDE {
            return invalid(format!("board sides are limited to {MAX_BOARD_SIDE}"));
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick interval must be positive".to_string());
        }
        if self.initial_snake.is_none() && self.initial_snake_length == 0 {
            return invalid("initial snake length must be at least 1".to_string());
        }

        self.validate_snake(&self.initial_snake())
    }

    fn validate_snake(&self, snake: &[CellId]) -> Result<(), GameError> {
        let invalid =
            |msg: String| -> Result<(), GameError> { Err(GameError::InvalidConfig(msg)) };
        let (rows, columns) = self.dimensions();

        if snake.is_empty() {
            return invalid("initial snake must have at least one segment".to_string());
        }
        if snake.len() >= self.cell_count() {
            return invalid("initial snake leaves no room for an apple".to_string());
        }

        let mut seen = HashSet::with_capacity(snake.len());
        let mut coords = Vec::with_capacity(snake.len());
        for id in snake {
            let coord = id_to_coord(id)?;
            if !coord.is_within(rows, columns) {
                return invalid(format!("initial snake segment {id} is off the board"));
            }
            if !seen.insert(id) {
                return invalid(format!("initial snake visits {id} twice"));
            }
            coords.push(coord);
        }

        for pair in coords.windows(2) {
            let adjacent = Direction::ALL
                .iter()
                .any(|d| wrap_add(pair[0], d.delta(), rows, columns) == pair[1]);
            if !adjacent {
                return invalid(format!(
                    "initial snake is not contiguous between {} and {}",
                    coord_to_id(pair[0]),
                    coord_to_id(pair[1])
                ));
            }
        }

        let first_step = coord_to_id(wrap_add(
            coords[0],
            self.initial_direction.delta(),
            rows,
            columns,
        ));
        if seen.contains(&first_step) {
            return invalid(format!(
                "initial snake runs into itself at {first_step} on the first tick"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cells: &[(i32, i32)]) -> Vec<CellId> {
        cells.iter().map(|&c| coord_to_id(c.into())).collect()
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_rows, 21);
        assert_eq!(config.board_columns, 21);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.initial_direction, Direction::Up);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 30);
        assert_eq!(config.dimensions(), (15, 30));
        assert_eq!(config.cell_count(), 450);
        assert_eq!(config.initial_snake_length, 3);
    }

    #[test]
    fn test_default_snake_is_centred_and_trails_behind() {
        let config = GameConfig::default();
        assert_eq!(config.initial_snake(), ids(&[(10, 10), (11, 10), (12, 10)]));

        let config = GameConfig {
            initial_direction: Direction::Right,
            ..GameConfig::small()
        };
        assert_eq!(config.initial_snake(), ids(&[(5, 5), (5, 4), (5, 3)]));
    }

    #[test]
    fn test_explicit_snake_wins() {
        let snake = ids(&[(1, 1), (1, 2)]);
        let config = GameConfig {
            initial_snake: Some(snake.clone()),
            initial_direction: Direction::Down,
            ..GameConfig::small()
        };
        assert_eq!(config.initial_snake(), snake);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            GameConfig::new(0, 5).validate(),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(GameConfig::new(MAX_BOARD_SIDE + 1, 5).validate().is_err());

        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_snakes() {
        let with_snake = |cells: Vec<CellId>| GameConfig {
            initial_snake: Some(cells),
            ..GameConfig::small()
        };

        // empty
        assert!(with_snake(vec![]).validate().is_err());
        // off board
        assert!(with_snake(ids(&[(10, 0)])).validate().is_err());
        // duplicate
        assert!(with_snake(ids(&[(3, 3), (4, 3), (3, 3)])).validate().is_err());
        // gap
        assert!(with_snake(ids(&[(3, 3), (5, 3)])).validate().is_err());
        // second segment straight ahead of an upward head
        assert!(with_snake(ids(&[(3, 3), (2, 3)])).validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_snake_from_json() {
        let json = r#"{"board_rows": 10, "board_columns": 10, "initial_snake": ["4-4", "nope"]}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.validate(),
            Err(GameError::MalformedIdentifier("nope".to_string()))
        );
    }

    #[test]
    fn test_wraps_snake_across_edge() {
        // contiguous through the top/bottom seam, heading away from the body
        let config = GameConfig {
            initial_snake: Some(ids(&[(0, 4), (9, 4), (8, 4)])),
            initial_direction: Direction::Down,
            ..GameConfig::small()
        };
        assert!(config.validate().is_ok());

        // heading up crosses the seam straight into the second segment
        let config = GameConfig {
            initial_direction: Direction::Up,
            ..config
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_snake_as_long_as_travel_axis() {
        // head would wrap straight onto its own tail
        let config = GameConfig {
            initial_snake_length: 10,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.json");
        let json = r#"{"board_rows": 12, "tick_interval_ms": 80, "seed": 7}"#;
        std::fs::write(&path, json).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.board_rows, 12);
        assert_eq!(config.board_columns, 21);
        assert_eq!(config.tick_interval_ms, 80);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::load(&dir.path().join("absent.json")).is_err());
    }
}
