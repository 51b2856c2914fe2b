//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends drive it through [`GameEngine`] and observe it through [`GameListener`].

pub mod cell_id;
pub mod config;
pub mod coord;
pub mod direction;
pub mod engine;
pub mod error;
pub mod listener;
pub mod state;

// Re-export commonly used types
pub use cell_id::{CellId, coord_to_id, id_to_coord};
pub use config::GameConfig;
pub use coord::{Coordinate, add, wrap_add};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use error::GameError;
pub use listener::{GameEvent, GameListener, NoopListener, RecordingListener};
pub use state::{GameState, GameStatus, Snake};
