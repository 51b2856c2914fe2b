//! Torus Snake - Snake on a board whose edges wrap around
//!
//! This library provides:
//! - Core game logic (game module), independent of any front end
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal game (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
