//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The shell drives it one tick at a time and reads the state back for display.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{FoodPlacement, GameConfig, TickSequencing};
pub use direction::Direction;
pub use engine::{GameEngine, GameEvent, StepInfo, StepResult};
pub use state::{CollisionType, GameState, Position, Snake};
