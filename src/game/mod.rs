//! Core game logic module for Snake
//!
//! Everything in here is pure state manipulation with no I/O or
//! rendering dependencies; the engine is advanced by ticks delivered
//! from the outside.

pub mod command;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use command::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, GameError, GameEvent};
pub use state::{GameStatus, Position, Snake};
