//! Terminal Snake
//!
//! A single-player grid snake game split into a pure game core and
//! thin adapters:
//! - Core game logic (game module), advanced tick by tick
//! - TUI rendering (render module)
//! - Keyboard command translation (input module)
//! - High-score persistence (persistence module)
//! - Audio cues (audio module)
//! - The tokio event loop wiring it all together (app module)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod persistence;
pub mod render;
