//! Grid Snake - a single-screen arcade Snake game
//!
//! This library provides:
//! - Core simulation (game module), advanced one tick at a time
//! - Terminal rendering (render module)
//! - Keyboard mapping (input module)
//! - Startup assets and audio cues (assets module)
//! - The interactive shell tying them together (modes module)

pub mod assets;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
