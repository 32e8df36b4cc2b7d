//! Rhythm-game HUD widgets: a curved health bar with a delayed miss bar,
//! per-key press counters and a user profile overlay whose tabs follow the
//! scroll position.
//!
//! Widgets are plain state structs driven by free functions; the renderer
//! consumes the `Actor` trees they produce.

pub mod assets;
pub mod config;
pub mod core;
pub mod game;
pub mod ui;
