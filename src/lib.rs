//! Grid Snake - a snake game on a discretized field
//!
//! This library provides:
//! - Core simulation (game module): movement, collisions, food, scoring,
//!   high scores and the menu/round state machine
//! - Terminal front-end: input mapping, ratatui rendering and the play loop
//! - Session metrics fed from game events

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
