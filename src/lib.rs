//! Grid Snake - a grid-based snake game
//!
//! This library provides:
//! - Core simulation (game module): body sequence, grid, engine, rounds
//! - The two round timers on a cooperative scheduler (schedule module)
//! - A JSON-file score store (store module)
//! - Terminal input, rendering and play mode (input, render, modes)

pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod schedule;
pub mod store;
