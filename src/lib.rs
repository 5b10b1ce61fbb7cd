//! Single-player snake on a fixed-size terminal grid.
//!
//! [`game::GameState`] owns the whole simulation; the binary drives it with
//! [`input::poll_input`] and draws it with [`renderer::render`].

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

pub use error::Error;
