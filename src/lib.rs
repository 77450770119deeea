//! Breadth-first, depth-first and greedy best-first search chasing food through a random maze.
//!
//! The library side holds the maze model ([`maze`]) and the search engine ([`pathfinding`]); the
//! rest of the crate is the terminal game that drives them one episode at a time and draws the
//! visited cells, the frontier and the path of every search.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
mod events;
mod game;
pub mod logging;
pub mod maze;
pub mod pathfinding;
mod timing;
mod types;
mod ui;

pub use app::App;
pub use config::{Config, ConfigurationError};
