pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod figure;
pub mod game;
pub mod line_clear;
pub mod systems;
pub mod window;

#[cfg(test)]
mod tests;

pub use app::{App, AppResult};
pub use components::{
    Cell, CellState, CounterChange, Direction, Facing, GameState, Grid, Input, Position, Shape,
};
pub use config::Config;
pub use error::EngineError;
pub use figure::Figure;
pub use window::{Quarter, Window};
