#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;

use crate::components::{Direction, Grid, Shape};
use crate::error::{EngineError, EngineResult};
use crate::window::Window;

// Marks the figure the player is steering
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Active;

// Marks the figure that arrives after the active one
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Upcoming;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    window: Window,
    shape: Shape,
}

impl Figure {
    #[must_use]
    pub fn new(window: Window) -> Self {
        let shape = window.shape();
        Self { window, shape }
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn travel(&self) -> Direction {
        self.window.travel()
    }

    /// Window one step in `direction`, or `None` when that step heads back
    /// towards the edge the figure arrived from.
    #[must_use]
    pub fn move_window(&self, direction: Direction) -> Option<Window> {
        if direction == self.window.travel().opposite() {
            return None;
        }
        Some(self.window.shifted(direction))
    }

    /// Window turned one facing clockwise (`Right`) or counter-clockwise (`Left`).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRotation`] for `Up` and `Down`.
    pub fn rotate(&self, direction: Direction) -> EngineResult<Window> {
        let facing = self.window.facing();
        let facing = match direction {
            Direction::Right => facing.next(),
            Direction::Left => facing.previous(),
            Direction::Up | Direction::Down => {
                return Err(EngineError::InvalidRotation(direction));
            }
        };
        Ok(self.window.turned(facing))
    }

    // The only gate for moves, rotations and forced advances. A candidate
    // keeps the figure's travel direction.
    #[must_use]
    pub fn is_valid(&self, window: Option<&Window>, grid: &Grid) -> bool {
        window.is_some_and(|window| {
            window.travel() == self.travel()
                && !window.has_frozen_cell(grid)
                && window.is_within_quarter()
        })
    }

    /// Repaints the figure: the previous silhouette is erased and `window`'s
    /// cells become blocked.
    pub fn lock(&mut self, window: Window, grid: &mut Grid) {
        grid.clear_all_blocked();
        for &position in window.mapped_positions() {
            if let Some(cell) = grid.get_mut(position) {
                cell.block();
            }
        }
        self.window = window;
    }
}
