#![warn(clippy::all, clippy::pedantic)]

use anyhow::Context;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::{
    CellState, CounterChange, FallTimer, FigureRng, GameState, Grid, Input, Position,
};
use crate::config::Config;
use crate::figure::Figure;
use crate::systems;

pub type AppResult<T> = anyhow::Result<T>;

/// One game session: the ECS world holding the grid, the figures and the counters.
pub struct App {
    pub world: World,
    pub paused: bool,
}

impl App {
    /// Creates a session with `config` and spawns the first figures.
    ///
    /// # Errors
    ///
    /// Fails only if the figure generator produces an invalid arrival.
    pub fn new(config: Config) -> AppResult<Self> {
        let mut world = World::new();
        world.insert_resource(FigureRng::new(config.seed));
        world.insert_resource(config);

        let mut app = Self {
            world,
            paused: true,
        };
        app.reset()?;
        Ok(app)
    }

    /// Creates a session from the config file, falling back to defaults.
    ///
    /// # Errors
    ///
    /// See [`App::new`].
    pub fn from_config_file() -> AppResult<Self> {
        Self::new(Config::load())
    }

    /// Reset the game state: new grid, fresh counters, new figures.
    ///
    /// # Errors
    ///
    /// See [`App::new`].
    pub fn reset(&mut self) -> AppResult<()> {
        let rules = self.world.resource::<Config>().rules.clone();

        self.world.insert_resource(Grid::new());
        self.world.insert_resource(GameState::new(&rules));
        self.world
            .insert_resource(FallTimer::new(rules.start_frame_count));
        self.world.insert_resource(Input::default());
        // Keep the figure sequence running across resets
        if !self.world.contains_resource::<FigureRng>() {
            self.world.insert_resource(FigureRng::default());
        }

        systems::spawn_figures(&mut self.world).context("spawning initial figures")?;
        self.paused = true;
        info!("Game reset");
        Ok(())
    }

    pub fn set_input(&mut self, input: Input) {
        *self.world.resource_mut::<Input>() = input;
    }

    /// Advances the game by one tick: player input first, then the fall timer.
    ///
    /// # Errors
    ///
    /// Propagates engine errors, which indicate a geometry bug.
    pub fn tick(&mut self) -> AppResult<()> {
        if self.paused || self.is_game_over() {
            return Ok(());
        }

        systems::input_system(&mut self.world).context("applying player input")?;
        systems::game_tick_system(&mut self.world).context("advancing the falling figure")?;
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.world.resource::<GameState>().game_over
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.world.resource::<GameState>().score
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.world.resource::<GameState>().speed
    }

    #[must_use]
    pub fn line_length(&self) -> u32 {
        self.world.resource::<GameState>().line_length
    }

    pub fn drain_changes(&mut self) -> Vec<CounterChange> {
        self.world.resource_mut::<GameState>().drain_changes()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.world.resource::<Grid>()
    }

    // Every blocked or frozen cell, for the renderer
    #[must_use]
    pub fn cells(&self) -> Vec<(Position, CellState)> {
        self.grid()
            .cells()
            .filter(|cell| !cell.is_clear())
            .map(|cell| (cell.position(), cell.state()))
            .collect()
    }

    pub fn active_figure(&mut self) -> Option<Figure> {
        systems::active_figure(&mut self.world).map(|(_, figure)| figure)
    }

    pub fn upcoming_figure(&mut self) -> Option<Figure> {
        systems::upcoming_figure(&mut self.world).map(|(_, figure)| figure)
    }

    // The figure worth previewing: the active one while it is still entering
    pub fn preview_figure(&mut self) -> Option<Figure> {
        match self.active_figure() {
            Some(active) if !active.window().is_fully_on_grid() => Some(active),
            _ => self.upcoming_figure(),
        }
    }
}
