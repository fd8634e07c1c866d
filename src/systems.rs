use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{Direction, FallTimer, FigureRng, GameState, Grid, Input};
use crate::config::Config;
use crate::error::EngineResult;
use crate::figure::{Active, Figure, Upcoming};
use crate::line_clear;
use crate::window::Window;

// Build a figure at a random arrival point with a random shape and facing
pub fn arrive_figure(world: &mut World) -> EngineResult<Figure> {
    let (top_left, (shape, facing)) = {
        let mut rng = world.resource_mut::<FigureRng>();
        (rng.arrival_point(), rng.orientation())
    };
    let window = Window::new(top_left, shape, facing, None)?;
    debug!(
        "Figure {} arrives at ({}, {}) heading {:?}",
        shape.letter(),
        top_left.x,
        top_left.y,
        window.travel()
    );
    Ok(Figure::new(window))
}

// Replace every figure with a fresh active and upcoming pair
pub fn spawn_figures(world: &mut World) -> EngineResult<()> {
    let existing: Vec<Entity> = world
        .query_filtered::<Entity, With<Figure>>()
        .iter(world)
        .collect();
    for entity in existing {
        world.despawn(entity);
    }

    let active = arrive_figure(world)?;
    world.spawn((active, Active));
    let upcoming = arrive_figure(world)?;
    world.spawn((upcoming, Upcoming));
    Ok(())
}

// Retire the active figure, promote the upcoming one and line up another
pub fn push_next_figure(world: &mut World) -> EngineResult<()> {
    if let Some((entity, _)) = active_figure(world) {
        world.despawn(entity);
    }

    match upcoming_figure(world) {
        Some((entity, _)) => {
            world.entity_mut(entity).remove::<Upcoming>().insert(Active);
        }
        None => {
            let active = arrive_figure(world)?;
            world.spawn((active, Active));
        }
    }

    let upcoming = arrive_figure(world)?;
    world.spawn((upcoming, Upcoming));
    Ok(())
}

pub fn active_figure(world: &mut World) -> Option<(Entity, Figure)> {
    let mut query = world.query_filtered::<(Entity, &Figure), With<Active>>();
    query
        .iter(world)
        .next()
        .map(|(entity, figure)| (entity, figure.clone()))
}

pub fn upcoming_figure(world: &mut World) -> Option<(Entity, Figure)> {
    let mut query = world.query_filtered::<(Entity, &Figure), With<Upcoming>>();
    query
        .iter(world)
        .next()
        .map(|(entity, figure)| (entity, figure.clone()))
}

// Apply the player's move and rotation requests, in that order
pub fn input_system(world: &mut World) -> EngineResult<()> {
    // Requests are consumed whether or not they succeed
    let input = std::mem::take(&mut *world.resource_mut::<Input>());

    if world.resource::<GameState>().game_over {
        return Ok(());
    }

    if let Some(direction) = input.movement {
        if try_candidate(world, |figure| Ok(figure.move_window(direction)))? {
            debug!("Moved figure {direction:?}");
        }
    }

    if let Some(direction) = input.rotation {
        if try_candidate(world, |figure| figure.rotate(direction).map(Some))? {
            debug!("Rotated figure {direction:?}");
        }
    }

    Ok(())
}

// Lock a candidate window if the figure is on the grid and the candidate is
// valid and on the grid as well. Returns whether the figure changed.
fn try_candidate<F>(world: &mut World, candidate: F) -> EngineResult<bool>
where
    F: FnOnce(&Figure) -> EngineResult<Option<Window>>,
{
    let Some((entity, mut figure)) = active_figure(world) else {
        return Ok(false);
    };
    if !figure.window().is_on_grid() {
        return Ok(false);
    }
    let Some(window) = candidate(&figure)? else {
        return Ok(false);
    };

    let accepted = {
        let grid = world.resource::<Grid>();
        figure.is_valid(Some(&window), grid) && window.is_on_grid()
    };
    if !accepted {
        return Ok(false);
    }

    {
        let mut grid = world.resource_mut::<Grid>();
        figure.lock(window, &mut grid);
    }
    world.entity_mut(entity).insert(figure);
    Ok(true)
}

// Count frames and force the figure forward once the fall interval is reached
pub fn game_tick_system(world: &mut World) -> EngineResult<()> {
    if world.resource::<GameState>().game_over {
        return Ok(());
    }

    let (interval, start) = {
        let config = world.resource::<Config>();
        let game_state = world.resource::<GameState>();
        (
            game_state.fall_interval(&config.rules),
            config.rules.start_frame_count,
        )
    };

    let should_fall = {
        let mut timer = world.resource_mut::<FallTimer>();
        trace!("Fall timer: {}, interval: {}", timer.frames, interval);
        if timer.frames >= interval {
            timer.frames = start;
            true
        } else {
            timer.frames += 1;
            false
        }
    };

    if should_fall {
        advance_figure(world)?;
    }

    check_border_system(world);
    Ok(())
}

// Move the active figure one step along its travel direction, or settle it
pub fn advance_figure(world: &mut World) -> EngineResult<()> {
    let Some((entity, mut figure)) = active_figure(world) else {
        debug!("No active figure, spawning a new one");
        return push_next_figure(world);
    };

    let window = figure.move_window(figure.travel());
    let valid = {
        let grid = world.resource::<Grid>();
        figure.is_valid(window.as_ref(), grid)
    };

    match window {
        Some(window) if valid => {
            trace!(
                "Advancing figure to ({}, {})",
                window.top_left().x,
                window.top_left().y
            );
            {
                let mut grid = world.resource_mut::<Grid>();
                figure.lock(window, &mut grid);
            }
            world.entity_mut(entity).insert(figure);
        }
        _ if !figure.window().is_fully_on_grid() => {
            // No room left for the figure to enter the grid
            info!("Figure {} cannot enter the grid, game over", figure.shape().letter());
            world.resource_mut::<GameState>().game_over = true;
        }
        _ => {
            settle_figure(world, figure.travel());
            push_next_figure(world)?;
        }
    }
    Ok(())
}

// Freeze the blocked silhouette and clear whatever lines it completes
fn settle_figure(world: &mut World, travel: Direction) {
    info!("Freezing figure in place");
    world.resource_mut::<Grid>().freeze_all_blocked();

    let rules = world.resource::<Config>().rules.clone();
    world.resource_scope(|world, mut grid: Mut<Grid>| {
        let mut game_state = world.resource_mut::<GameState>();
        line_clear::clear_lines(&mut grid, &mut game_state, &rules, travel);
    });
}

// A frozen cell on the outermost ring ends the game
pub fn check_border_system(world: &mut World) -> bool {
    if world.resource::<Grid>().has_frozen_border() {
        let mut game_state = world.resource_mut::<GameState>();
        if !game_state.game_over {
            info!("Frozen cells reached the border, game over");
            game_state.game_over = true;
        }
    }
    world.resource::<GameState>().game_over
}
