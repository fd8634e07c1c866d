#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since window offsets are always below 4
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types as window offsets are within reasonable ranges
    clippy::cast_possible_wrap
)]

use crate::components::{Cell, Direction, Facing, Grid, Position, Shape};
use crate::error::{EngineError, EngineResult};
use crate::game::{
    ARRIVAL_OFFSET, ARRIVAL_SPAN, FIGURE_BLOCKS, GRID_SIZE, QUARTER_MARGIN, QUARTER_SPLIT,
    WINDOW_SIZE,
};

/// Arrival point number `index` (taken modulo the number of arrival points).
///
/// Points are grouped by edge: left, right, top, bottom, each running
/// `0..ARRIVAL_SPAN` along its edge.
#[must_use]
pub fn arrival_point(index: usize) -> Position {
    let span = ARRIVAL_SPAN as usize;
    let along = (index % span) as i32;
    match (index / span) % 4 {
        0 => Position::new(-ARRIVAL_OFFSET, along),
        1 => Position::new(GRID_SIZE, along),
        2 => Position::new(along, -ARRIVAL_OFFSET),
        _ => Position::new(along, GRID_SIZE),
    }
}

pub fn arrival_points() -> impl Iterator<Item = Position> {
    (0..crate::game::ARRIVAL_POINTS).map(arrival_point)
}

/// Travel direction for a figure arriving at `top_left`, if that is an arrival point.
/// Figures always head away from the edge they arrive at.
#[must_use]
pub fn travel_from_arrival(top_left: Position) -> Option<Direction> {
    let on_span = |n: i32| (0..ARRIVAL_SPAN).contains(&n);
    let Position { x, y } = top_left;
    if x == -ARRIVAL_OFFSET && on_span(y) {
        Some(Direction::Right)
    } else if x == GRID_SIZE && on_span(y) {
        Some(Direction::Left)
    } else if y == -ARRIVAL_OFFSET && on_span(x) {
        Some(Direction::Down)
    } else if y == GRID_SIZE && on_span(x) {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Half of the grid a figure is confined to, named after the side it covers.
/// Each half reaches `QUARTER_MARGIN` cells past the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quarter {
    // Half-open ranges
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
}

impl Quarter {
    #[must_use]
    pub fn for_travel(travel: Direction) -> Self {
        let whole = (0, GRID_SIZE);
        let near = (-QUARTER_MARGIN, QUARTER_SPLIT);
        let far = (QUARTER_SPLIT, GRID_SIZE + QUARTER_MARGIN);
        let ((x_min, x_max), (y_min, y_max)) = match travel {
            // Heading right means arriving from the left
            Direction::Right => (near, whole),
            Direction::Left => (far, whole),
            Direction::Down => (whole, near),
            Direction::Up => (whole, far),
        };
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        (self.x_min..self.x_max).contains(&position.x)
            && (self.y_min..self.y_max).contains(&position.y)
    }
}

pub type Bounding<T> = [[Option<T>; WINDOW_SIZE]; WINDOW_SIZE];

/// The 4x4 frame of a figure. Immutable: every move or rotation builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    top_left: Position,
    shape: Shape,
    facing: Facing,
    travel: Direction,
    bounding: Bounding<Position>,
    mapped: Vec<Position>,
    quarter: Quarter,
}

impl Window {
    /// Creates a window. Without an explicit `travel` the direction is derived
    /// from the arrival edge `top_left` sits on.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArrival`] when no travel is given and
    /// `top_left` is not an arrival point.
    pub fn new(
        top_left: Position,
        shape: Shape,
        facing: Facing,
        travel: Option<Direction>,
    ) -> EngineResult<Self> {
        let travel = match travel {
            Some(travel) => travel,
            None => travel_from_arrival(top_left).ok_or(EngineError::InvalidArrival {
                x: top_left.x,
                y: top_left.y,
            })?,
        };
        Ok(Self::with_travel(top_left, shape, facing, travel))
    }

    #[must_use]
    pub fn with_travel(top_left: Position, shape: Shape, facing: Facing, travel: Direction) -> Self {
        let mut bounding: Bounding<Position> = [[None; WINDOW_SIZE]; WINDOW_SIZE];
        let mut mapped = Vec::with_capacity(FIGURE_BLOCKS);
        let mask = shape.mask(facing);

        for (row, mask_row) in mask.iter().enumerate() {
            for (col, &occupied) in mask_row.iter().enumerate() {
                let position = Position::new(top_left.x + col as i32, top_left.y + row as i32);
                if !Grid::contains(position) {
                    continue;
                }
                bounding[row][col] = Some(position);
                if occupied {
                    mapped.push(position);
                }
            }
        }

        Self {
            top_left,
            shape,
            facing,
            travel,
            bounding,
            mapped,
            quarter: Quarter::for_travel(travel),
        }
    }

    #[must_use]
    pub fn top_left(&self) -> Position {
        self.top_left
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[must_use]
    pub fn travel(&self) -> Direction {
        self.travel
    }

    #[must_use]
    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    #[must_use]
    pub fn bounding_positions(&self) -> &Bounding<Position> {
        &self.bounding
    }

    #[must_use]
    pub fn bounding_cells<'g>(&self, grid: &'g Grid) -> Bounding<&'g Cell> {
        self.bounding
            .map(|row| row.map(|position| position.and_then(|p| grid.get(p))))
    }

    /// In-bounds cells covered by the figure, row-major.
    #[must_use]
    pub fn mapped_positions(&self) -> &[Position] {
        &self.mapped
    }

    #[must_use]
    pub fn mapped_cells<'g>(&self, grid: &'g Grid) -> Vec<&'g Cell> {
        self.mapped.iter().filter_map(|&p| grid.get(p)).collect()
    }

    #[must_use]
    pub fn has_frozen_cell(&self, grid: &Grid) -> bool {
        self.mapped.iter().any(|&p| grid.is_frozen(p))
    }

    #[must_use]
    pub fn is_within_quarter(&self) -> bool {
        self.mapped.iter().all(|&p| self.quarter.contains(p))
    }

    #[must_use]
    pub fn is_on_grid(&self) -> bool {
        !self.mapped.is_empty()
    }

    #[must_use]
    pub fn is_fully_on_grid(&self) -> bool {
        self.mapped.len() == FIGURE_BLOCKS
    }

    // Same figure one cell further in `direction`
    #[must_use]
    pub fn shifted(&self, direction: Direction) -> Self {
        Self::with_travel(
            self.top_left.shifted(direction),
            self.shape,
            self.facing,
            self.travel,
        )
    }

    // Same figure in place, turned to `facing`
    #[must_use]
    pub fn turned(&self, facing: Facing) -> Self {
        Self::with_travel(self.top_left, self.shape, facing, self.travel)
    }
}
