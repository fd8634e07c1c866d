#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since grid dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

use crate::config::RulesConfig;
use crate::error::{EngineError, EngineResult};
use crate::game::{BORDER_WIDTH, GRID_SIZE, WINDOW_SIZE};
use crate::window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn shifted(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    // Coordinate on `axis`
    #[must_use]
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

// Travel, move and rotation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    // Grid offset of one step, y grows downwards
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Rotational facing of a figure. The declaration order is the rotation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Left,
    Down,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Left, Facing::Down, Facing::Right];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Facing::Up => 0,
            Facing::Left => 1,
            Facing::Down => 2,
            Facing::Right => 3,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    O,
    J,
    L,
    S,
    Z,
    T,
}

/// 4x4 occupancy of a figure's bounding window, indexed `[row][col]`.
pub type Mask = [[bool; WINDOW_SIZE]; WINDOW_SIZE];

// Rows are read from the high bit: 0b1000 is column 0
const fn mask(rows: [u8; WINDOW_SIZE]) -> Mask {
    let mut out = [[false; WINDOW_SIZE]; WINDOW_SIZE];
    let mut row = 0;
    while row < WINDOW_SIZE {
        let mut col = 0;
        while col < WINDOW_SIZE {
            out[row][col] = (rows[row] & (0b1000 >> col)) != 0;
            col += 1;
        }
        row += 1;
    }
    out
}

// Facing order in every table: Up, Left, Down, Right
static I_MASKS: [Mask; 4] = [
    mask([0b0000, 0b1111, 0b0000, 0b0000]),
    mask([0b0100, 0b0100, 0b0100, 0b0100]),
    mask([0b0000, 0b0000, 0b1111, 0b0000]),
    mask([0b0010, 0b0010, 0b0010, 0b0010]),
];

static O_MASK: Mask = mask([0b0000, 0b0110, 0b0110, 0b0000]);

static J_MASKS: [Mask; 4] = [
    mask([0b1000, 0b1110, 0b0000, 0b0000]),
    mask([0b0110, 0b0100, 0b0100, 0b0000]),
    mask([0b0000, 0b1110, 0b0010, 0b0000]),
    mask([0b0100, 0b0100, 0b1100, 0b0000]),
];

static L_MASKS: [Mask; 4] = [
    mask([0b0010, 0b1110, 0b0000, 0b0000]),
    mask([0b0100, 0b0100, 0b0110, 0b0000]),
    mask([0b0000, 0b1110, 0b1000, 0b0000]),
    mask([0b1100, 0b0100, 0b0100, 0b0000]),
];

static S_MASKS: [Mask; 4] = [
    mask([0b0110, 0b1100, 0b0000, 0b0000]),
    mask([0b0100, 0b0110, 0b0010, 0b0000]),
    mask([0b0000, 0b0110, 0b1100, 0b0000]),
    mask([0b1000, 0b1100, 0b0100, 0b0000]),
];

static Z_MASKS: [Mask; 4] = [
    mask([0b1100, 0b0110, 0b0000, 0b0000]),
    mask([0b0010, 0b0110, 0b0100, 0b0000]),
    mask([0b0000, 0b1100, 0b0110, 0b0000]),
    mask([0b0100, 0b1100, 0b1000, 0b0000]),
];

static T_MASKS: [Mask; 4] = [
    mask([0b0000, 0b1110, 0b0100, 0b0000]),
    mask([0b0100, 0b0110, 0b0100, 0b0000]),
    mask([0b0100, 0b1110, 0b0000, 0b0000]),
    mask([0b0100, 0b1100, 0b0100, 0b0000]),
];

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::O,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
        Shape::T,
    ];

    #[must_use]
    pub fn mask(self, facing: Facing) -> &'static Mask {
        match self {
            Shape::I => &I_MASKS[facing.index()],
            // The square looks the same from every side
            Shape::O => &O_MASK,
            Shape::J => &J_MASKS[facing.index()],
            Shape::L => &L_MASKS[facing.index()],
            Shape::S => &S_MASKS[facing.index()],
            Shape::Z => &Z_MASKS[facing.index()],
            Shape::T => &T_MASKS[facing.index()],
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Shape::I => 'I',
            Shape::O => 'O',
            Shape::J => 'J',
            Shape::L => 'L',
            Shape::S => 'S',
            Shape::Z => 'Z',
            Shape::T => 'T',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Clear,
    Blocked,
    Frozen,
}

#[derive(Debug, Clone, Copy)]
pub struct Cell {
    position: Position,
    state: CellState,
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            position: Position::new(x, y),
            state: CellState::Clear,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    #[must_use]
    pub fn is(&self, state: CellState) -> bool {
        self.state == state
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.is(CellState::Clear)
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.is(CellState::Blocked)
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.is(CellState::Frozen)
    }

    pub fn clear(&mut self) {
        self.set_state(CellState::Clear);
    }

    pub fn block(&mut self) {
        self.set_state(CellState::Blocked);
    }

    pub fn freeze(&mut self) {
        self.set_state(CellState::Frozen);
    }
}

// Cells are identified by where they sit, not by what they hold
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cell {}

impl std::hash::Hash for Cell {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Grid {
    // Indexed [x][y], iteration is x-major
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        let cells = (0..GRID_SIZE)
            .map(|x| (0..GRID_SIZE).map(|y| Cell::new(x, y)).collect())
            .collect();
        Self { cells }
    }

    #[must_use]
    pub fn size(&self) -> i32 {
        self.cells.len() as i32
    }

    #[must_use]
    pub fn contains(position: Position) -> bool {
        (0..GRID_SIZE).contains(&position.x) && (0..GRID_SIZE).contains(&position.y)
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Cell> {
        if Self::contains(position) {
            Some(&self.cells[position.x as usize][position.y as usize])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        if Self::contains(position) {
            Some(&mut self.cells[position.x as usize][position.y as usize])
        } else {
            None
        }
    }

    /// Bounds-checked lookup.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfRange`] when `(x, y)` is outside the grid.
    pub fn at(&self, x: i32, y: i32) -> EngineResult<&Cell> {
        self.get(Position::new(x, y))
            .ok_or(EngineError::OutOfRange { x, y })
    }

    /// Mutable counterpart of [`Grid::at`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfRange`] when `(x, y)` is outside the grid.
    pub fn at_mut(&mut self, x: i32, y: i32) -> EngineResult<&mut Cell> {
        self.get_mut(Position::new(x, y))
            .ok_or(EngineError::OutOfRange { x, y })
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    #[must_use]
    pub fn cells_where(&self, state: CellState) -> Vec<&Cell> {
        self.cells().filter(|cell| cell.is(state)).collect()
    }

    #[must_use]
    pub fn clear_cells(&self) -> Vec<&Cell> {
        self.cells_where(CellState::Clear)
    }

    #[must_use]
    pub fn frozen_cells(&self) -> Vec<&Cell> {
        self.cells_where(CellState::Frozen)
    }

    #[must_use]
    pub fn blocked_cells(&self) -> Vec<&Cell> {
        self.cells_where(CellState::Blocked)
    }

    #[must_use]
    pub fn frozen_positions(&self) -> Vec<Position> {
        self.cells()
            .filter(|cell| cell.is_frozen())
            .map(Cell::position)
            .collect()
    }

    // Point queries are false off the grid
    #[must_use]
    pub fn is_clear(&self, position: Position) -> bool {
        self.get(position).is_some_and(Cell::is_clear)
    }

    #[must_use]
    pub fn is_frozen(&self, position: Position) -> bool {
        self.get(position).is_some_and(Cell::is_frozen)
    }

    #[must_use]
    pub fn is_blocked(&self, position: Position) -> bool {
        self.get(position).is_some_and(Cell::is_blocked)
    }

    pub fn clear_all_blocked(&mut self) {
        self.cells
            .iter_mut()
            .flatten()
            .filter(|cell| cell.is_blocked())
            .for_each(Cell::clear);
    }

    pub fn freeze_all_blocked(&mut self) {
        self.cells
            .iter_mut()
            .flatten()
            .filter(|cell| cell.is_blocked())
            .for_each(Cell::freeze);
    }

    // Any frozen cell on the outermost ring
    #[must_use]
    pub fn has_frozen_border(&self) -> bool {
        let far = GRID_SIZE - BORDER_WIDTH;
        self.cells().any(|cell| {
            let Position { x, y } = cell.position();
            cell.is_frozen() && (x < BORDER_WIDTH || y < BORDER_WIDTH || x >= far || y >= far)
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

// Counter changes the renderer may want to highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterChange {
    Score(u32),
    Speed(u32),
    LineLength(u32),
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub score: u32,
    pub speed: u32,
    pub line_length: u32,
    pub game_over: bool,
    changes: Vec<CounterChange>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&RulesConfig::default())
    }
}

impl GameState {
    #[must_use]
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            score: 0,
            speed: 0,
            line_length: rules.start_clear_length,
            game_over: false,
            changes: Vec::new(),
        }
    }

    pub fn reset(&mut self, rules: &RulesConfig) {
        *self = Self::new(rules);
    }

    // Called once for every cell removed by a line clear
    pub fn award_cleared_cell(&mut self, rules: &RulesConfig) {
        self.score += rules.prize_per_cell;
        self.changes.push(CounterChange::Score(self.score));
        self.change_speed(rules);
        self.change_line_length(rules);
    }

    pub fn change_speed(&mut self, rules: &RulesConfig) {
        if self.score / rules.speed_modifier.max(1) > self.speed
            && self.speed < rules.max_game_speed
        {
            self.speed += 1;
            self.changes.push(CounterChange::Speed(self.speed));
        }
    }

    // Lines get one cell longer every `length_modifier` points
    pub fn change_line_length(&mut self, rules: &RulesConfig) {
        let grown = self.line_length.saturating_sub(rules.start_clear_length);
        if self.score / rules.length_modifier.max(1) > grown
            && self.line_length < rules.max_clear_length
        {
            self.line_length += 1;
            self.changes.push(CounterChange::LineLength(self.line_length));
        }
    }

    // Ticks the fall timer has to reach before a forced advance
    #[must_use]
    pub fn fall_interval(&self, rules: &RulesConfig) -> u32 {
        rules.max_game_speed.saturating_sub(self.speed)
    }

    pub fn drain_changes(&mut self) -> Vec<CounterChange> {
        std::mem::take(&mut self.changes)
    }
}

// Random source for arriving figures
#[derive(Resource, Debug, Clone)]
pub struct FigureRng {
    rng: fastrand::Rng,
}

impl FigureRng {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { rng }
    }

    pub fn arrival_point(&mut self) -> Position {
        window::arrival_point(self.rng.usize(..crate::game::ARRIVAL_POINTS))
    }

    // Uniform over the 28 (shape, facing) entries; the square fills all four facing slots
    pub fn orientation(&mut self) -> (Shape, Facing) {
        let shape = Shape::ALL[self.rng.usize(..Shape::ALL.len())];
        let facing = Facing::ALL[self.rng.usize(..Facing::ALL.len())];
        (shape, facing)
    }
}

impl Default for FigureRng {
    fn default() -> Self {
        Self::new(None)
    }
}

// Player requests for the next tick
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    pub movement: Option<Direction>,
    pub rotation: Option<Direction>,
}

// Frames counted since the last forced advance
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallTimer {
    pub frames: u32,
}

impl FallTimer {
    #[must_use]
    pub fn new(start: u32) -> Self {
        Self { frames: start }
    }
}

impl Default for FallTimer {
    fn default() -> Self {
        Self::new(crate::game::START_FRAME_COUNT)
    }
}
