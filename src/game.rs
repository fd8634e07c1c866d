#![warn(clippy::all, clippy::pedantic)]

// Grid dimensions (the grid is always square)
pub const GRID_SIZE: i32 = 34;

// Figure window dimensions
pub const WINDOW_SIZE: usize = 4;
pub const FIGURE_BLOCKS: usize = 4; // Every figure is drawn with exactly four cells

// Arrival edges: figures spawn one window-width beyond each edge
pub const ARRIVAL_OFFSET: i32 = WINDOW_SIZE as i32;
pub const ARRIVAL_SPAN: i32 = 30; // Positions per edge, 0..30 along the edge
pub const ARRIVAL_POINTS: usize = 4 * ARRIVAL_SPAN as usize;

// Quarters: the half of the grid a figure is confined to, with room for partial entry
pub const QUARTER_SPLIT: i32 = 17;
pub const QUARTER_MARGIN: i32 = 4;

// Outermost ring of the grid; a frozen cell here ends the game
pub const BORDER_WIDTH: i32 = 1;

// Scoring
pub const PRIZE_BY_CLEAR: u32 = 60; // Points per cleared cell

// Line length progression
pub const START_CLEAR_LENGTH: u32 = 6;
pub const MAX_CLEAR_LENGTH: u32 = 10;
pub const LENGTH_MODIFIER: u32 = 7000; // Score step for each extra cell in a clearable line

// Speed progression
pub const MAX_GAME_SPEED: u32 = 22;
pub const SPEED_MODIFIER: u32 = 1000; // Score step for each speed increase

// Fall timer starts here after every forced advance
pub const START_FRAME_COUNT: u32 = 5;
