#![warn(clippy::all, clippy::pedantic)]

use std::error::Error;
use std::fmt;

use crate::components::Direction;

// Engine errors signal geometry bugs upstream, never ordinary gameplay outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    // A window was spawned at a top-left that is not an arrival point
    InvalidArrival { x: i32, y: i32 },
    // Rotation only knows Left and Right
    InvalidRotation(Direction),
    // Grid indexed outside [0, GRID_SIZE)
    OutOfRange { x: i32, y: i32 },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidArrival { x, y } => {
                write!(f, "({x}, {y}) is not an arrival position")
            }
            EngineError::InvalidRotation(direction) => {
                write!(f, "cannot rotate towards {direction:?}")
            }
            EngineError::OutOfRange { x, y } => write!(f, "cell ({x}, {y}) is outside the grid"),
        }
    }
}

impl Error for EngineError {}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
