use serde::{Deserialize, Serialize};

use crate::game::{
    LENGTH_MODIFIER, MAX_CLEAR_LENGTH, MAX_GAME_SPEED, PRIZE_BY_CLEAR, SPEED_MODIFIER,
    START_CLEAR_LENGTH, START_FRAME_COUNT,
};

// Tunable game rules; the grid size is fixed and deliberately absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub prize_per_cell: u32,
    pub start_clear_length: u32,
    pub max_clear_length: u32,
    pub length_modifier: u32,
    pub max_game_speed: u32,
    pub speed_modifier: u32,
    pub start_frame_count: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            prize_per_cell: PRIZE_BY_CLEAR,
            start_clear_length: START_CLEAR_LENGTH,
            max_clear_length: MAX_CLEAR_LENGTH,
            length_modifier: LENGTH_MODIFIER,
            max_game_speed: MAX_GAME_SPEED,
            speed_modifier: SPEED_MODIFIER,
            start_frame_count: START_FRAME_COUNT,
        }
    }
}
