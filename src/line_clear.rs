#![warn(clippy::all, clippy::pedantic)]

//! Line clearing over the grid's frozen cells.
//!
//! A clearable line is a run of at least `line_length` consecutive frozen
//! cells sharing a column or a row. Lines are cleared one at a time: after
//! each clear the frozen cells behind the line (seen from the active figure's
//! travel direction) slide one step into the gap and the grid is scanned again,
//! so a shift can cascade into the next clear.

use std::collections::HashSet;

use log::{debug, info};

use crate::components::{Axis, Direction, GameState, Grid, Position};
use crate::config::RulesConfig;
use crate::window::Quarter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub lines: usize,
    pub cells: usize,
}

/// Splits `values` into maximal runs of consecutive integers, in ascending order.
#[must_use]
pub fn chunk(values: &[i32]) -> Vec<Vec<i32>> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mut chunks: Vec<Vec<i32>> = Vec::new();
    for value in sorted {
        if let Some(run) = chunks.last_mut() {
            if run.last().is_some_and(|&last| value - last == 1) {
                run.push(value);
                continue;
            }
        }
        chunks.push(vec![value]);
    }
    chunks
}

/// First clearable line among positions sharing an `axis` coordinate, scanning
/// coordinates in increasing order.
#[must_use]
pub fn check_line(frozen: &[Position], axis: Axis, line_length: u32) -> Option<Vec<Position>> {
    let line_length = line_length as usize;
    let across = axis.other();
    let min = frozen.iter().map(|p| p.along(axis)).min()?;
    let max = frozen.iter().map(|p| p.along(axis)).max()?;

    for n in min..=max {
        let line: Vec<Position> = frozen
            .iter()
            .copied()
            .filter(|p| p.along(axis) == n)
            .collect();
        if line.len() < line_length {
            continue;
        }

        let projected: Vec<i32> = line.iter().map(|p| p.along(across)).collect();
        let to_clear: HashSet<i32> = chunk(&projected)
            .into_iter()
            .filter(|run| run.len() >= line_length)
            .flatten()
            .collect();
        if !to_clear.is_empty() {
            return Some(
                line.into_iter()
                    .filter(|p| to_clear.contains(&p.along(across)))
                    .collect(),
            );
        }
    }
    None
}

// Columns (shared x) are checked before rows (shared y)
#[must_use]
pub fn find_line(frozen: &[Position], line_length: u32) -> Option<Vec<Position>> {
    check_line(frozen, Axis::X, line_length).or_else(|| check_line(frozen, Axis::Y, line_length))
}

/// Frozen cells that have to slide towards a cleared `line`, layer by layer
/// outwards from it, against the travel direction.
///
/// A cell joins when it sits in the travel quarter, is frozen, is not part of
/// the line, and the cell one step closer to the line is frozen or on the line.
#[must_use]
pub fn shifted_frozen(grid: &Grid, line: &[Position], travel: Direction) -> Vec<Position> {
    let away = travel.opposite();
    let quarter = Quarter::for_travel(travel);
    let on_line: HashSet<Position> = line.iter().copied().collect();

    let mut shifted = Vec::new();
    let mut layer = line.to_vec();
    loop {
        layer = layer.iter().map(|p| p.shifted(away)).collect();
        let found: Vec<Position> = layer
            .iter()
            .copied()
            .filter(|&p| {
                let behind = p.shifted(travel);
                quarter.contains(p)
                    && !on_line.contains(&p)
                    && grid.is_frozen(p)
                    && (grid.is_frozen(behind) || on_line.contains(&behind))
            })
            .collect();
        if found.is_empty() {
            break;
        }
        shifted.extend(found);
    }
    shifted
}

/// Moves every shifted cell one step towards the cleared line. Cells whose
/// destination leaves the travel quarter are dropped.
pub fn move_shifted_frozen(grid: &mut Grid, shifted: &[Position], travel: Direction) {
    let quarter = Quarter::for_travel(travel);
    for &position in shifted {
        if let Some(cell) = grid.get_mut(position) {
            cell.clear();
        }
    }
    for destination in shifted.iter().map(|p| p.shifted(travel)) {
        if !quarter.contains(destination) {
            continue;
        }
        if let Some(cell) = grid.get_mut(destination) {
            cell.freeze();
        }
    }
}

/// Clears lines until none is left, awarding every cleared cell to `state`.
pub fn clear_lines(
    grid: &mut Grid,
    state: &mut GameState,
    rules: &RulesConfig,
    travel: Direction,
) -> ClearReport {
    let mut report = ClearReport::default();

    loop {
        let frozen = grid.frozen_positions();
        if frozen.len() < state.line_length as usize {
            break;
        }
        let Some(line) = find_line(&frozen, state.line_length) else {
            break;
        };

        for &position in &line {
            if let Some(cell) = grid.get_mut(position) {
                cell.clear();
            }
            state.award_cleared_cell(rules);
        }
        report.lines += 1;
        report.cells += line.len();

        let shifted = shifted_frozen(grid, &line, travel);
        debug!(
            "Cleared {} cells, shifting {} frozen cells {:?}",
            line.len(),
            shifted.len(),
            travel
        );
        if !shifted.is_empty() {
            move_shifted_frozen(grid, &shifted, travel);
        }
    }

    if report.lines > 0 {
        info!(
            "Cleared {} lines ({} cells), score {}",
            report.lines, report.cells, state.score
        );
    }
    report
}
