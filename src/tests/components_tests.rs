#[cfg(test)]
mod cell_tests {
    use crate::components::{Cell, CellState, Position};

    #[test]
    fn test_cell_position() {
        let cell = Cell::new(3, 7);
        assert_eq!(cell.position(), Position::new(3, 7));
        assert_eq!(cell.state(), CellState::Clear);
    }

    #[test]
    fn test_cell_state_is_exclusive() {
        let mut cell = Cell::new(0, 0);
        let states = [CellState::Frozen, CellState::Blocked, CellState::Clear];

        for state in states {
            cell.set_state(state);
            // Exactly one of the three flags holds
            let flags = [cell.is_clear(), cell.is_blocked(), cell.is_frozen()];
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
            assert!(cell.is(state));
        }

        cell.freeze();
        assert!(cell.is_frozen() && !cell.is_clear() && !cell.is_blocked());
        cell.block();
        assert!(cell.is_blocked() && !cell.is_clear() && !cell.is_frozen());
        cell.clear();
        assert!(cell.is_clear() && !cell.is_blocked() && !cell.is_frozen());
    }

    #[test]
    fn test_cell_equality_ignores_state() {
        let mut frozen = Cell::new(0, 0);
        frozen.freeze();

        assert_eq!(frozen, Cell::new(0, 0));
        assert_ne!(frozen, Cell::new(0, 1));

        let set: std::collections::HashSet<Cell> = [frozen, Cell::new(0, 0)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}

#[cfg(test)]
mod grid_tests {
    use crate::components::{CellState, Grid, Position};
    use crate::error::EngineError;
    use crate::game::GRID_SIZE;
    use crate::tests::test_utils::freeze_all;

    const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new();

        assert_eq!(grid.size(), 34);
        assert_eq!(grid.cells().count(), CELL_COUNT);
        assert_eq!(grid.clear_cells().len(), CELL_COUNT);
        assert!(grid.blocked_cells().is_empty());
        assert!(grid.frozen_cells().is_empty());

        // Every coordinate maps to the cell carrying that position
        for (x, y) in [(0, 0), (0, 17), (17, 0), (17, 17), (33, 33)] {
            let cell = grid.at(x, y).expect("in range");
            assert_eq!(cell.position(), Position::new(x, y));
        }
    }

    #[test]
    fn test_grid_out_of_range() {
        let mut grid = Grid::new();

        assert_eq!(grid.at(-1, 0), Err(EngineError::OutOfRange { x: -1, y: 0 }));
        assert_eq!(grid.at(0, 34), Err(EngineError::OutOfRange { x: 0, y: 34 }));
        assert!(grid.at_mut(34, 34).is_err());
        assert!(grid.get(Position::new(-4, 5)).is_none());

        // Point queries are simply false off the grid
        assert!(!grid.is_clear(Position::new(-1, -1)));
        assert!(!grid.is_frozen(Position::new(40, 0)));
    }

    #[test]
    fn test_cells_where() {
        let mut grid = Grid::new();
        grid.at_mut(0, 0).unwrap().block();
        grid.at_mut(1, 0).unwrap().freeze();

        assert_eq!(grid.clear_cells().len(), CELL_COUNT - 2);
        assert_eq!(grid.cells_where(CellState::Blocked).len(), 1);
        assert_eq!(grid.frozen_cells()[0].position(), Position::new(1, 0));
        assert!(grid.is_blocked(Position::new(0, 0)));
        assert!(grid.is_frozen(Position::new(1, 0)));
        assert!(grid.is_clear(Position::new(2, 0)));
    }

    #[test]
    fn test_frozen_positions_are_x_major() {
        let mut grid = Grid::new();
        freeze_all(&mut grid, &[(5, 1), (2, 9), (5, 0)]);

        assert_eq!(
            grid.frozen_positions(),
            vec![Position::new(2, 9), Position::new(5, 0), Position::new(5, 1)]
        );
    }

    #[test]
    fn test_clear_all_blocked() {
        let mut grid = Grid::new();
        grid.at_mut(0, 0).unwrap().block();
        grid.at_mut(3, 3).unwrap().freeze();

        grid.clear_all_blocked();

        assert!(grid.blocked_cells().is_empty());
        assert_eq!(grid.clear_cells().len(), CELL_COUNT - 1);
        // Frozen cells are untouched
        assert!(grid.is_frozen(Position::new(3, 3)));
    }

    #[test]
    fn test_freeze_all_blocked() {
        let mut grid = Grid::new();
        grid.at_mut(0, 0).unwrap().block();
        grid.at_mut(4, 4).unwrap().block();

        grid.freeze_all_blocked();

        assert!(grid.blocked_cells().is_empty());
        assert_eq!(grid.frozen_cells().len(), 2);
        assert_eq!(grid.clear_cells().len(), CELL_COUNT - 2);
    }

    #[test]
    fn test_has_frozen_border() {
        for (positions, expected) in [
            (vec![(0, 0)], true),
            (vec![(1, 1)], false),
            (vec![(1, 1), (0, 0)], true),
            (vec![(33, 33)], true),
            (vec![(33, 0)], true),
            (vec![(0, 33)], true),
            (vec![(16, 32)], false),
        ] {
            let mut grid = Grid::new();
            freeze_all(&mut grid, &positions);
            assert_eq!(grid.has_frozen_border(), expected, "{positions:?}");
        }
    }

    #[test]
    fn test_blocked_border_is_not_game_over() {
        let mut grid = Grid::new();
        grid.at_mut(0, 5).unwrap().block();
        assert!(!grid.has_frozen_border());
    }
}

#[cfg(test)]
mod shape_tests {
    use crate::components::{Facing, Shape};
    use crate::game::FIGURE_BLOCKS;

    #[test]
    fn test_every_mask_has_four_cells() {
        for shape in Shape::ALL {
            for facing in Facing::ALL {
                let count = shape.mask(facing).iter().flatten().filter(|&&b| b).count();
                assert_eq!(count, FIGURE_BLOCKS, "{shape:?} facing {facing:?}");
            }
        }
    }

    #[test]
    fn test_square_is_rotation_invariant() {
        for facing in Facing::ALL {
            assert_eq!(Shape::O.mask(facing), Shape::O.mask(Facing::Up));
        }
    }

    #[test]
    fn test_other_shapes_change_with_facing() {
        for shape in Shape::ALL.into_iter().filter(|&s| s != Shape::O) {
            assert_ne!(shape.mask(Facing::Up), shape.mask(Facing::Left), "{shape:?}");
        }
    }

    #[test]
    fn test_i_masks() {
        let up = Shape::I.mask(Facing::Up);
        assert_eq!(up[1], [true; 4]);
        assert_eq!(up[0], [false; 4]);

        let left = Shape::I.mask(Facing::Left);
        assert!(left.iter().all(|row| row == &[false, true, false, false]));
    }

    #[test]
    fn test_facing_cycle() {
        assert_eq!(Facing::Up.next(), Facing::Left);
        assert_eq!(Facing::Right.next(), Facing::Up);
        assert_eq!(Facing::Up.previous(), Facing::Right);
        for facing in Facing::ALL {
            assert_eq!(facing.next().previous(), facing);
        }
    }
}

#[cfg(test)]
mod game_state_tests {
    use crate::components::{CounterChange, GameState};
    use crate::config::RulesConfig;
    use crate::game::{MAX_CLEAR_LENGTH, MAX_GAME_SPEED, SPEED_MODIFIER, START_CLEAR_LENGTH};

    #[test]
    fn test_game_state_default() {
        let game_state = GameState::default();

        assert_eq!(game_state.score, 0);
        assert_eq!(game_state.speed, 0);
        assert_eq!(game_state.line_length, START_CLEAR_LENGTH);
        assert!(!game_state.game_over);
    }

    #[test]
    fn test_change_speed() {
        let rules = RulesConfig::default();
        let mut game_state = GameState::default();

        game_state.change_speed(&rules);
        assert_eq!(game_state.speed, 0);

        game_state.score = SPEED_MODIFIER;
        game_state.change_speed(&rules);
        assert_eq!(game_state.speed, 1);

        game_state.score = SPEED_MODIFIER * MAX_GAME_SPEED;
        game_state.speed = MAX_GAME_SPEED - 1;
        game_state.change_speed(&rules);
        assert_eq!(game_state.speed, MAX_GAME_SPEED);

        game_state.score = SPEED_MODIFIER * 100_000;
        game_state.change_speed(&rules);
        assert_eq!(game_state.speed, MAX_GAME_SPEED);
    }

    #[test]
    fn test_change_line_length() {
        let rules = RulesConfig::default();
        let mut game_state = GameState::default();

        game_state.score = rules.length_modifier - 1;
        game_state.change_line_length(&rules);
        assert_eq!(game_state.line_length, START_CLEAR_LENGTH);

        game_state.score = rules.length_modifier;
        game_state.change_line_length(&rules);
        assert_eq!(game_state.line_length, START_CLEAR_LENGTH + 1);

        game_state.score = rules.length_modifier * 1_000;
        for _ in 0..20 {
            game_state.change_line_length(&rules);
        }
        assert_eq!(game_state.line_length, MAX_CLEAR_LENGTH);
    }

    #[test]
    fn test_award_cleared_cell() {
        let rules = RulesConfig::default();
        let mut game_state = GameState::default();

        game_state.award_cleared_cell(&rules);
        assert_eq!(game_state.score, rules.prize_per_cell);
        assert_eq!(
            game_state.drain_changes(),
            vec![CounterChange::Score(rules.prize_per_cell)]
        );
        assert!(game_state.drain_changes().is_empty());

        // 17 cells take the score to 1020, enough for the first speed step
        for _ in 0..16 {
            game_state.award_cleared_cell(&rules);
        }
        assert_eq!(game_state.score, 1020);
        assert_eq!(game_state.speed, 1);
        assert!(game_state.drain_changes().contains(&CounterChange::Speed(1)));
    }

    #[test]
    fn test_fall_interval() {
        let rules = RulesConfig::default();
        let mut game_state = GameState::default();

        assert_eq!(game_state.fall_interval(&rules), MAX_GAME_SPEED);
        game_state.speed = 5;
        assert_eq!(game_state.fall_interval(&rules), MAX_GAME_SPEED - 5);
        game_state.speed = MAX_GAME_SPEED;
        assert_eq!(game_state.fall_interval(&rules), 0);
    }

    #[test]
    fn test_game_state_reset() {
        let rules = RulesConfig::default();
        let mut game_state = GameState::default();
        game_state.award_cleared_cell(&rules);
        game_state.game_over = true;

        game_state.reset(&rules);

        assert_eq!(game_state.score, 0);
        assert!(!game_state.game_over);
        assert!(game_state.drain_changes().is_empty());
    }
}

#[cfg(test)]
mod figure_rng_tests {
    use std::collections::{HashMap, HashSet};

    use crate::components::{Facing, FigureRng, Shape};
    use crate::game::ARRIVAL_POINTS;
    use crate::window::travel_from_arrival;

    const DRAWS: usize = 70_000;

    #[test]
    fn test_every_shape_equally_likely() {
        let mut rng = FigureRng::new(Some(1));
        let mut counts: HashMap<(Shape, Facing), usize> = HashMap::new();
        for _ in 0..DRAWS {
            *counts.entry(rng.orientation()).or_default() += 1;
        }

        // All 28 (shape, facing) pairs show up
        assert_eq!(counts.len(), Shape::ALL.len() * Facing::ALL.len());

        for shape in Shape::ALL {
            let drawn: usize = counts
                .iter()
                .filter(|((s, _), _)| *s == shape)
                .map(|(_, n)| n)
                .sum();
            let share = drawn as f64 / DRAWS as f64;
            assert!((share - 1.0 / 7.0).abs() < 0.01, "{shape:?} share {share}");
        }
    }

    #[test]
    fn test_arrival_points_cover_every_edge_slot() {
        let mut rng = FigureRng::new(Some(2));
        let mut seen = HashSet::new();
        for _ in 0..DRAWS {
            let point = rng.arrival_point();
            assert!(travel_from_arrival(point).is_some(), "{point:?}");
            seen.insert(point);
        }
        assert_eq!(seen.len(), ARRIVAL_POINTS);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut first = FigureRng::new(Some(42));
        let mut second = FigureRng::new(Some(42));
        for _ in 0..1_000 {
            assert_eq!(first.arrival_point(), second.arrival_point());
            assert_eq!(first.orientation(), second.orientation());
        }
    }
}
