//! Eight-seat star board on a 27x27 grid.
//!
//! Seat `i` owns the arm pointing in compass direction `i` (clockwise from north).
//! Each arm has three lanes: the outbound lane on the side facing the previous arm,
//! the center lane (home path), and the inbound lane facing the next arm. The loop
//! runs outbound, tip, inbound, then continues on the next arm clockwise.
//!
//! Diagonal arms start one cell closer to the center so that consecutive arms meet
//! at neighbouring cells.

use super::{GridCoord, TrackCell};

pub const GRID_SIZE: u8 = 27;
pub const SEATS: usize = 8;
pub const OUTBOUND_STEPS: usize = 6;
pub const ARM_STEPS: usize = 2 * OUTBOUND_STEPS + 1;
pub const LOOP_LEN: usize = SEATS * ARM_STEPS;
pub const HOME_LEN: usize = 5;
pub const CENTER: GridCoord = GridCoord::new(13, 13);

const BASE_DISTANCE: i32 = 11;

const DIRECTIONS: [(i32, i32); SEATS] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lane {
    Outbound,
    Center,
    Inbound,
}

fn is_diagonal(direction: (i32, i32)) -> bool {
    direction.0 != 0 && direction.1 != 0
}

/// Perpendicular pointing toward the next arm clockwise.
fn clockwise_side(direction: (i32, i32)) -> (i32, i32) {
    (direction.1, -direction.0)
}

fn inner_distance(direction: (i32, i32)) -> i32 {
    if is_diagonal(direction) { 2 } else { 3 }
}

fn lane_offset(direction: (i32, i32), lane: Lane) -> (i32, i32) {
    let side = clockwise_side(direction);
    let sign = match lane {
        Lane::Outbound => -1,
        Lane::Center => return (0, 0),
        Lane::Inbound => 1,
    };
    if is_diagonal(direction) {
        ((direction.0 + sign * side.0) / 2, (direction.1 + sign * side.1) / 2)
    } else {
        (sign * side.0, sign * side.1)
    }
}

fn place(direction: (i32, i32), distance: i32, offset: (i32, i32)) -> GridCoord {
    let row = CENTER.row as i32 + distance * direction.0 + offset.0;
    let col = CENTER.col as i32 + distance * direction.1 + offset.1;
    if (0..GRID_SIZE as i32).contains(&row) && (0..GRID_SIZE as i32).contains(&col) {
        GridCoord::new(row as u8, col as u8)
    } else {
        CENTER
    }
}

fn lane_cell(arm: usize, distance_from_inner: i32, lane: Lane) -> GridCoord {
    let direction = DIRECTIONS[arm % SEATS];
    place(
        direction,
        inner_distance(direction) + distance_from_inner,
        lane_offset(direction, lane),
    )
}

/// Global loop step `arm * 13 + local` to grid cell.
pub fn loop_cell(step: usize) -> GridCoord {
    let step = step % LOOP_LEN;
    let arm = step / ARM_STEPS;
    let local = step % ARM_STEPS;
    let last = OUTBOUND_STEPS as i32;
    match local {
        l if l < OUTBOUND_STEPS => lane_cell(arm, l as i32, Lane::Outbound),
        OUTBOUND_STEPS => lane_cell(arm, last, Lane::Center),
        l => lane_cell(arm, (ARM_STEPS - 1 - l) as i32, Lane::Inbound),
    }
}

/// Home path runs down the center lane from the tip toward the home-base cell.
pub fn home_cell(seat_index: usize, step: u8) -> GridCoord {
    if seat_index >= SEATS || step as usize >= HOME_LEN {
        return CENTER;
    }
    lane_cell(seat_index, (HOME_LEN - step as usize) as i32, Lane::Center)
}

pub fn home_base_cell(seat_index: usize) -> GridCoord {
    if seat_index >= SEATS {
        return CENTER;
    }
    lane_cell(seat_index, 0, Lane::Center)
}

pub fn base_slot(seat_index: usize, slot: u8) -> GridCoord {
    if seat_index >= SEATS {
        return CENTER;
    }
    let direction = DIRECTIONS[seat_index];
    let side = clockwise_side(direction);
    let offset = match slot % 4 {
        0 => (0, 0),
        1 => side,
        2 => direction,
        _ => (direction.0 + side.0, direction.1 + side.1),
    };
    place(direction, BASE_DISTANCE, offset)
}

pub fn cell_to_grid(cell: TrackCell) -> GridCoord {
    match cell {
        TrackCell::Loop(step) => loop_cell(step as usize),
        TrackCell::Home { seat_index, step } => home_cell(seat_index, step),
        TrackCell::HomeBase(seat_index) => home_base_cell(seat_index),
        TrackCell::Base { seat_index, slot } => base_slot(seat_index, slot),
        TrackCell::Center => CENTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_cells() -> Vec<GridCoord> {
        let mut cells: Vec<GridCoord> = (0..LOOP_LEN).map(loop_cell).collect();
        for seat in 0..SEATS {
            cells.extend((0..HOME_LEN as u8).map(|step| home_cell(seat, step)));
            cells.push(home_base_cell(seat));
            cells.extend((0..4).map(|slot| base_slot(seat, slot)));
        }
        cells.push(CENTER);
        cells
    }

    #[test]
    fn test_no_two_board_locations_share_a_cell() {
        let cells = all_cells();
        let distinct: HashSet<GridCoord> = cells.iter().copied().collect();
        assert_eq!(distinct.len(), cells.len());
    }

    #[test]
    fn test_loop_steps_are_neighbouring_cells() {
        for step in 0..LOOP_LEN {
            let a = loop_cell(step);
            let b = loop_cell(step + 1);
            let dr = (a.row as i32 - b.row as i32).abs();
            let dc = (a.col as i32 - b.col as i32).abs();
            assert_eq!(dr.max(dc), 1, "steps {} and {} are apart", step, step + 1);
        }
    }

    #[test]
    fn test_arm_layout_for_north_seat() {
        assert_eq!(loop_cell(0), GridCoord::new(10, 12));
        assert_eq!(loop_cell(6), GridCoord::new(4, 13));
        assert_eq!(loop_cell(12), GridCoord::new(10, 14));
        assert_eq!(home_cell(0, 0), GridCoord::new(5, 13));
        assert_eq!(home_base_cell(0), GridCoord::new(10, 13));
    }

    #[test]
    fn test_home_path_approaches_home_base() {
        for seat in 0..SEATS {
            let target = home_base_cell(seat);
            let distances: Vec<u32> = (0..HOME_LEN as u8)
                .map(|step| home_cell(seat, step).manhattan_distance(&target))
                .collect();
            assert!(distances.windows(2).all(|w| w[1] < w[0]), "seat {}: {:?}", seat, distances);
        }
    }

    #[test]
    fn test_out_of_range_home_step_is_center() {
        assert_eq!(home_cell(0, HOME_LEN as u8), CENTER);
        assert_eq!(home_cell(SEATS, 0), CENTER);
    }
}
