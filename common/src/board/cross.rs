//! Four-seat cross board on a 15x15 grid.
//!
//! Seat order is red (left arm), green (top), yellow (right), blue (bottom); each
//! seat enters the loop 13 cells after the previous one.

use super::{GridCoord, TrackCell};

pub const GRID_SIZE: u8 = 15;
pub const LOOP_LEN: usize = 52;
pub const HOME_LEN: usize = 5;
pub const FINISH_POSITION: i32 = (LOOP_LEN + HOME_LEN) as i32;
pub const CENTER: GridCoord = GridCoord::new(7, 7);
pub const ENTRY_OFFSETS: [usize; 4] = [0, 13, 26, 39];

const fn c(row: u8, col: u8) -> GridCoord {
    GridCoord::new(row, col)
}

pub const SHARED_LOOP: [GridCoord; LOOP_LEN] = [
    // red arm, from the red entry cell up the left side of the top arm
    c(6, 1), c(6, 2), c(6, 3), c(6, 4), c(6, 5),
    c(5, 6), c(4, 6), c(3, 6), c(2, 6), c(1, 6), c(0, 6),
    c(0, 7), c(0, 8),
    // green
    c(1, 8), c(2, 8), c(3, 8), c(4, 8), c(5, 8),
    c(6, 9), c(6, 10), c(6, 11), c(6, 12), c(6, 13), c(6, 14),
    c(7, 14), c(8, 14),
    // yellow
    c(8, 13), c(8, 12), c(8, 11), c(8, 10), c(8, 9),
    c(9, 8), c(10, 8), c(11, 8), c(12, 8), c(13, 8), c(14, 8),
    c(14, 7), c(14, 6),
    // blue
    c(13, 6), c(12, 6), c(11, 6), c(10, 6), c(9, 6),
    c(8, 5), c(8, 4), c(8, 3), c(8, 2), c(8, 1), c(8, 0),
    c(7, 0), c(6, 0),
];

pub const HOME_STRETCH: [[GridCoord; HOME_LEN]; 4] = [
    [c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5)],
    [c(1, 7), c(2, 7), c(3, 7), c(4, 7), c(5, 7)],
    [c(7, 13), c(7, 12), c(7, 11), c(7, 10), c(7, 9)],
    [c(13, 7), c(12, 7), c(11, 7), c(10, 7), c(9, 7)],
];

pub const BASE_SLOTS: [[GridCoord; 4]; 4] = [
    [c(1, 1), c(1, 4), c(4, 1), c(4, 4)],
    [c(1, 10), c(1, 13), c(4, 10), c(4, 13)],
    [c(10, 10), c(10, 13), c(13, 10), c(13, 13)],
    [c(10, 1), c(10, 4), c(13, 1), c(13, 4)],
];

/// Safe cells: the four entry cells plus the star cells.
pub const SAFE_CELLS: [GridCoord; 8] = [
    c(6, 1), c(1, 8), c(8, 13), c(13, 6),
    c(2, 6), c(6, 12), c(12, 8), c(8, 2),
];

pub fn cell_to_grid(cell: TrackCell) -> GridCoord {
    match cell {
        TrackCell::Loop(step) => SHARED_LOOP[step as usize % LOOP_LEN],
        TrackCell::Home { seat_index, step } => HOME_STRETCH
            .get(seat_index)
            .and_then(|home| home.get(step as usize))
            .copied()
            .unwrap_or(CENTER),
        TrackCell::Base { seat_index, slot } => BASE_SLOTS
            .get(seat_index)
            .and_then(|slots| slots.get(slot as usize))
            .copied()
            .unwrap_or(CENTER),
        TrackCell::HomeBase(_) | TrackCell::Center => CENTER,
    }
}
