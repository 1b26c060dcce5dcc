//! Coordinate engine: maps a player-relative track position to a board cell.
//!
//! Resolution happens in two steps. [`resolve_cell`] turns `(seat, piece, position)`
//! into a [`TrackCell`], which keeps loop steps, home paths and base slots in separate
//! namespaces. [`cell_to_grid`] then places that cell on the topology's square grid.
//! Both steps are total: anything outside the declared domain lands on the center cell.

pub mod cross;
pub mod star;
pub mod track;

use serde::{Deserialize, Serialize};

use crate::protocol::Seat;

pub const BASE_POSITION: i32 = -1;
pub const PIECES_PER_PLAYER: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub row: u8,
    pub col: u8,
}

impl GridCoord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[cfg(test)]
    pub fn manhattan_distance(&self, other: &GridCoord) -> u32 {
        (self.row as i32 - other.row as i32).unsigned_abs()
            + (self.col as i32 - other.col as i32).unsigned_abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    /// Four seats on a 15x15 cross with a 52-cell shared loop.
    Cross4,
    /// Eight seats on a 27x27 star, one 13-step arm per seat.
    Star8,
}

impl Topology {
    pub fn seats(&self) -> &'static [Seat] {
        match self {
            Topology::Cross4 => &Seat::CROSS_SEATS,
            Topology::Star8 => &Seat::STAR_SEATS,
        }
    }

    pub fn seat_index(&self, seat: Seat) -> Option<usize> {
        self.seats().iter().position(|s| *s == seat)
    }

    pub fn loop_len(&self) -> i32 {
        match self {
            Topology::Cross4 => cross::LOOP_LEN as i32,
            Topology::Star8 => star::LOOP_LEN as i32,
        }
    }

    pub fn home_len(&self) -> i32 {
        match self {
            Topology::Cross4 => cross::HOME_LEN as i32,
            Topology::Star8 => star::HOME_LEN as i32,
        }
    }

    /// Position value meaning "finished"; one past the last home cell.
    pub fn finish_position(&self) -> i32 {
        self.loop_len() + self.home_len()
    }

    pub fn grid_size(&self) -> u8 {
        match self {
            Topology::Cross4 => cross::GRID_SIZE,
            Topology::Star8 => star::GRID_SIZE,
        }
    }

    pub fn center(&self) -> GridCoord {
        match self {
            Topology::Cross4 => cross::CENTER,
            Topology::Star8 => star::CENTER,
        }
    }

    /// Every cell of the shared loop in step order, used for drawing the board.
    pub fn loop_cells(&self) -> Vec<GridCoord> {
        (0..self.loop_len() as u16)
            .map(|step| cell_to_grid(*self, TrackCell::Loop(step)))
            .collect()
    }

    pub fn home_cells(&self, seat_index: usize) -> Vec<GridCoord> {
        (0..self.home_len() as u8)
            .map(|step| cell_to_grid(*self, TrackCell::Home { seat_index, step }))
            .collect()
    }

    pub fn base_cells(&self, seat_index: usize) -> Vec<GridCoord> {
        (0..PIECES_PER_PLAYER as u8)
            .map(|slot| cell_to_grid(*self, TrackCell::Base { seat_index, slot }))
            .collect()
    }
}

/// A logical board location. Loop steps are global (shared by every seat);
/// the other variants are private to one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackCell {
    Base { seat_index: usize, slot: u8 },
    Loop(u16),
    Home { seat_index: usize, step: u8 },
    /// Per-seat finishing cell; only the star board has one.
    HomeBase(usize),
    Center,
}

/// Returns `None` only when the seat does not play on this topology.
pub fn resolve_cell(topology: Topology, seat: Seat, piece_index: usize, position: i32) -> Option<TrackCell> {
    let seat_index = topology.seat_index(seat)?;
    let loop_len = topology.loop_len();
    let finish = topology.finish_position();

    let cell = if position == BASE_POSITION {
        TrackCell::Base {
            seat_index,
            slot: (piece_index % PIECES_PER_PLAYER) as u8,
        }
    } else if (0..loop_len).contains(&position) {
        let offset = match topology {
            Topology::Cross4 => cross::ENTRY_OFFSETS[seat_index] as i32,
            Topology::Star8 => (seat_index * star::ARM_STEPS) as i32,
        };
        TrackCell::Loop(((position + offset) % loop_len) as u16)
    } else if (loop_len..finish).contains(&position) {
        TrackCell::Home {
            seat_index,
            step: (position - loop_len) as u8,
        }
    } else if position == finish {
        match topology {
            Topology::Cross4 => TrackCell::Center,
            Topology::Star8 => TrackCell::HomeBase(seat_index),
        }
    } else {
        TrackCell::Center
    };
    Some(cell)
}

pub fn cell_to_grid(topology: Topology, cell: TrackCell) -> GridCoord {
    match topology {
        Topology::Cross4 => cross::cell_to_grid(cell),
        Topology::Star8 => star::cell_to_grid(cell),
    }
}

pub fn map_to_grid(position: i32, seat: Seat, piece_index: usize, topology: Topology) -> Option<GridCoord> {
    resolve_cell(topology, seat, piece_index, position).map(|cell| cell_to_grid(topology, cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_loop_positions_stay_on_shared_loop_for_every_color() {
        let shared: HashSet<GridCoord> = Topology::Cross4.loop_cells().into_iter().collect();
        assert_eq!(shared.len(), 52);
        for seat in Seat::CROSS_SEATS {
            for position in 0..=51 {
                let coord = map_to_grid(position, seat, 0, Topology::Cross4).unwrap();
                assert!(shared.contains(&coord), "{:?} at {} left the loop", seat, position);
            }
        }
    }

    #[test]
    fn test_entry_cells_are_pairwise_distinct() {
        let entries: HashSet<GridCoord> = Seat::CROSS_SEATS
            .iter()
            .map(|seat| map_to_grid(0, *seat, 0, Topology::Cross4).unwrap())
            .collect();
        assert_eq!(entries.len(), 4);

        let star_entries: HashSet<GridCoord> = Seat::STAR_SEATS
            .iter()
            .map(|seat| map_to_grid(0, *seat, 0, Topology::Star8).unwrap())
            .collect();
        assert_eq!(star_entries.len(), 8);
    }

    #[test]
    fn test_home_stretch_progresses_toward_center() {
        let center = Topology::Cross4.center();
        for (index, seat) in Seat::CROSS_SEATS.iter().enumerate() {
            let home = Topology::Cross4.home_cells(index);
            let mut last_distance = u32::MAX;
            for position in 52..=56 {
                let coord = map_to_grid(position, *seat, 0, Topology::Cross4).unwrap();
                assert_eq!(coord, home[(position - 52) as usize]);
                let distance = coord.manhattan_distance(&center);
                assert!(distance < last_distance, "{:?} home stretch not monotonic", seat);
                last_distance = distance;
            }
        }
    }

    #[test]
    fn test_finished_and_base_positions() {
        for seat in Seat::CROSS_SEATS {
            assert_eq!(map_to_grid(57, seat, 0, Topology::Cross4), Some(cross::CENTER));
            let slots: HashSet<GridCoord> = (0..4)
                .map(|piece| map_to_grid(-1, seat, piece, Topology::Cross4).unwrap())
                .collect();
            assert_eq!(slots.len(), 4, "{:?} base pieces overlap", seat);
        }
    }

    #[test]
    fn test_out_of_domain_falls_back_to_center() {
        assert_eq!(map_to_grid(58, Seat::Red, 0, Topology::Cross4), Some(cross::CENTER));
        assert_eq!(map_to_grid(-7, Seat::Blue, 2, Topology::Cross4), Some(cross::CENTER));
        assert_eq!(map_to_grid(500, Seat::Pink, 0, Topology::Star8), Some(star::CENTER));
    }

    #[test]
    fn test_seat_outside_topology_maps_to_none() {
        assert_eq!(map_to_grid(3, Seat::X, 0, Topology::Cross4), None);
        assert_eq!(map_to_grid(3, Seat::Observer, 0, Topology::Star8), None);
        assert_eq!(map_to_grid(3, Seat::Purple, 0, Topology::Cross4), None);
    }

    #[test]
    fn test_star_home_path_is_separate_from_loop() {
        let loop_cells: HashSet<GridCoord> = Topology::Star8.loop_cells().into_iter().collect();
        for (index, seat) in Seat::STAR_SEATS.iter().enumerate() {
            let finish = Topology::Star8.finish_position();
            for position in Topology::Star8.loop_len()..finish {
                let cell = resolve_cell(Topology::Star8, *seat, 0, position).unwrap();
                assert!(matches!(cell, TrackCell::Home { seat_index, .. } if seat_index == index));
                assert!(!loop_cells.contains(&cell_to_grid(Topology::Star8, cell)));
            }
            assert_eq!(
                resolve_cell(Topology::Star8, *seat, 0, finish),
                Some(TrackCell::HomeBase(index))
            );
        }
    }
}
